use std::path::PathBuf;
use std::time::Duration;

/// Store configuration
///
/// Builder-style, validated at `StoreClient::open`.
///
/// # Examples
///
/// ```
/// use calendash::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::new("calendash_data")
///     .simulated_latency(Duration::from_millis(200));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the durable entries; `None` keeps everything in
    /// memory only.
    pub data_dir: Option<PathBuf>,

    /// Artificial delay applied to every facade and session operation to
    /// emulate network latency. Always completes; there is no timeout class.
    pub simulated_latency: Duration,
}

impl StoreConfig {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
            simulated_latency: Duration::from_millis(250),
        }
    }

    /// Configuration without durable storage and without latency; useful for
    /// tests and previews.
    pub fn ephemeral() -> Self {
        Self {
            data_dir: None,
            simulated_latency: Duration::ZERO,
        }
    }

    /// Set the data directory
    pub fn data_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Set the simulated latency
    pub fn simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }

    /// Disable the artificial delay entirely
    pub fn no_latency(mut self) -> Self {
        self.simulated_latency = Duration::ZERO;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(dir) = &self.data_dir {
            if dir.as_os_str().is_empty() {
                return Err("data_dir cannot be empty".to_string());
            }
        }
        if self.simulated_latency > Duration::from_secs(10) {
            return Err("simulated_latency above 10s is not a plausible network".to_string());
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("calendash_data")
    }
}
