//! Optimistic-update helper.
//!
//! UI flows update their local state first and only roll back when the
//! backing operation fails. This generalizes the clone/apply/restore dance
//! so call sites stop duplicating it.

use std::future::Future;

/// Applies `patch` to `state`, then awaits `operation`. On failure the
/// previous state is restored and the error passed through.
///
/// The operation future must be built before the call, so it cannot borrow
/// `state`; capture whatever identifiers it needs up front.
pub async fn apply_optimistic<S, P, Fut, T, E>(
    state: &mut S,
    patch: P,
    operation: Fut,
) -> Result<T, E>
where
    S: Clone,
    P: FnOnce(&mut S),
    Fut: Future<Output = Result<T, E>>,
{
    let saved = state.clone();
    patch(state);
    match operation.await {
        Ok(value) => Ok(value),
        Err(err) => {
            *state = saved;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_keeps_the_patch() {
        let mut items = vec!["a", "b"];
        let result: Result<(), &str> = apply_optimistic(
            &mut items,
            |list| list.retain(|i| *i != "a"),
            async { Ok(()) },
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(items, vec!["b"]);
    }

    #[tokio::test]
    async fn test_failure_restores_previous_state() {
        let mut items = vec!["a", "b"];
        let result: Result<(), &str> = apply_optimistic(
            &mut items,
            |list| list.clear(),
            async { Err("backend said no") },
        )
        .await;

        assert_eq!(result.unwrap_err(), "backend said no");
        assert_eq!(items, vec!["a", "b"]);
    }
}
