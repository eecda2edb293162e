use crate::core::Result;
use crate::facade::StoreCore;
use crate::model::Product;
use crate::repo::{RepoCore, Repository};
use crate::storage::catalog;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Typed access to the product/inventory set.
pub struct ProductRepository {
    inner: RepoCore<Product>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cost_price: f64,
    pub sale_price: f64,
    pub current_stock: i64,
    pub min_stock: i64,
}

/// Unset fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
}

impl ProductRepository {
    pub(crate) fn new(core: Arc<StoreCore>) -> Self {
        Self {
            inner: RepoCore::new(core, catalog::PRODUCTS),
        }
    }

    /// Items at or below their minimum stock threshold.
    pub async fn below_min_stock(&self) -> Result<Vec<Product>> {
        let all = self.inner.list().await?;
        Ok(all.into_iter().filter(Product::needs_restock).collect())
    }
}

#[async_trait]
impl Repository for ProductRepository {
    type Entity = Product;
    type New = NewProduct;
    type Patch = ProductPatch;

    async fn list(&self) -> Result<Vec<Product>> {
        self.inner.list().await
    }

    async fn get(&self, id: &str) -> Result<Option<Product>> {
        self.inner.get(id).await
    }

    async fn insert(&self, new: NewProduct) -> Result<Product> {
        self.inner.insert(&new).await
    }

    async fn update(&self, id: &str, patch: ProductPatch) -> Result<Product> {
        self.inner.update(id, &patch).await
    }

    async fn delete(&self, id: &str) -> Result<usize> {
        self.inner.delete(id).await
    }
}
