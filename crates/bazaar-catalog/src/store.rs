//! # Catalog Store
//!
//! The boundary to the product catalog data service.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CatalogStore                                         │
//! │                                                                         │
//! │  get_all()             → Vec<Product>        (ordered by id)           │
//! │  get_by_id(id)         → Product | NotFound                            │
//! │  create(product)       → Product (id assigned when 0)                  │
//! │  update(id, patch)     → Product | NotFound                            │
//! │  delete(id)            → () | NotFound                                 │
//! │                                                                         │
//! │  Every call is attempted once. Retrying is the caller's decision,      │
//! │  see `should_retry`.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bazaar_core::{Product, ProductPatch};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Async access to the product catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Returns every product, ordered by id.
    async fn get_all(&self) -> StoreResult<Vec<Product>>;

    async fn get_by_id(&self, id: i64) -> StoreResult<Product>;

    /// Stores a new product. An id of 0 asks the store to assign one.
    async fn create(&self, product: Product) -> StoreResult<Product>;

    /// Applies `patch` to the stored product and returns the result.
    async fn update(&self, id: i64, patch: ProductPatch) -> StoreResult<Product>;

    async fn delete(&self, id: i64) -> StoreResult<()>;
}

/// In-memory catalog.
///
/// Used by tests, the demo seed binary, and as the default store when no
/// remote catalog is configured. Ids are assigned sequentially.
///
/// ## Usage
/// ```rust
/// use bazaar_catalog::{CatalogStore, InMemoryCatalog};
/// use bazaar_core::{Category, Money, Product};
///
/// # tokio_test_block(async {
/// let store = InMemoryCatalog::new();
/// let saved = store
///     .create(Product::new(0, "Basmati Rice 5kg", Category::Groceries, Money::from_major(1450)))
///     .await
///     .unwrap();
/// assert_eq!(saved.id, 1);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<BTreeMap<i64, Product>>,
    offline: AtomicBool,
    failing: RwLock<HashSet<i64>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding `products`, keyed by their ids.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products.into_iter().map(|p| (p.id, p)).collect();
        InMemoryCatalog {
            products: RwLock::new(products),
            ..Self::default()
        }
    }

    /// While offline, every call fails with `Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Makes updates to `id` fail with `Unavailable`.
    pub async fn fail_updates_for(&self, id: i64) {
        self.failing.write().await.insert(id);
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("catalog is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn get_all(&self) -> StoreResult<Vec<Product>> {
        self.check_online()?;
        let products: Vec<Product> = self.products.read().await.values().cloned().collect();
        debug!(count = products.len(), "Loaded catalog");
        Ok(products)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Product> {
        self.check_online()?;
        self.products
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, mut product: Product) -> StoreResult<Product> {
        self.check_online()?;
        let mut products = self.products.write().await;

        if product.id == 0 {
            product.id = products.keys().next_back().map_or(1, |last| last + 1);
        } else if products.contains_key(&product.id) {
            return Err(StoreError::Duplicate(product.id));
        }

        debug!(id = product.id, name = %product.name, "Creating product");
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i64, patch: ProductPatch) -> StoreResult<Product> {
        self.check_online()?;
        if self.failing.read().await.contains(&id) {
            return Err(StoreError::Unavailable(format!("update of product {id} timed out")));
        }

        let mut products = self.products.write().await;
        let product = products.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        debug!(id = %id, "Updating product");
        patch.apply(product);
        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.check_online()?;
        debug!(id = %id, "Deleting product");
        self.products
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
