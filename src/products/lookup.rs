//! Barcode lookup: exact-match read from the local product cache, with a
//! single upstream fetch and write-through on miss. Cached rows are
//! write-once — never refreshed, expired, or deleted — so a second lookup
//! for the same barcode always serves the stored copy.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::search::provider::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Neither the cache nor the upstream knows the barcode. A normal
    /// outcome, not a fault.
    #[error("product not found")]
    NotFound,

    /// The one upstream fetch failed. No retry, no fallback exists for this
    /// path.
    #[error("upstream lookup failed: {0}")]
    Upstream(#[from] ProviderError),

    #[error(transparent)]
    Db(#[from] anyhow::Error),
}

/// A freshly normalized product, not yet persisted.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub barcode: String,
    pub name: String,
    pub brand: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: f64,
    pub serving_size: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CachedProduct {
    pub barcode: String,
    pub name: String,
    pub brand: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: f64,
    pub serving_size: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupSource {
    Cache,
    Api,
}

#[derive(Debug)]
pub struct Found {
    pub source: LookupSource,
    pub product: CachedProduct,
}

/// Key-value-by-barcode persistence used only by the lookup path.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find(&self, barcode: &str) -> anyhow::Result<Option<CachedProduct>>;

    /// Write-once insert. Returns `None` when another writer got there
    /// first; the caller re-reads and treats that as a cache hit.
    async fn insert(&self, product: NewProduct) -> anyhow::Result<Option<CachedProduct>>;
}

/// The single upstream capable of exact-barcode product fetches.
#[async_trait]
pub trait ProductFetcher: Send + Sync {
    async fn fetch_by_barcode(&self, barcode: &str) -> Result<Option<NewProduct>, ProviderError>;
}

pub struct ProductLookup {
    store: Arc<dyn ProductStore>,
    fetcher: Arc<dyn ProductFetcher>,
}

impl ProductLookup {
    pub fn new(store: Arc<dyn ProductStore>, fetcher: Arc<dyn ProductFetcher>) -> Self {
        Self { store, fetcher }
    }

    pub async fn lookup(&self, barcode: &str) -> Result<Found, LookupError> {
        if let Some(product) = self.store.find(barcode).await? {
            debug!(%barcode, "cache hit");
            return Ok(Found {
                source: LookupSource::Cache,
                product,
            });
        }

        let Some(fetched) = self.fetcher.fetch_by_barcode(barcode).await? else {
            return Err(LookupError::NotFound);
        };

        match self.store.insert(fetched).await? {
            Some(product) => {
                info!(%barcode, name = %product.name, "cached new product");
                Ok(Found {
                    source: LookupSource::Api,
                    product,
                })
            }
            None => {
                // lost the first-write race; the stored copy wins
                let product = self
                    .store
                    .find(barcode)
                    .await?
                    .ok_or(LookupError::NotFound)?;
                Ok(Found {
                    source: LookupSource::Cache,
                    product,
                })
            }
        }
    }
}

pub struct PgProductStore {
    db: PgPool,
}

impl PgProductStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn find(&self, barcode: &str) -> anyhow::Result<Option<CachedProduct>> {
        let product = sqlx::query_as::<_, CachedProduct>(
            r#"
            SELECT barcode, name, brand, calories, protein, carbs, fat, sugar,
                   serving_size, created_at
            FROM products
            WHERE barcode = $1
            "#,
        )
        .bind(barcode)
        .fetch_optional(&self.db)
        .await?;
        Ok(product)
    }

    async fn insert(&self, product: NewProduct) -> anyhow::Result<Option<CachedProduct>> {
        let row = sqlx::query_as::<_, CachedProduct>(
            r#"
            INSERT INTO products (barcode, name, brand, calories, protein, carbs, fat, sugar, serving_size)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (barcode) DO NOTHING
            RETURNING barcode, name, brand, calories, protein, carbs, fat, sugar,
                      serving_size, created_at
            "#,
        )
        .bind(&product.barcode)
        .bind(&product.name)
        .bind(&product.brand)
        .bind(product.calories)
        .bind(product.protein)
        .bind(product.carbs)
        .bind(product.fat)
        .bind(product.sugar)
        .bind(&product.serving_size)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<HashMap<String, CachedProduct>>,
        inserts: AtomicUsize,
    }

    #[async_trait]
    impl ProductStore for MemoryStore {
        async fn find(&self, barcode: &str) -> anyhow::Result<Option<CachedProduct>> {
            Ok(self.rows.lock().unwrap().get(barcode).cloned())
        }

        async fn insert(&self, product: NewProduct) -> anyhow::Result<Option<CachedProduct>> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows.lock().unwrap();
            if rows.contains_key(&product.barcode) {
                return Ok(None);
            }
            let row = CachedProduct {
                barcode: product.barcode.clone(),
                name: product.name,
                brand: product.brand,
                calories: product.calories,
                protein: product.protein,
                carbs: product.carbs,
                fat: product.fat,
                sugar: product.sugar,
                serving_size: product.serving_size,
                created_at: OffsetDateTime::now_utc(),
            };
            rows.insert(product.barcode, row.clone());
            Ok(Some(row))
        }
    }

    struct ScriptedFetcher {
        product: Option<NewProduct>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn returning(product: Option<NewProduct>) -> Self {
            Self {
                product,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                product: None,
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ProductFetcher for ScriptedFetcher {
        async fn fetch_by_barcode(
            &self,
            _barcode: &str,
        ) -> Result<Option<NewProduct>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ProviderError::MissingCredentials {
                    provider: "scripted",
                });
            }
            Ok(self.product.clone())
        }
    }

    fn chocolate() -> NewProduct {
        NewProduct {
            barcode: "4000417025005".into(),
            name: "Whole Hazelnuts Chocolate".into(),
            brand: "Ritter Sport".into(),
            calories: 539.0,
            protein: 8.8,
            carbs: 49.0,
            fat: 34.0,
            sugar: 46.0,
            serving_size: "100g".into(),
        }
    }

    #[tokio::test]
    async fn miss_fetches_once_then_serves_from_cache() {
        let store = Arc::new(MemoryStore::default());
        let fetcher = Arc::new(ScriptedFetcher::returning(Some(chocolate())));
        let lookup = ProductLookup::new(store.clone(), fetcher.clone());

        let first = lookup.lookup("4000417025005").await.unwrap();
        assert_eq!(first.source, LookupSource::Api);
        assert_eq!(first.product.name, "Whole Hazelnuts Chocolate");

        let second = lookup.lookup("4000417025005").await.unwrap();
        assert_eq!(second.source, LookupSource::Cache);

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_everywhere_is_not_found_and_writes_nothing() {
        let store = Arc::new(MemoryStore::default());
        let fetcher = Arc::new(ScriptedFetcher::returning(None));
        let lookup = ProductLookup::new(store.clone(), fetcher);

        let err = lookup.lookup("0000000000000").await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound));
        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_propagates() {
        let store = Arc::new(MemoryStore::default());
        let fetcher = Arc::new(ScriptedFetcher::failing());
        let lookup = ProductLookup::new(store, fetcher);

        let err = lookup.lookup("4000417025005").await.unwrap_err();
        assert!(matches!(err, LookupError::Upstream(_)));
    }

    #[tokio::test]
    async fn losing_the_first_write_race_reads_back_the_winner() {
        use std::sync::atomic::AtomicBool;

        // the winner commits between our initial miss and our insert
        struct RacingStore {
            inner: MemoryStore,
            missed_once: AtomicBool,
        }

        #[async_trait]
        impl ProductStore for RacingStore {
            async fn find(&self, barcode: &str) -> anyhow::Result<Option<CachedProduct>> {
                if !self.missed_once.swap(true, Ordering::SeqCst) {
                    return Ok(None);
                }
                self.inner.find(barcode).await
            }

            async fn insert(&self, product: NewProduct) -> anyhow::Result<Option<CachedProduct>> {
                self.inner.insert(product).await
            }
        }

        let store = RacingStore {
            inner: MemoryStore::default(),
            missed_once: AtomicBool::new(false),
        };
        store.inner.insert(chocolate()).await.unwrap();

        let fetcher = Arc::new(ScriptedFetcher::returning(Some(chocolate())));
        let lookup = ProductLookup::new(Arc::new(store), fetcher);

        let found = lookup.lookup("4000417025005").await.unwrap();
        assert_eq!(found.source, LookupSource::Cache);
        assert_eq!(found.product.brand, "Ritter Sport");
    }
}
