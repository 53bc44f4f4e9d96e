use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::favorites::{self, FavoriteSet};
use super::{CatalogError, CatalogResult};
use crate::store::{GraphQuery, GraphStore, ReadTransaction, Record};

/// Everything one call reads from the store.
#[derive(Debug, Default)]
pub struct Fetched {
    pub favorites: FavoriteSet,
    pub records: Vec<Record>,
}

/// Runs one favorites lookup and one main query inside a single read
/// transaction, bounded by a timeout.
#[derive(Clone)]
pub struct CatalogReader {
    store: Arc<dyn GraphStore>,
    timeout: Duration,
}

impl CatalogReader {
    pub fn new(store: Arc<dyn GraphStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn fetch(&self, user_id: Option<&str>, query: &GraphQuery) -> CatalogResult<Fetched> {
        // If the timeout fires, the transaction future is dropped and the
        // boxed transaction releases its session on drop.
        match tokio::time::timeout(self.timeout, self.fetch_in_transaction(user_id, query)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout = ?self.timeout, "Read transaction timed out");
                Err(CatalogError::Cancelled(self.timeout))
            }
        }
    }

    async fn fetch_in_transaction(
        &self,
        user_id: Option<&str>,
        query: &GraphQuery,
    ) -> CatalogResult<Fetched> {
        let mut tx = self.store.begin_read().await?;

        let outcome = run(tx.as_mut(), user_id, query).await;

        if let Err(e) = tx.close().await {
            warn!(error = %e, "Failed to close read transaction");
        }

        let fetched = outcome?;
        debug!(rows = fetched.records.len(), "Read transaction finished");
        Ok(fetched)
    }
}

async fn run(
    tx: &mut dyn ReadTransaction,
    user_id: Option<&str>,
    query: &GraphQuery,
) -> CatalogResult<Fetched> {
    let favorites = favorites::resolve(tx, user_id).await?;
    let records = tx.run(query).await?;
    Ok(Fetched { favorites, records })
}
