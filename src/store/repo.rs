use async_trait::async_trait;

use super::model::*;

/// A property-graph store that hands out read-only transactions.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn begin_read(&self) -> StoreResult<Box<dyn ReadTransaction>>;
}

/// A read transaction. Every query run through one handle sees the same
/// snapshot. Dropping the handle without calling `close` still releases the
/// underlying session.
#[async_trait]
pub trait ReadTransaction: Send {
    async fn run(&mut self, query: &GraphQuery) -> StoreResult<Vec<Record>>;
    async fn close(self: Box<Self>) -> StoreResult<()>;
}
