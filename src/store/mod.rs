pub mod model;
pub mod neo4j;
pub mod repo;
#[cfg(test)]
pub(crate) mod testing;

pub use model::*;
pub use neo4j::Neo4jStore;
pub use repo::*;
