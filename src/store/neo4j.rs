use async_trait::async_trait;
use neo4rs::{query, BoltNull, BoltType, ConfigBuilder, Graph, Query, Txn};
use serde_json::Value;
use tracing::{debug, info};

use super::model::*;
use super::repo::*;
use crate::config::Neo4jConfig;

pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    pub async fn connect(config: &Neo4jConfig) -> StoreResult<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_str())
            .db(config.database.as_str())
            .max_connections(config.max_connections)
            .fetch_size(config.fetch_size)
            .build()?;

        let graph = Graph::connect(neo4j_config)
            .await
            .map_err(|e| unavailable(&config.uri, e))?;

        info!("Connected to Neo4j at {} (database {})", config.uri, config.database);

        Ok(Self { graph })
    }
}

#[async_trait]
impl GraphStore for Neo4jStore {
    async fn begin_read(&self) -> StoreResult<Box<dyn ReadTransaction>> {
        let txn = self.graph.start_txn().await?;
        Ok(Box::new(Neo4jReadTransaction { txn }))
    }
}

struct Neo4jReadTransaction {
    txn: Txn,
}

#[async_trait]
impl ReadTransaction for Neo4jReadTransaction {
    async fn run(&mut self, graph_query: &GraphQuery) -> StoreResult<Vec<Record>> {
        debug!(params = graph_query.params.len(), "Running query: {}", graph_query.text.trim());

        let mut stream = self.txn.execute(to_bolt_query(graph_query)).await?;

        let mut records = Vec::new();
        while let Some(row) = stream.next(self.txn.handle()).await? {
            let mut record = Record::new();
            for column in graph_query.columns {
                let value: Value = row.get(column).map_err(|e| {
                    StoreError::Decode(format!("column {}: {}", column, e))
                })?;
                record.insert(column, value);
            }
            records.push(record);
        }

        Ok(records)
    }

    async fn close(self: Box<Self>) -> StoreResult<()> {
        // Nothing was written, so rolling back just ends the transaction.
        self.txn.rollback().await?;
        Ok(())
    }
}

fn unavailable(uri: &str, err: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable(format!("cannot connect to {}: {}", uri, err))
}

fn to_bolt_query(graph_query: &GraphQuery) -> Query {
    graph_query
        .params
        .iter()
        .fold(query(&graph_query.text), |q, (key, param)| {
            q.param(key, to_bolt(param))
        })
}

fn to_bolt(param: &Param) -> BoltType {
    match param {
        Param::Null => BoltType::Null(BoltNull),
        Param::Text(s) => BoltType::from(s.clone()),
        Param::Integer(i) => BoltType::from(*i),
        Param::TextList(list) => BoltType::from(list.clone()),
    }
}
