use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::model::*;
use super::repo::*;

#[derive(Clone)]
enum Scripted {
    Rows(Vec<Record>),
    Fail(String),
    Hang,
}

#[derive(Default)]
struct State {
    script: Vec<(String, Scripted)>,
    queries: Vec<GraphQuery>,
    begun: usize,
    closed: usize,
    released: usize,
}

/// In-memory store that answers queries from a script. A query is matched
/// by the first scripted fragment its text contains; unmatched queries
/// return no rows.
#[derive(Clone, Default)]
pub(crate) struct ScriptedStore {
    state: Arc<Mutex<State>>,
}

impl ScriptedStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, fragment: &str, rows: Vec<Record>) -> &Self {
        self.push(fragment, Scripted::Rows(rows))
    }

    pub(crate) fn fail(&self, fragment: &str, message: &str) -> &Self {
        self.push(fragment, Scripted::Fail(message.to_string()))
    }

    pub(crate) fn hang(&self, fragment: &str) -> &Self {
        self.push(fragment, Scripted::Hang)
    }

    fn push(&self, fragment: &str, scripted: Scripted) -> &Self {
        let mut state = self.state.lock().unwrap();
        state.script.push((fragment.to_string(), scripted));
        drop(state);
        self
    }

    pub(crate) fn queries(&self) -> Vec<GraphQuery> {
        self.state.lock().unwrap().queries.clone()
    }

    pub(crate) fn begun(&self) -> usize {
        self.state.lock().unwrap().begun
    }

    pub(crate) fn closed(&self) -> usize {
        self.state.lock().unwrap().closed
    }

    pub(crate) fn released(&self) -> usize {
        self.state.lock().unwrap().released
    }
}

#[async_trait]
impl GraphStore for ScriptedStore {
    async fn begin_read(&self) -> StoreResult<Box<dyn ReadTransaction>> {
        self.state.lock().unwrap().begun += 1;
        Ok(Box::new(ScriptedTransaction {
            state: Arc::clone(&self.state),
        }))
    }
}

struct ScriptedTransaction {
    state: Arc<Mutex<State>>,
}

#[async_trait]
impl ReadTransaction for ScriptedTransaction {
    async fn run(&mut self, query: &GraphQuery) -> StoreResult<Vec<Record>> {
        let scripted = {
            let mut state = self.state.lock().unwrap();
            state.queries.push(query.clone());
            state
                .script
                .iter()
                .find(|(fragment, _)| query.text.contains(fragment.as_str()))
                .map(|(_, scripted)| scripted.clone())
        };

        match scripted {
            Some(Scripted::Rows(rows)) => Ok(rows),
            Some(Scripted::Fail(message)) => Err(StoreError::Unavailable(message)),
            Some(Scripted::Hang) => std::future::pending().await,
            None => Ok(Vec::new()),
        }
    }

    async fn close(self: Box<Self>) -> StoreResult<()> {
        self.state.lock().unwrap().closed += 1;
        Ok(())
    }
}

impl Drop for ScriptedTransaction {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.released += 1;
        }
    }
}
