#![deny(missing_docs)]
//! In-memory implementations of moogt-core's persistence traits.
//!
//! `HashMap`s behind `tokio::sync::RwLock`, with the optimistic version
//! check performed under the write lock. Suitable for testing and
//! single-process use; a SQL adapter in the surrounding application would
//! take the same traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use moogt_core::{
    ArgumentId, ArgumentKind, ArgumentPayload, ArgumentRecord, ArgumentStore, MoogtId,
    MoogtRepository, MoogtState, RepoError, StoreError, UserId,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// In-memory moogt repository + argument store.
///
/// One value implements both traits so a test harness can hand the same
/// `Arc` to the runtime twice.
#[derive(Default)]
pub struct MemoryStore {
    moogts: RwLock<HashMap<MoogtId, MoogtState>>,
    arguments: RwLock<HashMap<MoogtId, Vec<ArgumentRecord>>>,
    next_argument: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_argument_id(&self) -> ArgumentId {
        let n = self.next_argument.fetch_add(1, Ordering::SeqCst) + 1;
        ArgumentId::new(format!("arg-{n}"))
    }
}

#[async_trait]
impl MoogtRepository for MemoryStore {
    async fn insert(&self, state: MoogtState) -> Result<(), RepoError> {
        let mut moogts = self.moogts.write().await;
        if moogts.contains_key(&state.id) {
            return Err(RepoError::Duplicate(state.id.clone()));
        }
        moogts.insert(state.id.clone(), state);
        Ok(())
    }

    async fn load(&self, id: &MoogtId) -> Result<MoogtState, RepoError> {
        let moogts = self.moogts.read().await;
        moogts
            .get(id)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(id.clone()))
    }

    async fn save(&self, state: &MoogtState, expected_version: u64) -> Result<u64, RepoError> {
        let mut moogts = self.moogts.write().await;
        let current = moogts
            .get(&state.id)
            .ok_or_else(|| RepoError::NotFound(state.id.clone()))?;
        if current.version != expected_version {
            return Err(RepoError::VersionConflict {
                expected: expected_version,
                actual: current.version,
            });
        }
        let mut next = state.clone();
        next.version = expected_version + 1;
        let new_version = next.version;
        moogts.insert(state.id.clone(), next);
        Ok(new_version)
    }
}

#[async_trait]
impl ArgumentStore for MemoryStore {
    async fn create(
        &self,
        moogt: &MoogtId,
        author: &UserId,
        kind: ArgumentKind,
        payload: ArgumentPayload,
        at: DateTime<Utc>,
    ) -> Result<ArgumentId, StoreError> {
        let id = self.next_argument_id();
        let record = ArgumentRecord::new(
            id.clone(),
            moogt.clone(),
            author.clone(),
            kind,
            payload,
            at,
        );
        let mut arguments = self.arguments.write().await;
        arguments.entry(moogt.clone()).or_default().push(record);
        Ok(id)
    }

    async fn latest_kind(&self, moogt: &MoogtId) -> Result<Option<ArgumentKind>, StoreError> {
        let arguments = self.arguments.read().await;
        Ok(arguments
            .get(moogt)
            .and_then(|list| list.last())
            .map(|record| record.kind))
    }

    async fn has_concluding_by(
        &self,
        moogt: &MoogtId,
        author: &UserId,
    ) -> Result<bool, StoreError> {
        let arguments = self.arguments.read().await;
        Ok(arguments.get(moogt).is_some_and(|list| {
            list.iter()
                .any(|r| r.kind == ArgumentKind::Concluding && r.author == *author)
        }))
    }

    async fn list(&self, moogt: &MoogtId) -> Result<Vec<ArgumentRecord>, StoreError> {
        let arguments = self.arguments.read().await;
        Ok(arguments.get(moogt).cloned().unwrap_or_default())
    }
}
