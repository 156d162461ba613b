//! WriteBatch - queue several document writes for one atomic commit.
//!
//! Models are serialized as they are queued, so a batch that reaches
//! `ModelStore::commit` can no longer fail on serialization halfway through.

use super::{document_key, Model, ModelError};

/// What a queued write does to its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// Create the document. Fails if it already exists.
    Insert,
    /// Replace the document, which must currently be at `expected_version`.
    Update { expected_version: u64 },
}

/// A single queued write (type-erased).
#[derive(Debug, Clone)]
pub struct BatchWrite {
    pub collection: &'static str,
    pub id: String,
    pub bytes: Vec<u8>,
    pub kind: WriteKind,
}

impl BatchWrite {
    /// Storage key: `"COLLECTION:id"`.
    pub fn key(&self) -> String {
        document_key(self.collection, &self.id)
    }
}

/// Builder for chaining multiple writes into a single atomic commit.
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    writes: Vec<BatchWrite>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the insert of a new document.
    pub fn insert<M: Model>(self, model: &M) -> Result<Self, ModelError> {
        self.push(model, WriteKind::Insert)
    }

    /// Queue a versioned update of an existing document.
    pub fn update<M: Model>(self, model: &M, expected_version: u64) -> Result<Self, ModelError> {
        self.push(model, WriteKind::Update { expected_version })
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn writes(&self) -> &[BatchWrite] {
        &self.writes
    }

    pub fn into_writes(self) -> Vec<BatchWrite> {
        self.writes
    }

    fn push<M: Model>(mut self, model: &M, kind: WriteKind) -> Result<Self, ModelError> {
        let bytes = serde_json::to_vec(model)?;
        self.writes.push(BatchWrite {
            collection: M::COLLECTION,
            id: model.id().to_string(),
            bytes,
            kind,
        });
        Ok(self)
    }
}
