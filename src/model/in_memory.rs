//! InMemoryModelStore - HashMap-backed document store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{document_key, Model, ModelError, ModelStore, Versioned, WriteBatch, WriteKind};

/// Internal stored representation of a model.
struct StoredModel {
    bytes: Vec<u8>,
    version: u64,
}

/// In-memory model store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc: every clone
/// shares the same documents, so one handle opened at startup can be handed
/// to each service.
#[derive(Clone)]
pub struct InMemoryModelStore {
    storage: Arc<RwLock<HashMap<String, StoredModel>>>,
}

impl Default for InMemoryModelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryModelStore {
    /// Create a new empty model store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of documents across all collections.
    pub fn len(&self) -> Result<usize, ModelError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, ModelError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, StoredModel>>, ModelError> {
        self.storage
            .read()
            .map_err(|_| ModelError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, StoredModel>>, ModelError> {
        self.storage
            .write()
            .map_err(|_| ModelError::Storage("lock poisoned".into()))
    }
}

impl ModelStore for InMemoryModelStore {
    fn get_model<M: Model>(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError> {
        let key = document_key(M::COLLECTION, id);
        let storage = self.read()?;

        match storage.get(&key) {
            Some(stored) => {
                let data: M = serde_json::from_slice(&stored.bytes)?;
                Ok(Some(Versioned {
                    data,
                    version: stored.version,
                }))
            }
            None => Ok(None),
        }
    }

    fn save_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        let key = document_key(M::COLLECTION, model.id());
        let bytes = serde_json::to_vec(model)?;

        let mut storage = self.write()?;
        let new_version = storage.get(&key).map(|s| s.version + 1).unwrap_or(1);
        storage.insert(
            key,
            StoredModel {
                bytes,
                version: new_version,
            },
        );

        Ok(Versioned {
            data: model.clone(),
            version: new_version,
        })
    }

    fn insert_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        let key = document_key(M::COLLECTION, model.id());
        let bytes = serde_json::to_vec(model)?;

        let mut storage = self.write()?;
        if let Some(existing) = storage.get(&key) {
            return Err(ModelError::ConcurrencyConflict {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
                expected: 0,
                actual: existing.version,
            });
        }

        storage.insert(key, StoredModel { bytes, version: 1 });

        Ok(Versioned {
            data: model.clone(),
            version: 1,
        })
    }

    fn update_model<M: Model>(
        &self,
        model: &M,
        expected_version: u64,
    ) -> Result<Versioned<M>, ModelError> {
        let batch = WriteBatch::new().update(model, expected_version)?;
        self.commit(batch)?;

        Ok(Versioned {
            data: model.clone(),
            version: expected_version + 1,
        })
    }

    fn delete_model<M: Model>(&self, id: &str) -> Result<bool, ModelError> {
        let key = document_key(M::COLLECTION, id);
        let mut storage = self.write()?;
        Ok(storage.remove(&key).is_some())
    }

    fn find_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ModelError> {
        let storage = self.read()?;

        let prefix = format!("{}:", M::COLLECTION);
        let mut results = Vec::new();

        for (key, stored) in storage.iter() {
            if key.starts_with(&prefix) {
                let data: M = serde_json::from_slice(&stored.bytes)?;
                if predicate(&data) {
                    results.push(Versioned {
                        data,
                        version: stored.version,
                    });
                }
            }
        }

        Ok(results)
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), ModelError> {
        let mut storage = self.write()?;

        // Validate every write against the current state plus earlier writes
        // of the same batch before touching anything.
        let mut staged: HashMap<String, u64> = HashMap::new();
        let mut keyed = Vec::with_capacity(batch.len());
        for write in batch.into_writes() {
            let key = write.key();
            let current = staged
                .get(&key)
                .copied()
                .or_else(|| storage.get(&key).map(|s| s.version));

            let new_version = match (write.kind, current) {
                (WriteKind::Insert, None) => 1,
                (WriteKind::Insert, Some(actual)) => {
                    return Err(ModelError::ConcurrencyConflict {
                        collection: write.collection.to_string(),
                        id: write.id,
                        expected: 0,
                        actual,
                    });
                }
                (WriteKind::Update { .. }, None) => {
                    return Err(ModelError::NotFound {
                        collection: write.collection.to_string(),
                        id: write.id,
                    });
                }
                (WriteKind::Update { expected_version }, Some(actual)) => {
                    if actual != expected_version {
                        return Err(ModelError::ConcurrencyConflict {
                            collection: write.collection.to_string(),
                            id: write.id,
                            expected: expected_version,
                            actual,
                        });
                    }
                    actual + 1
                }
            };

            staged.insert(key.clone(), new_version);
            keyed.push((key, write.bytes, new_version));
        }

        for (key, bytes, version) in keyed {
            storage.insert(key, StoredModel { bytes, version });
        }

        Ok(())
    }
}
