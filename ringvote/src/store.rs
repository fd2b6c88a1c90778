use crate::*;
use std::collections::BTreeMap;

/// Key/value adapter over the host ledger's world state.
///
/// One operation executes as a single ledger-serialized transaction: reads
/// observe writes made earlier in the same invocation, and all writes commit
/// atomically when the invocation succeeds. Concurrent operations touching
/// the same keys are serialized by the host's ordering layer.
pub trait StateStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error>;

    /// Write `value` under `key`.
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), Error>;
}

// State keys, matching the deployed ledger layout.
pub(crate) fn topic_key(topic: &str) -> String {
    topic.to_string()
}

pub(crate) fn public_key_key(topic: &str, uid: &str) -> String {
    format!("{}_PUBLICKEY:{}", topic, uid)
}

pub(crate) fn key_ring_key(topic: &str) -> String {
    format!("{}_KEYRING", topic)
}

pub(crate) fn link_tag_key(topic: &str) -> String {
    format!("{}_HARRAY", topic)
}

pub(crate) fn submission_key(topic: &str) -> String {
    format!("{}_SUBMISSION", topic)
}

/// A simple store that uses an in-memory BTreeMap
#[derive(Default, Clone)]
pub struct MemStore {
    inner: BTreeMap<String, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        MemStore::default()
    }
}

impl StateStore for MemStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        Ok(self.inner.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), Error> {
        self.inner.insert(key.to_string(), value);
        Ok(())
    }
}
