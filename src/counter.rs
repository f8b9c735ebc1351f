//! Legacy increment-counter service kept from the first prototype.

use std::collections::HashMap;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::store::{JsonDocument, StoreError};

/// Root of the counters document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountersDoc {
    pub counters: HashMap<String, u64>,
}

/// Named counters backed by a single JSON document.
pub struct CounterStore {
    doc: JsonDocument<CountersDoc>,
}

impl CounterStore {
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            doc: JsonDocument::open(data_dir.join("counters.json"), CountersDoc::default())?,
        })
    }

    /// Bumps the named counter (created at zero on first use) and persists,
    /// returning the new value.
    pub fn increment(&mut self, counter_id: &str) -> Result<u64, StoreError> {
        let count = {
            let counter = self
                .doc
                .data_mut()
                .counters
                .entry(counter_id.to_string())
                .or_insert(0);
            *counter += 1;
            *counter
        };
        self.doc.write()?;
        info!("Counter {counter_id} incremented to {count}");
        Ok(count)
    }

    pub fn get(&self, counter_id: &str) -> u64 {
        self.doc
            .data()
            .counters
            .get(counter_id)
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("kaulvote-counter-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn increments_from_zero() {
        let mut counters = CounterStore::open(&scratch_dir("zero")).unwrap();
        assert_eq!(counters.get("demo"), 0);
        assert_eq!(counters.increment("demo").unwrap(), 1);
        assert_eq!(counters.increment("demo").unwrap(), 2);
        assert_eq!(counters.get("demo"), 2);
    }

    #[test]
    fn counters_are_independent() {
        let mut counters = CounterStore::open(&scratch_dir("independent")).unwrap();
        counters.increment("a").unwrap();
        counters.increment("a").unwrap();
        counters.increment("b").unwrap();
        assert_eq!(counters.get("a"), 2);
        assert_eq!(counters.get("b"), 1);
    }

    #[test]
    fn counts_survive_a_reopen() {
        let dir = scratch_dir("reopen");
        {
            let mut counters = CounterStore::open(&dir).unwrap();
            counters.increment("demo").unwrap();
        }
        let mut counters = CounterStore::open(&dir).unwrap();
        assert_eq!(counters.increment("demo").unwrap(), 2);
    }
}
