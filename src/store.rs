//! Flat-file JSON document persistence.
//!
//! Each piece of application state lives in a single JSON document on disk
//! with an in-memory working copy. Writes overwrite the whole file; there is
//! no locking and no partial update. Seeding happens once, when a document is
//! opened and no file exists yet.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A JSON document on disk plus its in-memory working copy.
pub struct JsonDocument<T> {
    path: PathBuf,
    data: T,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Opens the document at `path`, loading its current contents. When no
    /// file exists yet the document is seeded with `default` and written out
    /// immediately, so a reopened document always round-trips.
    pub fn open(path: impl Into<PathBuf>, default: T) -> Result<Self, StoreError> {
        let path = path.into();
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Self {
                path,
                data: serde_json::from_str(&raw)?,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let doc = Self {
                    path,
                    data: default,
                };
                doc.write()?;
                Ok(doc)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Re-reads the document from disk, replacing the in-memory copy.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        let raw = fs::read_to_string(&self.path)?;
        self.data = serde_json::from_str(&raw)?;
        Ok(())
    }

    /// Flushes the in-memory copy to disk, pretty-printed, overwriting
    /// whatever was there.
    pub fn write(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut raw = serde_json::to_string_pretty(&self.data)?;
        raw.push('\n');
        fs::write(&self.path, raw)?;
        Ok(())
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestDoc {
        items: Vec<String>,
        count: u32,
    }

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("kaulvote-store-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("doc.json")
    }

    fn seed() -> TestDoc {
        TestDoc {
            items: vec!["one".to_string()],
            count: 1,
        }
    }

    #[test]
    fn open_seeds_a_missing_document() {
        let path = scratch_path("seed");
        let doc = JsonDocument::open(&path, seed()).unwrap();

        assert_eq!(*doc.data(), seed());
        assert!(path.exists());
    }

    #[test]
    fn open_keeps_an_existing_document() {
        let path = scratch_path("existing");
        let mut doc = JsonDocument::open(&path, seed()).unwrap();
        doc.data_mut().count = 42;
        doc.write().unwrap();

        // A second open with a fresh default must not re-seed.
        let reopened = JsonDocument::open(&path, seed()).unwrap();
        assert_eq!(reopened.data().count, 42);
    }

    #[test]
    fn write_then_reload_round_trips() {
        let path = scratch_path("roundtrip");
        let mut doc = JsonDocument::open(&path, seed()).unwrap();
        doc.data_mut().items.push("two".to_string());
        doc.data_mut().count = 2;
        doc.write().unwrap();

        let mut other: JsonDocument<TestDoc> = JsonDocument::open(&path, seed()).unwrap();
        other.reload().unwrap();
        assert_eq!(*other.data(), *doc.data());
    }

    #[test]
    fn malformed_document_is_a_serialization_error() {
        let path = scratch_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let result: Result<JsonDocument<TestDoc>, _> = JsonDocument::open(&path, seed());
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
