use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The minimal identity record persisted at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SessionRecord {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }

    /// Parse a serialized record. Extra fields written by other clients are ignored.
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Name shown on the profile header; empty when the record carries none.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed session record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Persistent storage for the serialized session record.
///
/// The store only moves opaque strings; parsing belongs to the reader so a
/// corrupt record can be treated as "no session" at the call site.
#[async_trait(?Send)]
pub trait SessionStore {
    /// Returns the serialized record, or `None` when nobody is signed in.
    async fn get(&self) -> Result<Option<String>, SessionError>;

    async fn set(&self, serialized: &str) -> Result<(), SessionError>;

    async fn clear(&self) -> Result<(), SessionError>;
}

/// Session store backed by a single JSON file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait(?Send)]
impl SessionStore for FileSessionStore {
    async fn get(&self) -> Result<Option<String>, SessionError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(None),
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, serialized: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serialized).await?;
        tracing::debug!(path = %self.path.display(), "session record written");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Read and parse the stored session, treating a corrupt record as signed out.
pub async fn current_session(store: &dyn SessionStore) -> Option<SessionRecord> {
    let raw = match store.get().await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "could not read session record");
            return None;
        }
    };

    match SessionRecord::parse(&raw) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed session record");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_full_record() {
        let record = SessionRecord::parse(r#"{"id":"u1","name":"Ann"}"#).unwrap();
        assert_eq!(record.id, "u1");
        assert_eq!(record.display_name(), "Ann");
    }

    #[test]
    fn test_parse_record_without_name() {
        let record = SessionRecord::parse(r#"{"id":"u1"}"#).unwrap();
        assert_eq!(record.name, None);
        assert_eq!(record.display_name(), "");
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let record =
            SessionRecord::parse(r#"{"id":"u7","name":"Bo","email":"bo@example.com"}"#).unwrap();
        assert_eq!(record, SessionRecord::new("u7", Some("Bo".to_string())));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            SessionRecord::parse("not json"),
            Err(SessionError::Malformed(_))
        ));
        assert!(matches!(
            SessionRecord::parse(r#"{"name":"no id"}"#),
            Err(SessionError::Malformed(_))
        ));
    }

    #[test]
    fn test_to_json_omits_missing_name() {
        let json = SessionRecord::new("u1", None).to_json().unwrap();
        assert_eq!(json, r#"{"id":"u1"}"#);
    }

    #[tokio::test]
    async fn test_file_store_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));

        assert_eq!(store.get().await.unwrap(), None);

        store.set(r#"{"id":"u1","name":"Ann"}"#).await.unwrap();
        assert_eq!(
            store.get().await.unwrap().as_deref(),
            Some(r#"{"id":"u1","name":"Ann"}"#)
        );

        store.clear().await.unwrap();
        assert_eq!(store.get().await.unwrap(), None);

        // Clearing an absent record is not an error
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_current_session_treats_corrupt_record_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.set("{oops").await.unwrap();
        assert_eq!(current_session(&store).await, None);

        store.set(r#"{"id":"u2"}"#).await.unwrap();
        assert_eq!(
            current_session(&store).await,
            Some(SessionRecord::new("u2", None))
        );
    }

    proptest! {
        #[test]
        fn prop_nameless_record_displays_empty(id in "[a-z0-9]{1,12}", extra in "[a-z]{1,8}") {
            prop_assume!(extra != "id" && extra != "name");
            let raw = serde_json::json!({ "id": id.clone(), extra: 1 }).to_string();
            let record = SessionRecord::parse(&raw).unwrap();
            prop_assert_eq!(&record.id, &id);
            prop_assert_eq!(record.display_name(), "");
        }
    }
}
