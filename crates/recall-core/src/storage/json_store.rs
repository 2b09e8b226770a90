use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::CoreError;
use crate::model::{default_knowledge_base, now_timestamp, KnowledgeBase};

const EPISODE_STRING_FIELDS: [&str; 5] = ["id", "title", "content", "category", "created"];
const METADATA_STRING_FIELDS: [&str; 2] = ["created", "description"];

/// A knowledge base persisted as one pretty-printed JSON document.
///
/// Saves overwrite the whole file in place. There is no locking: concurrent
/// writers race and the last save wins.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the document, seeding and persisting the default set when the file is absent.
    pub fn load(&self) -> Result<KnowledgeBase, CoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => self.parse(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    path = %self.path.display(),
                    "no knowledge base found, seeding defaults"
                );
                self.reseed()
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the document with the default seed set.
    pub fn reseed(&self) -> Result<KnowledgeBase, CoreError> {
        let kb = default_knowledge_base(&now_timestamp());
        self.save(&kb)?;
        Ok(kb)
    }

    /// Serialize the knowledge base verbatim, replacing the previous file content.
    pub fn save(&self, kb: &KnowledgeBase) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(kb)?;
        fs::write(&self.path, json)?;
        tracing::debug!(
            path = %self.path.display(),
            episodes = kb.len(),
            "knowledge base saved"
        );
        Ok(())
    }

    /// Parse and validate a document read from this store's path.
    pub fn parse(&self, raw: &str) -> Result<KnowledgeBase, CoreError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| CoreError::storage(&self.path, format!("invalid JSON: {e}")))?;
        check_schema(&value).map_err(|reason| CoreError::storage(&self.path, reason))?;

        let kb: KnowledgeBase = serde_json::from_value(value)
            .map_err(|e| CoreError::storage(&self.path, e.to_string()))?;
        for episode in &kb.episodes {
            episode
                .validate()
                .map_err(|e| CoreError::storage(&self.path, e.to_string()))?;
        }
        tracing::debug!(path = %self.path.display(), episodes = kb.len(), "knowledge base loaded");
        Ok(kb)
    }
}

/// Structural check run before typed deserialization, so failures name the offending part.
fn check_schema(value: &Value) -> Result<(), String> {
    let root = value
        .as_object()
        .ok_or_else(|| "root must be a JSON object".to_string())?;

    let metadata = match root.get("metadata") {
        Some(Value::Object(fields)) => fields,
        Some(_) => return Err("`metadata` must be an object".into()),
        None => return Err("missing `metadata` field".into()),
    };
    for field in METADATA_STRING_FIELDS {
        if !metadata.get(field).is_some_and(Value::is_string) {
            return Err(format!("`metadata` needs a string `{field}` field"));
        }
    }
    if !metadata.get("total_episodes").is_some_and(Value::is_u64) {
        return Err("`metadata` needs a non-negative integer `total_episodes` field".into());
    }

    let episodes = match root.get("episodes") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err("`episodes` must be an array".into()),
        None => return Err("missing `episodes` field".into()),
    };

    for (i, item) in episodes.iter().enumerate() {
        let episode = item
            .as_object()
            .ok_or_else(|| format!("episode #{} is not an object", i + 1))?;
        for field in EPISODE_STRING_FIELDS {
            if !episode.get(field).is_some_and(Value::is_string) {
                return Err(format!(
                    "episode #{} needs a string `{field}` field",
                    i + 1
                ));
            }
        }
        let entities_ok = episode
            .get("entities")
            .and_then(Value::as_array)
            .is_some_and(|items| items.iter().all(Value::is_string));
        if !entities_ok {
            return Err(format!(
                "episode #{} needs an `entities` array of strings",
                i + 1
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Episode;
    use tempfile::TempDir;

    fn store_in(tmp: &TempDir) -> JsonStore {
        JsonStore::new(tmp.path().join("data").join("knowledge.json"))
    }

    #[test]
    fn test_missing_file_is_seeded_once() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        assert!(!store.exists());

        let kb = store.load().unwrap();
        assert_eq!(kb.len(), 6);
        assert!(store.exists());

        let on_disk = fs::read_to_string(store.path()).unwrap();
        let again = store.load().unwrap();
        assert_eq!(again, kb);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), on_disk);
    }

    #[test]
    fn test_save_of_load_is_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.load().unwrap();
        let before = fs::read(store.path()).unwrap();

        let kb = store.load().unwrap();
        store.save(&kb).unwrap();
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_foreign_document_round_trips() {
        // indent=2, naive timestamps, no trailing newline
        let raw = r#"{
  "metadata": {
    "created": "2025-09-25T10:11:12.123456",
    "version": "1.0",
    "description": "Imported",
    "total_episodes": 9
  },
  "episodes": [
    {
      "id": "a",
      "title": "Ünïcode title",
      "content": "Body",
      "entities": [],
      "category": "general",
      "created": "2025-09-25T10:11:12.123456"
    }
  ]
}"#;
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), raw).unwrap();

        let kb = store.load().unwrap();
        assert_eq!(kb.metadata.total_episodes, 9);
        store.save(&kb).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), raw);
    }

    #[test]
    fn test_extra_fields_keep_their_order() {
        let raw = r#"{
  "metadata": {
    "created": "2025-09-25T10:11:12",
    "description": "Imported",
    "total_episodes": 1,
    "updated_by": "ingest",
    "last_updated": "2025-09-26"
  },
  "episodes": [
    {
      "id": "a",
      "title": "Title",
      "content": "Body",
      "entities": [
        "Agent"
      ],
      "category": "general",
      "created": "2025-09-25T10:11:12",
      "source": "import",
      "author": "script",
      "confidence": 0.5
    }
  ],
  "schema": "v1"
}"#;
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), raw).unwrap();

        let kb = store.load().unwrap();
        let keys: Vec<&str> = kb.metadata.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, ["updated_by", "last_updated"]);
        store.save(&kb).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), raw);
    }

    #[test]
    fn test_added_episode_persists_after_save() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        let mut kb = store.load().unwrap();
        kb.add_episode(Episode::new("Deploys", "Use git tags", "preferences", Vec::new()).unwrap())
            .unwrap();

        // in-memory only until saved
        assert_eq!(store.load().unwrap().len(), 6);
        store.save(&kb).unwrap();
        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.len(), 7);
        assert_eq!(reloaded.episodes[6].title, "Deploys");
    }

    fn assert_storage_error(raw: &str, needle: &str) {
        let store = JsonStore::new("kb.json");
        match store.parse(raw) {
            Err(CoreError::Storage { reason, .. }) => {
                assert!(reason.contains(needle), "{reason} should mention {needle}")
            }
            other => panic!("expected storage error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        assert_storage_error("{not json", "invalid JSON");
        assert_storage_error("[1, 2]", "root must be a JSON object");
        assert_storage_error(r#"{"metadata": {}}"#, "missing `episodes`");
        assert_storage_error(r#"{"episodes": []}"#, "missing `metadata`");
        assert_storage_error(r#"{"metadata": [], "episodes": []}"#, "must be an object");

        let meta = r#""metadata": {"created": "d", "description": "x", "total_episodes": 1}"#;
        assert_storage_error(&format!(r#"{{{meta}, "episodes": {{}}}}"#), "must be an array");
        assert_storage_error(
            &format!(r#"{{{meta}, "episodes": [{{"id": "a"}}]}}"#),
            "string `title`",
        );
        assert_storage_error(
            &format!(
                r#"{{{meta}, "episodes": [{{"id": "a", "title": "t", "content": "c", "category": "x", "created": "d", "entities": [1]}}]}}"#
            ),
            "entities",
        );
    }

    #[test]
    fn test_incomplete_metadata_names_the_field() {
        assert_storage_error(r#"{"metadata": {}, "episodes": []}"#, "string `created`");
        assert_storage_error(
            r#"{"metadata": {"created": "d"}, "episodes": []}"#,
            "string `description`",
        );
        assert_storage_error(
            r#"{"metadata": {"created": "d", "description": "x"}, "episodes": []}"#,
            "`total_episodes`",
        );
        assert_storage_error(
            r#"{"metadata": {"created": "d", "description": "x", "total_episodes": -1}, "episodes": []}"#,
            "non-negative integer",
        );
    }

    #[test]
    fn test_blank_content_is_a_storage_error() {
        let raw = r#"{"metadata": {"created": "d", "description": "x", "total_episodes": 1},
            "episodes": [{"id": "a", "title": "t", "content": "  ", "category": "x", "created": "d", "entities": []}]}"#;
        assert_storage_error(raw, "empty content");
    }

    #[test]
    fn test_malformed_file_is_not_overwritten() {
        let tmp = TempDir::new().unwrap();
        let store = JsonStore::new(tmp.path().join("kb.json"));
        fs::write(store.path(), "{broken").unwrap();
        assert!(matches!(store.load(), Err(CoreError::Storage { .. })));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{broken");
    }
}
