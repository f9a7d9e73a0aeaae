use crate::models::SavedTemplate;
use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha1::{Digest, Sha1};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

const RECORD_EXT: &str = "yaml";
/// Longest encoded id used verbatim in a file name; longer ids are hashed
const MAX_ENCODED_ID_LEN: usize = 200;

/// Durable collection of saved templates, one YAML file per id.
///
/// There is no internal locking; concurrent writes to the same id must be
/// serialized by the caller.
#[derive(Clone, Debug)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    /// Open the collection at `dir`, creating it if missing
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create template store at {}", dir.display()))?;
        Ok(TemplateStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(record_file_name(id))
    }

    /// Insert or fully replace the record with `template.id`
    pub async fn save(&self, template: &SavedTemplate) -> Result<()> {
        let path = self.record_path(&template.id);
        let tmp = path.with_extension("tmp");
        let content = serde_yaml::to_string(template)?;

        fs::write(&tmp, content)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        tracing::info!(id = %template.id, name = %template.name, "Template saved");
        Ok(())
    }

    /// Every readable record, ordered by id.
    ///
    /// Files that are not template records are skipped and left on disk.
    pub async fn list_all(&self) -> Result<Vec<SavedTemplate>> {
        let mut templates = Vec::new();
        let mut entries = fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("Failed to read {}", self.dir.display()))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXT) {
                continue;
            }

            let content = match fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable record");
                    continue;
                }
            };

            match serde_yaml::from_str::<SavedTemplate>(&content) {
                Ok(template) => templates.push(template),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unrecognized record");
                }
            }
        }

        templates.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(templates)
    }

    /// Remove the record with `id`. Absent ids are a no-op.
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        let path = self.record_path(id);
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(id, "Template deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to delete {}", path.display())),
        }
    }
}

/// File name for `id`. The stem is never empty and stays well under the
/// usual 255-byte limit; the full id lives inside the record.
fn record_file_name(id: &str) -> String {
    let encoded = URL_SAFE_NO_PAD.encode(id);
    if encoded.len() <= MAX_ENCODED_ID_LEN {
        format!("t_{}.{}", encoded, RECORD_EXT)
    } else {
        let digest = Sha1::digest(id.as_bytes());
        format!("h_{}.{}", URL_SAFE_NO_PAD.encode(digest), RECORD_EXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeaderEntry, HttpMethod};
    use tempfile::tempdir;

    fn template(id: &str, name: &str) -> SavedTemplate {
        SavedTemplate {
            id: id.to_string(),
            name: name.to_string(),
            method: HttpMethod::POST,
            url: "https://api.example.com/users".to_string(),
            headers: vec![HeaderEntry::new("Accept", "application/json")],
            body: r#"{"name":"test"}"#.to_string(),
        }
    }

    #[tokio::test]
    async fn test_open_creates_missing_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = TemplateStore::open(&nested).await.unwrap();
        assert!(store.dir().is_dir());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_list_delete_round_trip() {
        let dir = tempdir().unwrap();
        let store = TemplateStore::open(dir.path()).await.unwrap();
        let t = template("1700000000000-0", "users");

        store.save(&t).await.unwrap();
        assert_eq!(store.list_all().await.unwrap(), vec![t.clone()]);

        store.delete_by_id(&t.id).await.unwrap();
        assert!(store.list_all().await.unwrap().iter().all(|x| x.id != t.id));
    }

    #[tokio::test]
    async fn test_save_overwrites_same_id() {
        let dir = tempdir().unwrap();
        let store = TemplateStore::open(dir.path()).await.unwrap();
        store.save(&template("7", "old")).await.unwrap();
        store.save(&template("7", "new")).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "new");
    }

    #[tokio::test]
    async fn test_names_need_not_be_unique() {
        let dir = tempdir().unwrap();
        let store = TemplateStore::open(dir.path()).await.unwrap();
        store.save(&template("b", "same")).await.unwrap();
        store.save(&template("a", "same")).await.unwrap();

        let ids: Vec<String> = store.list_all().await.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let dir = tempdir().unwrap();
        let store = TemplateStore::open(dir.path()).await.unwrap();
        store.save(&template("keep", "keep")).await.unwrap();

        store.delete_by_id("missing").await.unwrap();
        store.delete_by_id("missing").await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ids_with_path_characters() {
        let dir = tempdir().unwrap();
        let store = TemplateStore::open(dir.path()).await.unwrap();
        let t = template("../../etc/passwd", "sneaky");
        store.save(&t).await.unwrap();

        assert_eq!(store.list_all().await.unwrap(), vec![t.clone()]);
        store.delete_by_id(&t.id).await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unrecognized_records_left_untouched() {
        let dir = tempdir().unwrap();
        let store = TemplateStore::open(dir.path()).await.unwrap();
        let legacy = dir.path().join("legacy.yaml");
        let notes = dir.path().join("notes.txt");
        std::fs::write(&legacy, "title: old shape\nrequests: []\n").unwrap();
        std::fs::write(&notes, "hello").unwrap();
        store.save(&template("1", "current")).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "current");
        assert!(legacy.exists());
        assert!(notes.exists());
    }

    #[tokio::test]
    async fn test_empty_id_round_trip() {
        let dir = tempdir().unwrap();
        let store = TemplateStore::open(dir.path()).await.unwrap();
        let t = template("", "blank id");

        store.save(&t).await.unwrap();
        assert_eq!(store.list_all().await.unwrap(), vec![t.clone()]);

        store.delete_by_id("").await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_long_id_round_trip() {
        let dir = tempdir().unwrap();
        let store = TemplateStore::open(dir.path()).await.unwrap();
        let long = template(&"x".repeat(300), "long");
        let other = template(&format!("{}y", "x".repeat(299)), "other");

        store.save(&long).await.unwrap();
        store.save(&other).await.unwrap();
        assert_eq!(store.list_all().await.unwrap(), vec![long.clone(), other.clone()]);

        store.delete_by_id(&long.id).await.unwrap();
        assert_eq!(store.list_all().await.unwrap(), vec![other]);
    }

    #[test]
    fn test_record_file_name_is_bounded() {
        assert_eq!(record_file_name(""), "t_.yaml");
        assert_eq!(record_file_name("a"), "t_YQ.yaml");

        let long = record_file_name(&"é".repeat(1000));
        assert!(long.starts_with("h_"));
        assert!(long.len() < 64);
        assert_eq!(long, record_file_name(&"é".repeat(1000)));
    }
}
