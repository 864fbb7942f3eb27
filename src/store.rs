use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::record::ClassRecord;

/// The schedule file a run keeps overwriting with its full record list.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Prepare to write `path`, creating its parent directory if needed.
    /// The file itself is not touched until the first [`save`](Self::save).
    pub async fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        info!(path = %path.display(), "output file will be saved here");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file with `records` as a pretty-printed JSON array.
    ///
    /// The JSON goes to a sibling `.tmp` file first and is renamed into
    /// place, so readers only ever see a complete array.
    pub async fn save(&self, records: &[ClassRecord]) -> Result<()> {
        let json = render(records)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Two-space indented JSON array, keys in declaration order.
pub fn render(records: &[ClassRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ClassFields;

    fn record(id: u64) -> ClassRecord {
        ClassRecord::new(
            id,
            ClassFields {
                building: "Amador Hall".into(),
                room: "203".into(),
                days: "TR".into(),
                start_time: "0900".into(),
                end_time: "1015".into(),
            },
        )
    }

    #[test]
    fn renders_stable_key_order_and_indentation() {
        let json = render(&[record(1)]).unwrap();
        let expected = r#"[
  {
    "id": 1,
    "building": "Amador Hall",
    "room": "203",
    "days": "TR",
    "start_time": "0900",
    "end_time": "1015",
    "time_range": "0900 - 1015"
  }
]"#;
        assert_eq!(json, expected);
        assert_eq!(render(&[record(1)]).unwrap(), json);
    }

    #[tokio::test]
    async fn save_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("fall-2025_schedule.json");
        let store = SnapshotStore::create(&path).await.unwrap();
        assert!(path.parent().unwrap().is_dir());
        assert!(!path.exists());

        store.save(&[record(1), record(2)]).await.unwrap();
        store.save(&[record(1)]).await.unwrap();

        let saved: Vec<ClassRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, vec![record(1)]);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn empty_snapshot_is_an_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::create(dir.path().join("s.json")).await.unwrap();
        store.save(&[]).await.unwrap();
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[]");
    }
}
