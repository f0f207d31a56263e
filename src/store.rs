// 💾 Record Store - Whole-set JSON persistence
// Loaded once at startup, appended in memory, rewritten in full after every append

use crate::record::Record;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store bound to `path` without touching the filesystem
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        RecordStore {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Load the record set from `path`
    ///
    /// A missing file is a normal first start and yields an empty store.
    /// A file that exists but cannot be read or parsed is an error: the
    /// caller must not carry on as if the set were empty.
    pub fn load<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("{:?} not found, starting with an empty record set", path);
                return Ok(RecordStore::new(path));
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read data file: {:?}", path));
            }
        };

        let records: Vec<Record> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse data file: {:?}", path))?;

        log::info!("Loaded {} records from {:?}", records.len(), path);

        Ok(RecordStore { path, records })
    }

    /// Rewrite the whole record set to disk
    ///
    /// The JSON goes to a sibling temp file in one write and is renamed over
    /// the target, so a reader sees either the old or the new set.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)
            .context("Failed to serialize records")?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write data file: {:?}", tmp_path))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace data file: {:?}", self.path))?;

        log::debug!("Saved {} records to {:?}", self.records.len(), self.path);

        Ok(())
    }

    /// Append a record in memory (call `save` to persist)
    pub fn append(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Most recently appended record
    pub fn latest(&self) -> Option<&Record> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmi::BmiCategory;
    use tempfile::TempDir;

    fn data_path(dir: &TempDir) -> PathBuf {
        dir.path().join("users_data.json")
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::load(data_path(&dir)).unwrap();

        assert!(store.is_empty());
        assert!(store.latest().is_none());
        assert!(!data_path(&dir).exists(), "load must not create the file");
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();

        for content in ["", "{not json", "[{\"name\": \"x\"}]", "{}", "null"] {
            fs::write(data_path(&dir), content).unwrap();
            assert!(
                RecordStore::load(data_path(&dir)).is_err(),
                "content {:?} should be rejected",
                content
            );
        }
    }

    #[test]
    fn test_unknown_category_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(
            data_path(&dir),
            r#"[{"name":"a","weight_kg":1.0,"height_m":1.0,"bmi":1.0,"category":"Skinny"}]"#,
        )
        .unwrap();

        assert!(RecordStore::load(data_path(&dir)).is_err());
    }

    #[test]
    fn test_inconsistent_row_is_error() {
        let dir = TempDir::new().unwrap();

        let rows = [
            // bmi disagrees with 70 / 1.75²
            r#"[{"name":"a","weight_kg":70.0,"height_m":1.75,"bmi":99.0,"category":"Underweight"}]"#,
            // non-positive height
            r#"[{"name":"b","weight_kg":70.0,"height_m":0.0,"bmi":0.0,"category":"Underweight"}]"#,
            // consistent first row does not rescue a bad second one
            r#"[{"name":"c","weight_kg":50.0,"height_m":2.0,"bmi":12.5,"category":"Underweight"},
                {"name":"d","weight_kg":50.0,"height_m":2.0,"bmi":12.5,"category":"Obesity"}]"#,
        ];

        for content in rows {
            fs::write(data_path(&dir), content).unwrap();
            let err = RecordStore::load(data_path(&dir)).unwrap_err();
            assert!(
                format!("{:#}", err).contains("Failed to parse data file"),
                "got {:#}",
                err
            );
        }
    }

    #[test]
    fn test_consistent_row_loads() {
        let dir = TempDir::new().unwrap();
        fs::write(
            data_path(&dir),
            r#"[{"name":"c","weight_kg":50.0,"height_m":2.0,"bmi":12.5,"category":"Underweight"}]"#,
        )
        .unwrap();

        let store = RecordStore::load(data_path(&dir)).unwrap();
        assert_eq!(store.records(), &[Record::new("c", 50.0, 2.0)]);
    }

    #[test]
    fn test_append_then_reload() {
        let dir = TempDir::new().unwrap();
        let mut store = RecordStore::load(data_path(&dir)).unwrap();

        store.append(Record::new("Ana", 75.5, 1.75));
        store.append(Record::new("Ben", 50.0, 1.60));
        store.append(Record::new("Cy", 110.0, 1.80));
        store.save().unwrap();

        let reloaded = RecordStore::load(data_path(&dir)).unwrap();
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.records(), store.records());
        assert_eq!(reloaded.latest().unwrap().name(), "Cy");
        assert_eq!(reloaded.latest().unwrap().category(), BmiCategory::Obesity);
    }

    #[test]
    fn test_save_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = RecordStore::new(data_path(&dir));
        store.append(Record::new("Ana", 75.5, 1.75));
        store.append(Record::new("Ben", 50.0, 1.6));
        store.append(Record::new("Odd", 63.3, 1.713));
        store.save().unwrap();
        let original = fs::read(data_path(&dir)).unwrap();

        RecordStore::load(data_path(&dir)).unwrap().save().unwrap();
        let first = fs::read(data_path(&dir)).unwrap();
        RecordStore::load(data_path(&dir)).unwrap().save().unwrap();
        let second = fs::read(data_path(&dir)).unwrap();

        assert_eq!(original, first);
        assert_eq!(first, second);
    }

    #[test]
    fn test_file_format() {
        let dir = TempDir::new().unwrap();
        let mut store = RecordStore::new(data_path(&dir));
        store.append(Record::new("Ana", 50.0, 2.0));
        store.save().unwrap();

        let content = fs::read_to_string(data_path(&dir)).unwrap();
        let expected = "[\n  {\n    \"name\": \"Ana\",\n    \"weight_kg\": 50.0,\n    \"height_m\": 2.0,\n    \"bmi\": 12.5,\n    \"category\": \"Underweight\"\n  }\n]";
        assert_eq!(content, expected);

        // No temp file left behind
        assert!(!dir.path().join("users_data.json.tmp").exists());
    }

    #[test]
    fn test_empty_set_saves_as_empty_array() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(data_path(&dir));
        store.save().unwrap();

        assert_eq!(fs::read_to_string(data_path(&dir)).unwrap(), "[]");
        assert!(RecordStore::load(data_path(&dir)).unwrap().is_empty());
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path().join("nope").join("data.json"));

        assert!(store.save().is_err());
    }
}
