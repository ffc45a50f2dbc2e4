//! source::fs
//!
//! Filesystem-backed input sources.
//!
//! Declaration files are JSON objects mapping stem name to declaration
//! record. Present lists are plain text, one stem per line.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{parse_present, DeclBatch, DeclSource, SourceError};
use crate::core::types::StemId;

/// A declaration source reading JSON files from disk.
#[derive(Debug, Clone)]
pub struct FsDeclSource {
    paths: Vec<PathBuf>,
}

impl FsDeclSource {
    /// Create a source over the given declaration file paths.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// The configured paths.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

#[async_trait]
impl DeclSource for FsDeclSource {
    async fn load(&self) -> Result<Vec<DeclBatch>, SourceError> {
        let mut batches = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let text =
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| SourceError::Io {
                        path: path.clone(),
                        source,
                    })?;
            let batch: DeclBatch =
                serde_json::from_str(&text).map_err(|err| SourceError::Parse {
                    path: path.clone(),
                    message: err.to_string(),
                })?;
            batches.push(batch);
        }
        Ok(batches)
    }
}

/// Read a present-stem list from disk.
pub async fn read_present_file(path: &Path) -> Result<Vec<StemId>, SourceError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parse_present(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::source::gather;
    use crate::core::types::StemId;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn loads_declaration_batches() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "deps.json",
            r#"{ "a": { "mustDeps": [ { "block": "b" } ] } }"#,
        );

        let source = FsDeclSource::new(vec![path]);
        let batches = source.load().await.unwrap();
        assert_eq!(batches.len(), 1);
        assert!(batches[0].contains_key(&StemId::new("a").unwrap()));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsDeclSource::new(vec![dir.path().join("absent.json")]);
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "deps.json", "{ not json");
        let source = FsDeclSource::new(vec![path]);
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[tokio::test]
    async fn reads_present_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "stems.txt", "b\na\n");
        let stems = read_present_file(&path).await.unwrap();
        let names: Vec<&str> = stems.iter().map(StemId::as_str).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[tokio::test]
    async fn gather_merges_batches_by_union() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_file(&dir, "one.json", r#"{ "a": { "mustDeps": [ { "block": "b" } ] } }"#);
        let second = write_file(&dir, "two.json", r#"{ "a": { "mustDeps": [ { "block": "c" } ] } }"#);
        let present = write_file(&dir, "stems.txt", "a\nb\nc\n");

        let source = FsDeclSource::new(vec![first, second]);
        let inputs = gather(&source, &present).await.unwrap();

        let a = StemId::new("a").unwrap();
        let deps: Vec<&str> = inputs.declarations[&a].iter().map(StemId::as_str).collect();
        assert_eq!(deps, ["b", "c"]);
        assert_eq!(inputs.present.len(), 3);
    }
}
