use crate::editing::{Document, DocumentError};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed document: {0}")]
    Malformed(#[from] DocumentError),
}

/// Read a content file and parse it into a document
pub fn load_document(path: &Path) -> Result<Document, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let json = fs::read_to_string(path).map_err(IoError::Io)?;
    Ok(Document::from_json(&json)?)
}

/// Serialize a document and write it to a content file
pub fn save_document(path: &Path, document: &Document) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }
    let json = document.to_json()?;
    fs::write(path, json).map_err(IoError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, sample_document};

    #[test]
    fn test_save_and_load_round_trip() {
        // Given a document saved to disk
        let dir = create_test_dir();
        let path = dir.path().join("page.json");
        let document = sample_document();
        save_document(&path, &document).unwrap();

        // When loading it back
        let loaded = load_document(&path).unwrap();

        // Then the block content survives (ids are per-session)
        assert_eq!(loaded.blocks().len(), document.blocks().len());
        for (a, b) in loaded.blocks().iter().zip(document.blocks()) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.plain_text(), b.plain_text());
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = create_test_dir();
        let result = load_document(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = create_test_dir();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let result = load_document(&path);
        assert!(matches!(result, Err(IoError::Malformed(_))));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = create_test_dir();
        let path = dir.path().join("nested").join("deeper").join("page.json");

        save_document(&path, &sample_document()).unwrap();

        assert!(path.exists());
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_save_overwrites_existing() {
        let dir = create_test_dir();
        let path = dir.path().join("page.json");
        save_document(&path, &sample_document()).unwrap();

        let replacement = Document::from_json(
            r#"[{"type":"paragraph","children":[{"type":"text","text":"replaced"}]}]"#,
        )
        .unwrap();
        save_document(&path, &replacement).unwrap();

        let loaded = load_document(&path).unwrap();
        assert_eq!(loaded.blocks().len(), 1);
        assert_eq!(loaded.blocks()[0].plain_text(), "replaced");
    }
}
