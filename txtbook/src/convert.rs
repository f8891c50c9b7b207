//! File-level conversion: read the source text, segment it, write JSON.

use crate::document::Document;
use crate::error::{ConvertError, Result};
use crate::text::parse_text;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Source and destination of one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertPaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Convert `paths.input` and write the document to `paths.output`.
///
/// Nothing is written unless every step succeeds.
pub fn convert_file(paths: &ConvertPaths) -> Result<Document> {
    if !paths.input.exists() {
        return Err(ConvertError::InputNotFound(paths.input.clone()));
    }

    eprintln!("Converting {} to JSON...", paths.input.display());

    let content = fs::read_to_string(&paths.input).map_err(|source| ConvertError::Read {
        path: paths.input.clone(),
        source,
    })?;

    log::debug!(
        "Read {} bytes from {}",
        content.len(),
        paths.input.display()
    );

    let doc = parse_text(&content)?;
    write_document(&doc, &paths.output)?;

    Ok(doc)
}

/// Serialize a document as indented JSON with non-ASCII text kept literal.
pub fn to_json(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Write the document to `output`, creating parent directories.
///
/// The JSON goes to a temporary file next to the destination which then
/// replaces it, so an existing file is either fully updated or untouched.
pub fn write_document(doc: &Document, output: &Path) -> Result<()> {
    let json = to_json(doc)?;

    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(dir).map_err(|source| ConvertError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let write_err = |source: std::io::Error| ConvertError::Write {
        path: output.to_path_buf(),
        source,
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(json.as_bytes()).map_err(write_err)?;
    file.flush().map_err(write_err)?;

    if let Some(permissions) = output_permissions(output) {
        file.as_file()
            .set_permissions(permissions)
            .map_err(write_err)?;
    }

    file.persist(output).map_err(|source| ConvertError::Persist {
        path: output.to_path_buf(),
        source,
    })?;

    log::debug!("Wrote {} bytes to {}", json.len(), output.display());
    Ok(())
}

/// Permissions the written file should end up with.
///
/// An existing destination keeps its mode; a new one is world-readable
/// rather than the owner-only mode of the temporary file.
fn output_permissions(output: &Path) -> Option<fs::Permissions> {
    match fs::metadata(output) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "吾輩は猫である\n夏目漱石\n\n+目次\n一\n\u{3000}吾輩は猫である。名前はまだ無い。\n\n「名前はまだ無い」\n+目次\n二\n\u{3000}吾輩は新年来多少有名になったので、\n";

    fn paths_in(dir: &TempDir) -> ConvertPaths {
        ConvertPaths {
            input: dir.path().join("original").join("novel.txt"),
            output: dir.path().join("lib").join("mock-data").join("novel.json"),
        }
    }

    fn write_input(paths: &ConvertPaths, content: &str) {
        fs::create_dir_all(paths.input.parent().unwrap()).unwrap();
        fs::write(&paths.input, content).unwrap();
    }

    #[test]
    fn test_convert_writes_json() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        write_input(&paths, SAMPLE);

        let doc = convert_file(&paths).unwrap();
        assert_eq!(doc.chapters().len(), 2);

        let written = fs::read_to_string(&paths.output).unwrap();
        let parsed: Document = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_output_keeps_non_ascii_literal() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        write_input(&paths, SAMPLE);

        convert_file(&paths).unwrap();
        let written = fs::read_to_string(&paths.output).unwrap();

        assert!(written.contains("\"title\": \"吾輩は猫である\""));
        assert!(written.contains("\"author\": \"夏目漱石\""));
        assert!(written.contains("「名前はまだ無い」"));
        assert!(!written.contains("\\u"));
        assert!(written.starts_with("{\n  \"metadata\": {\n    \"id\": 1,"));
        assert!(!written.ends_with('\n'));
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        write_input(&paths, SAMPLE);

        convert_file(&paths).unwrap();
        let first = fs::read(&paths.output).unwrap();
        convert_file(&paths).unwrap();
        let second = fs::read(&paths.output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_input_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);

        let err = convert_file(&paths).unwrap_err();
        assert!(err.is_missing_input());
        assert!(!paths.output.exists());
        assert!(!paths.output.parent().unwrap().exists());
    }

    #[test]
    fn test_failed_conversion_leaves_output_untouched() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        write_input(&paths, "title only");
        fs::create_dir_all(paths.output.parent().unwrap()).unwrap();
        fs::write(&paths.output, "previous").unwrap();

        let err = convert_file(&paths).unwrap_err();
        assert!(matches!(err, ConvertError::MissingMetadata { .. }));
        assert_eq!(fs::read_to_string(&paths.output).unwrap(), "previous");
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        fs::create_dir_all(paths.input.parent().unwrap()).unwrap();
        fs::write(&paths.input, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = convert_file(&paths).unwrap_err();
        assert!(matches!(err, ConvertError::Read { .. }));
        assert!(!paths.output.exists());
    }

    #[test]
    fn test_write_replaces_existing_output() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        write_input(&paths, "T\nA\n一\nbody");
        fs::create_dir_all(paths.output.parent().unwrap()).unwrap();
        fs::write(&paths.output, "stale").unwrap();

        convert_file(&paths).unwrap();
        let written = fs::read_to_string(&paths.output).unwrap();
        assert!(written.contains("\"text\": \"body\""));
    }

    #[cfg(unix)]
    #[test]
    fn test_new_output_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        write_input(&paths, SAMPLE);

        convert_file(&paths).unwrap();
        let mode = fs::metadata(&paths.output).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_output_keeps_its_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        write_input(&paths, SAMPLE);
        fs::create_dir_all(paths.output.parent().unwrap()).unwrap();
        fs::write(&paths.output, "stale").unwrap();
        fs::set_permissions(&paths.output, fs::Permissions::from_mode(0o664)).unwrap();

        convert_file(&paths).unwrap();
        let mode = fs::metadata(&paths.output).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o664);
    }

    #[test]
    fn test_to_json_shape() {
        let doc = parse_text("T\nA\n一\n「Hi」").unwrap();
        let json = to_json(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metadata"]["id"], 1);
        assert_eq!(value["content"]["chapters"][0]["title"], "一");
        assert_eq!(
            value["content"]["chapters"][0]["blocks"][0]["type"],
            "conversation"
        );
    }
}
