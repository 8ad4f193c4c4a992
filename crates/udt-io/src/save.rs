//! Project saving operations.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::ZlibEncoder;
use tracing::info;
use udt_model::UmlProject;

use crate::error::{ProjectIoError, Result};
use crate::suffix::{PROJECT_SUFFIX, SuffixPolicy, XML_SUFFIX, enforce_suffix};

/// Write options.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    pub suffix_policy: SuffixPolicy,
}

/// Save a project as a compressed `.udt` file with default options.
///
/// Returns the path actually written, which differs from the requested
/// one when the suffix was normalized.
pub fn write_project(project: &UmlProject, path: &Path) -> Result<PathBuf> {
    write_project_with(project, path, WriteOptions::default())
}

/// Save a project as a compressed `.udt` file.
pub fn write_project_with(
    project: &UmlProject,
    path: &Path,
    options: WriteOptions,
) -> Result<PathBuf> {
    let target = enforce_suffix(path, PROJECT_SUFFIX, options.suffix_policy)?;
    let xml = udt_xml::serialize_project(project)?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(xml.as_bytes())
        .map_err(|e| ProjectIoError::Io {
            operation: "compress",
            path: target.clone(),
            source: e,
        })?;
    let bytes = encoder.finish().map_err(|e| ProjectIoError::Io {
        operation: "compress",
        path: target.clone(),
        source: e,
    })?;

    write_atomically(&target, &bytes)?;
    info!("saved project to {}", target.display());
    Ok(target)
}

/// Save a project as an uncompressed `.xml` file with default options.
pub fn write_xml(project: &UmlProject, path: &Path) -> Result<PathBuf> {
    write_xml_with(project, path, WriteOptions::default())
}

/// Save a project as an uncompressed `.xml` file.
pub fn write_xml_with(
    project: &UmlProject,
    path: &Path,
    options: WriteOptions,
) -> Result<PathBuf> {
    let target = enforce_suffix(path, XML_SUFFIX, options.suffix_policy)?;
    let xml = udt_xml::serialize_project(project)?;

    write_atomically(&target, xml.as_bytes())?;
    info!("saved project to {}", target.display());
    Ok(target)
}

/// Write bytes via a temp file and rename, so a crash mid-write never
/// leaves a truncated project file behind.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    // Stack onto the target suffix so `a.udt` and `a.xml` in the same
    // directory never collide on one `a.tmp`.
    let temp_path = match path.extension().and_then(OsStr::to_str) {
        Some(suffix) => path.with_extension(format!("{suffix}.tmp")),
        None => path.with_extension("tmp"),
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ProjectIoError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| ProjectIoError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;
    file.write_all(bytes).map_err(|e| ProjectIoError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;
    file.sync_all().map_err(|e| ProjectIoError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ProjectIoError::AtomicWriteFailed {
        temp_path,
        target_path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_project_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.udt");

        let written = write_project(&UmlProject::new(), &path).unwrap();

        assert_eq!(written, path);
        assert!(path.exists());
        // zlib streams open with 0x78.
        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes[0], 0x78);
    }

    #[test]
    fn test_write_project_normalizes_suffix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");

        let written = write_project(&UmlProject::new(), &path).unwrap();

        assert_eq!(written, dir.path().join("test.udt"));
        assert!(written.exists());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_project_require_policy_rejects_suffix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        let options = WriteOptions {
            suffix_policy: SuffixPolicy::Require,
        };

        let error = write_project_with(&UmlProject::new(), &path, options).unwrap_err();

        assert!(matches!(error, ProjectIoError::SuffixMismatch { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_xml_is_plain_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.xml");

        write_xml(&UmlProject::new(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<?xml version='1.0' encoding='iso-8859-1'?>"));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.udt");

        write_project(&UmlProject::new(), &path).unwrap();

        assert!(!dir.path().join("test.udt.tmp").exists());
        assert!(!dir.path().join("test.tmp").exists());
    }

    #[test]
    fn test_temp_paths_keep_target_suffixes_distinct() {
        let dir = tempdir().unwrap();

        write_project(&UmlProject::new(), &dir.path().join("test.udt")).unwrap();
        write_xml(&UmlProject::new(), &dir.path().join("test.xml")).unwrap();

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["test.udt", "test.xml"]);
    }
}
