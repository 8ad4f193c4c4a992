//! File suffix conventions.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ProjectIoError, Result};

/// Suffix of compressed project files.
pub const PROJECT_SUFFIX: &str = "udt";
/// Suffix of uncompressed project files.
pub const XML_SUFFIX: &str = "xml";

/// What to do when a write target lacks the format's suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuffixPolicy {
    /// Rewrite the path to carry the suffix.
    #[default]
    Normalize,
    /// Fail instead of writing somewhere the caller did not name.
    Require,
}

pub(crate) fn enforce_suffix(
    path: &Path,
    suffix: &'static str,
    policy: SuffixPolicy,
) -> Result<PathBuf> {
    if path.extension().and_then(OsStr::to_str) == Some(suffix) {
        return Ok(path.to_path_buf());
    }
    match policy {
        SuffixPolicy::Normalize => {
            let normalized = path.with_extension(suffix);
            debug!(
                requested = %path.display(),
                normalized = %normalized.display(),
                "normalized project file suffix"
            );
            Ok(normalized)
        }
        SuffixPolicy::Require => Err(ProjectIoError::SuffixMismatch {
            path: path.to_path_buf(),
            expected: suffix,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_suffix_is_untouched() {
        let path = Path::new("diagrams/project.udt");
        let result = enforce_suffix(path, PROJECT_SUFFIX, SuffixPolicy::Normalize).unwrap();
        assert_eq!(result, path);
    }

    #[test]
    fn normalize_rewrites_foreign_suffix() {
        let result =
            enforce_suffix(Path::new("project.txt"), PROJECT_SUFFIX, SuffixPolicy::Normalize)
                .unwrap();
        assert_eq!(result, Path::new("project.udt"));
    }

    #[test]
    fn normalize_appends_missing_suffix() {
        let result =
            enforce_suffix(Path::new("project"), XML_SUFFIX, SuffixPolicy::Normalize).unwrap();
        assert_eq!(result, Path::new("project.xml"));
    }

    #[test]
    fn require_rejects_foreign_suffix() {
        let error =
            enforce_suffix(Path::new("project.txt"), PROJECT_SUFFIX, SuffixPolicy::Require)
                .unwrap_err();
        assert!(matches!(
            error,
            ProjectIoError::SuffixMismatch { expected: "udt", .. }
        ));
    }
}
