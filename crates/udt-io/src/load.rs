//! Project loading operations.

use std::ffi::OsStr;
use std::fs;
use std::io::Read;
use std::path::Path;

use flate2::read::ZlibDecoder;
use tracing::info;
use udt_model::UmlProject;
use udt_xml::DeserializeOptions;

use crate::error::{ProjectIoError, Result};
use crate::suffix::{PROJECT_SUFFIX, XML_SUFFIX};

/// Load a project file, picking the format by its suffix.
pub fn read(path: &Path) -> Result<UmlProject> {
    match path.extension().and_then(OsStr::to_str) {
        Some(PROJECT_SUFFIX) => read_project(path),
        Some(XML_SUFFIX) => read_xml(path),
        _ => Err(ProjectIoError::UnknownSuffix {
            path: path.to_path_buf(),
        }),
    }
}

/// Load a compressed `.udt` project file with default options.
pub fn read_project(path: &Path) -> Result<UmlProject> {
    read_project_with(path, DeserializeOptions::default())
}

/// Load a compressed `.udt` project file.
pub fn read_project_with(path: &Path, options: DeserializeOptions) -> Result<UmlProject> {
    let bytes = fs::read(path).map_err(|e| ProjectIoError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut xml = String::new();
    ZlibDecoder::new(bytes.as_slice())
        .read_to_string(&mut xml)
        .map_err(|e| ProjectIoError::Io {
            operation: "decompress",
            path: path.to_path_buf(),
            source: e,
        })?;

    let project = udt_xml::deserialize_project_with(&xml, options)?;
    info!("loaded project from {}", path.display());
    Ok(project)
}

/// Load an uncompressed `.xml` project file with default options.
pub fn read_xml(path: &Path) -> Result<UmlProject> {
    read_xml_with(path, DeserializeOptions::default())
}

/// Load an uncompressed `.xml` project file.
pub fn read_xml_with(path: &Path, options: DeserializeOptions) -> Result<UmlProject> {
    let xml = fs::read_to_string(path).map_err(|e| ProjectIoError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    let project = udt_xml::deserialize_project_with(&xml, options)?;
    info!("loaded project from {}", path.display());
    Ok(project)
}
