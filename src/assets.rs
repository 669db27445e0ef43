//! Static asset delivery: map a request path to a file under the asset root.

use actix_files::NamedFile;
use std::path::{Component, Path, PathBuf};

/// Served for `/`.
pub const DEFAULT_DOCUMENT: &str = "index.html";

/// Content type for anything not in the table.
pub const FALLBACK_CONTENT_TYPE: &str = "text/plain";

/// Why an asset could not be served.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AssetError {
    /// No such file, a directory, or a path escaping the asset root.
    NotFound,
    /// The file exists but could not be read.
    ReadFailure(String),
}

impl AssetError {
    /// Missing files are NotFound; any other I/O failure is a ReadFailure.
    pub fn from_io(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => AssetError::NotFound,
            _ => AssetError::ReadFailure(err.to_string()),
        }
    }

    /// Plain-text response body.
    pub fn body(&self) -> &'static str {
        match self {
            AssetError::NotFound => "File not found",
            AssetError::ReadFailure(_) => "Server error",
        }
    }
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::NotFound => write!(f, "File not found"),
            AssetError::ReadFailure(reason) => write!(f, "Failed to read asset: {}", reason),
        }
    }
}

impl std::error::Error for AssetError {}

/// Content type by file extension (case-insensitive).
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") => "text/html",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => FALLBACK_CONTENT_TYPE,
    }
}

/// Resolve a URL path to a file path under `root`.
///
/// Only plain path segments are accepted: `..`, root and prefix components are rejected
/// so a request can never leave `root`.
pub fn resolve(root: &Path, request_path: &str) -> Result<PathBuf, AssetError> {
    let relative = request_path.trim_start_matches('/');
    let relative = if relative.is_empty() {
        DEFAULT_DOCUMENT
    } else {
        relative
    };

    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(segment) => resolved.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(AssetError::NotFound);
            }
        }
    }
    if resolved == root {
        return Err(AssetError::NotFound);
    }
    Ok(resolved)
}

/// Resolve and open an asset for streaming, with its content type from [`content_type_for`].
pub async fn open(root: &Path, request_path: &str) -> Result<NamedFile, AssetError> {
    let path = resolve(root, request_path)?;
    if path.is_dir() {
        return Err(AssetError::NotFound);
    }
    let content_type: mime::Mime = content_type_for(&path)
        .parse()
        .map_err(|e: mime::FromStrError| AssetError::ReadFailure(e.to_string()))?;
    let file = NamedFile::open_async(&path).await.map_err(AssetError::from_io)?;
    if file.metadata().is_dir() {
        return Err(AssetError::NotFound);
    }
    Ok(file
        .set_content_type(content_type)
        .disable_content_disposition()
        .use_etag(false)
        .use_last_modified(false))
}
