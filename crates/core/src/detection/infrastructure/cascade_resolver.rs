use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::CASCADE_BASE_URL;

#[derive(Error, Debug)]
pub enum CascadeResolveError {
    #[error("failed to create cascade cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write cascade to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Directories OpenCV installs its stock cascades into.
const SYSTEM_CASCADE_DIRS: &[&str] = &[
    "/usr/share/opencv4/haarcascades",
    "/usr/local/share/opencv4/haarcascades",
    "/opt/homebrew/share/opencv4/haarcascades",
];

/// Resolve a cascade file by name, checking local locations before
/// downloading.
///
/// Resolution order:
/// 1. System OpenCV data directories
/// 2. User cache directory
/// 3. Download from the OpenCV data repository into the cache
pub fn resolve(name: &str, progress: Option<ProgressFn>) -> Result<PathBuf, CascadeResolveError> {
    if let Some(found) = find_in(name, SYSTEM_CASCADE_DIRS.iter().map(PathBuf::from)) {
        return Ok(found);
    }

    let cache_dir = cascade_cache_dir()?;
    let cached = cache_dir.join(name);
    if cached.exists() {
        return Ok(cached);
    }

    fs::create_dir_all(&cache_dir).map_err(CascadeResolveError::CacheDir)?;
    let url = format!("{CASCADE_BASE_URL}/{name}");
    download(&url, &cached, progress)?;
    Ok(cached)
}

fn find_in(name: &str, dirs: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    dirs.into_iter().map(|d| d.join(name)).find(|p| p.exists())
}

/// Platform-specific cascade cache directory.
///
/// - Linux: `$XDG_CACHE_HOME/CamScope/haarcascades/` or `~/.cache/CamScope/haarcascades/`
/// - macOS: `~/Library/Caches/CamScope/haarcascades/`
/// - Windows: `%LOCALAPPDATA%/CamScope/haarcascades/`
pub fn cascade_cache_dir() -> Result<PathBuf, CascadeResolveError> {
    dirs::cache_dir()
        .map(|d| d.join("CamScope").join("haarcascades"))
        .ok_or(CascadeResolveError::NoCacheDir)
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), CascadeResolveError> {
    let response = reqwest::blocking::get(url).map_err(|e| CascadeResolveError::Download {
        url: url.to_string(),
        source: e,
    })?;

    let total = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;

    // Write to a temp file first, then rename for atomicity
    let temp_path = dest.with_extension("part");
    let mut file = fs::File::create(&temp_path).map_err(|e| CascadeResolveError::Write {
        path: temp_path.clone(),
        source: e,
    })?;

    let bytes = response.bytes().map_err(|e| CascadeResolveError::Download {
        url: url.to_string(),
        source: e,
    })?;

    let chunk_size = 64 * 1024;
    for chunk in bytes.chunks(chunk_size) {
        file.write_all(chunk)
            .map_err(|e| CascadeResolveError::Write {
                path: temp_path.clone(),
                source: e,
            })?;
        downloaded += chunk.len() as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(|e| CascadeResolveError::Write {
        path: temp_path.clone(),
        source: e,
    })?;
    drop(file);

    fs::rename(&temp_path, dest).map_err(|e| CascadeResolveError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_in_prefers_earlier_directories() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(first.path().join("cascade.xml"), b"a").unwrap();
        fs::write(second.path().join("cascade.xml"), b"b").unwrap();

        let found = find_in(
            "cascade.xml",
            [first.path().to_path_buf(), second.path().to_path_buf()],
        )
        .unwrap();
        assert_eq!(found, first.path().join("cascade.xml"));
    }

    #[test]
    fn test_find_in_skips_missing_entries() {
        let empty = TempDir::new().unwrap();
        let populated = TempDir::new().unwrap();
        fs::write(populated.path().join("cascade.xml"), b"x").unwrap();

        let found = find_in(
            "cascade.xml",
            [empty.path().to_path_buf(), populated.path().to_path_buf()],
        )
        .unwrap();
        assert_eq!(found, populated.path().join("cascade.xml"));
    }

    #[test]
    fn test_find_in_returns_none_when_absent() {
        let empty = TempDir::new().unwrap();
        assert!(find_in("cascade.xml", [empty.path().to_path_buf()]).is_none());
    }

    #[test]
    fn test_cascade_cache_dir_shape() {
        let dir = cascade_cache_dir().unwrap();
        let text = dir.to_string_lossy();
        assert!(text.contains("CamScope"));
        assert!(text.contains("haarcascades"));
    }
}
