//! Artwork reference resolution and the single-slot cover cache
//!
//! Remote covers are downloaded into one fixed per-user file that every
//! track reuses, so the cache can never grow past a single image. A failed
//! download leaves the previous bytes in place and resolves to `None` for
//! that cycle; consumers keep showing the cover they already have, which
//! avoids flicker on transient network errors.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;

use crate::error::ArtworkError;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(2);
const MAX_ART_BYTES: u64 = 4 * 1024 * 1024;

/// Parsed form of the raw `mpris:artUrl` string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArtworkRef {
    LocalPath(PathBuf),
    RemoteUrl(String),
    Unknown,
}

impl ArtworkRef {
    /// Classify a raw artwork reference. Anything that is neither a
    /// `file://` URL nor an http(s) URL is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        if let Some(path) = raw.strip_prefix("file://") {
            ArtworkRef::LocalPath(PathBuf::from(path))
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            ArtworkRef::RemoteUrl(raw.to_string())
        } else {
            ArtworkRef::Unknown
        }
    }
}

/// Resolves artwork references to a local file path.
#[derive(Clone)]
pub struct ArtworkCache {
    slot: PathBuf,
    agent: ureq::Agent,
}

impl ArtworkCache {
    pub fn new(slot: PathBuf) -> Self {
        let agent = ureq::builder().timeout(DOWNLOAD_TIMEOUT).build();
        Self { slot, agent }
    }

    /// Per-user default slot under the XDG cache directory.
    pub fn default_slot() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".cache/playerhud/cover")
    }

    pub fn slot(&self) -> &Path {
        &self.slot
    }

    /// Resolve a reference to a readable local path, or `None` for this
    /// cycle. Local paths pass through untouched; only remote URLs write
    /// to the slot. Blocking: run on a blocking-friendly thread.
    pub fn resolve(&self, art: &ArtworkRef) -> Option<PathBuf> {
        match art {
            ArtworkRef::LocalPath(path) => {
                if path.exists() {
                    Some(path.clone())
                } else {
                    None
                }
            }
            ArtworkRef::RemoteUrl(url) => match self.download(url) {
                Ok(()) => Some(self.slot.clone()),
                Err(e) => {
                    warn!("cover download failed, keeping previous cover: {e}");
                    None
                }
            },
            ArtworkRef::Unknown => None,
        }
    }

    /// Fetch the whole body into memory, then overwrite the slot in one
    /// write. The slot is only touched after a complete, size-checked
    /// download, so a failed transfer cannot corrupt the previous cover.
    fn download(&self, url: &str) -> Result<(), ArtworkError> {
        let response = self.agent.get(url).call().map_err(Box::new)?;

        let mut body = Vec::new();
        response
            .into_reader()
            .take(MAX_ART_BYTES + 1)
            .read_to_end(&mut body)?;
        if body.len() as u64 > MAX_ART_BYTES {
            return Err(ArtworkError::TooLarge);
        }

        if let Some(parent) = self.slot.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.slot, &body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn cache_in(dir: &Path) -> ArtworkCache {
        ArtworkCache::new(dir.join("cover"))
    }

    #[test]
    fn parse_classifies_references() {
        assert_eq!(
            ArtworkRef::parse("file:///tmp/a.jpg"),
            ArtworkRef::LocalPath(PathBuf::from("/tmp/a.jpg"))
        );
        assert_eq!(
            ArtworkRef::parse("https://example.com/a.jpg"),
            ArtworkRef::RemoteUrl("https://example.com/a.jpg".to_string())
        );
        assert_eq!(
            ArtworkRef::parse("http://example.com/a.jpg"),
            ArtworkRef::RemoteUrl("http://example.com/a.jpg".to_string())
        );
        assert_eq!(ArtworkRef::parse("data:image/png;base64,AAAA"), ArtworkRef::Unknown);
        assert_eq!(ArtworkRef::parse(""), ArtworkRef::Unknown);
    }

    #[test]
    fn existing_local_path_passes_through() {
        let dir = tempdir().unwrap();
        let art = dir.path().join("a.jpg");
        fs::write(&art, b"jpeg bytes").unwrap();

        let cache = cache_in(dir.path());
        let resolved = cache.resolve(&ArtworkRef::LocalPath(art.clone()));

        assert_eq!(resolved, Some(art));
        // Passthrough never copies into the slot.
        assert!(!cache.slot().exists());
    }

    #[test]
    fn missing_local_path_resolves_to_none() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path());
        let gone = dir.path().join("gone.jpg");

        assert_eq!(cache.resolve(&ArtworkRef::LocalPath(gone)), None);
        assert!(!cache.slot().exists());
    }

    #[test]
    fn unknown_reference_is_a_no_op() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path());

        assert_eq!(cache.resolve(&ArtworkRef::Unknown), None);
        assert!(!cache.slot().exists());
    }

    #[test]
    fn failed_download_keeps_previous_slot_bytes() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path());
        fs::write(cache.slot(), b"previous cover").unwrap();

        // Port 1 on loopback refuses connections immediately.
        let url = "http://127.0.0.1:1/cover.jpg".to_string();
        assert_eq!(cache.resolve(&ArtworkRef::RemoteUrl(url)), None);

        assert_eq!(fs::read(cache.slot()).unwrap(), b"previous cover");
    }
}
