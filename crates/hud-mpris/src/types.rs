//! Core types for hud-mpris

use std::fmt;
use std::path::PathBuf;

/// Normalized view of one metadata fetch. Every field is independently
/// optional because real players populate the blob inconsistently.
///
/// A snapshot is immutable once built and is superseded wholesale by the
/// next cycle; there is no merging and no history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetadataSnapshot {
    pub title: Option<String>,
    /// First entry of the artist list only.
    pub artist: Option<String>,
    /// Raw artwork reference string as the player reported it.
    pub art_ref: Option<String>,
}

/// Why no track is being shown this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnavailableReason {
    /// Name enumeration found no MPRIS peer (or the enumeration failed).
    NoPlayer,
    /// A bound peer stopped answering; the binding has been dropped.
    PeerLost,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::NoPlayer => f.write_str("no player"),
            UnavailableReason::PeerLost => f.write_str("peer lost"),
        }
    }
}

/// Result of one sync cycle, the only artifact the presentation layer
/// consumes.
///
/// `art_path: None` inside `Playing` means "nothing newly resolved this
/// cycle"; consumers are expected to keep showing the last artwork they
/// had rather than clearing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublishedState {
    Playing {
        snapshot: MetadataSnapshot,
        art_path: Option<PathBuf>,
    },
    Unavailable(UnavailableReason),
}
