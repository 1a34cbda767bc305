//! hud-mpris - MPRIS session discovery and metadata sync engine
//!
//! Features:
//! - Single D-Bus connection for the process lifetime
//! - First-match player discovery with bounded timeouts
//! - Tolerant metadata normalization (every field independently optional)
//! - Single-slot artwork cache with a fail-silent, keep-stale policy

pub mod artwork;
pub mod bus;
pub mod error;
pub mod metadata;
pub mod sync;
pub mod types;

pub use artwork::{ArtworkCache, ArtworkRef};
pub use bus::{MPRIS_PREFIX, MediaBus, SessionBus};
pub use error::{ArtworkError, ConnectError, DiscoveryError, FetchError};
pub use metadata::{MetadataBlob, normalize};
pub use sync::{DEFAULT_POLL_INTERVAL, SyncLoop};
pub use types::{MetadataSnapshot, PublishedState, UnavailableReason};
