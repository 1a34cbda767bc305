//! Error types for hud-mpris
//!
//! Only `ConnectError` is allowed to end the process; the other three are
//! recovered inside the sync loop by degrading the published state.

/// Failure to acquire the session bus at startup. Fatal: without a bus
/// connection nothing downstream can work, so there is no retry path.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("session bus unavailable: {0}")]
    Session(#[from] zbus::Error),
}

/// Name enumeration failed. Logged and mapped to "no player found";
/// never crosses the `locate` boundary.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("D-Bus error: {0}")]
    DBus(#[from] zbus::Error),

    #[error("D-Bus fdo error: {0}")]
    Fdo(#[from] zbus::fdo::Error),

    #[error("name enumeration timed out")]
    Timeout,
}

/// Metadata property read failed. The caller must drop its peer binding
/// and re-locate on the next cycle.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("D-Bus error: {0}")]
    DBus(#[from] zbus::Error),

    #[error("metadata read timed out")]
    Timeout,
}

/// Remote artwork download failed. The cache slot keeps its previous
/// content and the cycle publishes no artwork path.
#[derive(Debug, thiserror::Error)]
pub enum ArtworkError {
    #[error("download failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("artwork exceeds the size cap")]
    TooLarge,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
