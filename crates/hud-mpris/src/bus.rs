//! D-Bus side of the engine: connection, player discovery, metadata reads
//!
//! `MediaBus` is the seam between the sync loop and the real bus; tests
//! substitute a scripted fake behind it. `SessionBus` is the production
//! implementation on top of a single zbus connection.

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, warn};
use tokio::time::timeout;
use zbus::Connection;
use zbus::proxy::CacheProperties;
use zbus::zvariant::OwnedValue;

use crate::error::{ConnectError, DiscoveryError, FetchError};
use crate::metadata::MetadataBlob;

/// Service-name prefix every MPRIS player registers under.
pub const MPRIS_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Discovery runs at most once per cycle, so it gets the longer budget.
const LOCATE_TIMEOUT: Duration = Duration::from_secs(2);
/// Metadata reads run every cycle and get the tighter budget.
const FETCH_TIMEOUT: Duration = Duration::from_millis(1500);

/// D-Bus proxy for the MPRIS player interface. Property caching is off
/// because the loop re-reads `Metadata` every cycle; zbus routes the read
/// through `org.freedesktop.DBus.Properties.Get`.
#[zbus::proxy(
    interface = "org.mpris.MediaPlayer2.Player",
    default_path = "/org/mpris/MediaPlayer2"
)]
trait MprisPlayer {
    #[zbus(property)]
    fn metadata(&self) -> zbus::Result<HashMap<String, OwnedValue>>;
}

/// What the sync loop needs from the bus.
pub trait MediaBus: Send + Sync {
    /// Pick a media-session service name, or `None` when there is none or
    /// discovery failed. Never raises: a missing player is a normal state.
    fn locate(&self) -> impl Future<Output = Option<String>> + Send;

    /// Read the `Metadata` property of the given player. Any error means
    /// the binding to that player must be dropped.
    fn fetch_metadata(
        &self,
        service: &str,
    ) -> impl Future<Output = Result<MetadataBlob, FetchError>> + Send;
}

/// The real session bus. Cheap to clone; all clones share one connection.
#[derive(Clone)]
pub struct SessionBus {
    connection: Connection,
}

impl SessionBus {
    /// Connect to the user's session bus. The one fatal error in the
    /// engine: callers are expected to exit on failure, not retry.
    pub async fn connect() -> Result<Self, ConnectError> {
        let connection = Connection::session().await?;
        Ok(Self { connection })
    }

    async fn list_player_names(&self) -> Result<Vec<String>, DiscoveryError> {
        let proxy = zbus::fdo::DBusProxy::new(&self.connection).await?;
        let names = timeout(LOCATE_TIMEOUT, proxy.list_names())
            .await
            .map_err(|_| DiscoveryError::Timeout)??;

        Ok(names
            .iter()
            .filter(|name| name.starts_with(MPRIS_PREFIX))
            .map(|name| name.to_string())
            .collect())
    }
}

impl MediaBus for SessionBus {
    /// First matching name wins, in whatever order the bus enumerates.
    /// With several players running the pick is non-deterministic and may
    /// change between polls.
    async fn locate(&self) -> Option<String> {
        match self.list_player_names().await {
            Ok(names) => {
                if names.is_empty() {
                    debug!("no MPRIS player registered on the bus");
                }
                names.into_iter().next()
            }
            Err(e) => {
                warn!("player discovery failed: {e}");
                None
            }
        }
    }

    async fn fetch_metadata(&self, service: &str) -> Result<MetadataBlob, FetchError> {
        let proxy = MprisPlayerProxy::builder(&self.connection)
            .destination(service.to_string())?
            .cache_properties(CacheProperties::No)
            .build()
            .await?;

        let blob = timeout(FETCH_TIMEOUT, proxy.metadata())
            .await
            .map_err(|_| FetchError::Timeout)??;
        Ok(blob)
    }
}
