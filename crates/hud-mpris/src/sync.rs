//! The sync loop: a two-state machine driven by a fixed-interval timer
//!
//! States are `NO_PEER` (no bound player, try discovery) and `BOUND`
//! (poll the bound player's metadata). A failed fetch drops the binding,
//! so a player that closes mid-session heals itself on the next cycle.

use std::time::Duration;

use log::{info, warn};
use tokio::time::MissedTickBehavior;

use crate::artwork::{ArtworkCache, ArtworkRef};
use crate::bus::MediaBus;
use crate::metadata;
use crate::types::{PublishedState, UnavailableReason};

/// Documented cadence: one cycle per second, first cycle immediately.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Owns all mutable engine state: the bound player name and the artwork
/// cache. One instance, one logical thread of control; cycles never
/// overlap.
pub struct SyncLoop<B> {
    bus: B,
    cache: ArtworkCache,
    player: Option<String>,
}

impl<B: MediaBus> SyncLoop<B> {
    pub fn new(bus: B, cache: ArtworkCache) -> Self {
        Self {
            bus,
            cache,
            player: None,
        }
    }

    /// Run one cycle of the machine and report the resulting state.
    pub async fn tick(&mut self) -> PublishedState {
        let service = match &self.player {
            Some(service) => service.clone(),
            None => match self.bus.locate().await {
                Some(service) => {
                    info!("bound to player {service}");
                    self.player = Some(service.clone());
                    service
                }
                None => return PublishedState::Unavailable(UnavailableReason::NoPlayer),
            },
        };

        let blob = match self.bus.fetch_metadata(&service).await {
            Ok(blob) => blob,
            Err(e) => {
                // Force re-discovery next cycle.
                warn!("lost player {service}: {e}");
                self.player = None;
                return PublishedState::Unavailable(UnavailableReason::PeerLost);
            }
        };

        let snapshot = metadata::normalize(&blob);
        let art_path = match snapshot.art_ref.as_deref().map(ArtworkRef::parse) {
            Some(art) => {
                // The download inside resolve() blocks; keep it off the
                // async workers.
                let cache = self.cache.clone();
                match tokio::task::spawn_blocking(move || cache.resolve(&art)).await {
                    Ok(path) => path,
                    Err(e) => {
                        warn!("artwork resolution task failed: {e}");
                        None
                    }
                }
            }
            None => None,
        };

        PublishedState::Playing { snapshot, art_path }
    }

    /// Drive the machine forever, publishing each cycle's state through
    /// `on_update`. The interval fires immediately once, so the first
    /// published state never waits a full period; a cycle that overruns
    /// skips the next tick instead of running two cycles concurrently.
    pub async fn run<F>(mut self, period: Duration, on_update: F)
    where
        F: Fn(PublishedState) + Send + Sync + 'static,
    {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            on_update(self.tick().await);
        }
    }
}
