//! playerhud - live "now playing" view over MPRIS
//!
//! The engine (discovery, metadata sync, artwork cache) lives in the
//! hud-mpris crate; this binary wires it to a config file, an event bus
//! and a minimal terminal presenter.

mod config;
mod display;
mod event_bus;

use std::process::ExitCode;

use hud_mpris::{ArtworkCache, SessionBus, SyncLoop};
use log::{error, info};

use crate::config::HudConfig;

fn main() -> ExitCode {
    env_logger::init();

    let cfg = HudConfig::load(&HudConfig::default_path());

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    rt.block_on(run(cfg))
}

async fn run(cfg: HudConfig) -> ExitCode {
    // The one fatal error: without a session bus nothing can work, so
    // exit with a diagnostic instead of retrying.
    let bus = match SessionBus::connect().await {
        Ok(bus) => bus,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let slot = cfg
        .cache_path
        .clone()
        .unwrap_or_else(ArtworkCache::default_slot);
    info!(
        "starting sync loop: interval {:?}, cover slot {}",
        cfg.poll_interval(),
        slot.display()
    );

    // Subscribe before the engine starts so the immediate first cycle is
    // not dropped.
    let rx = event_bus::subscribe();

    let sync = SyncLoop::new(bus, ArtworkCache::new(slot));
    tokio::spawn(sync.run(cfg.poll_interval(), event_bus::send));

    display::run(rx).await;
    ExitCode::SUCCESS
}
