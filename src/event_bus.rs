//! Broadcast bus between the sync engine and presenters.
//!
//! Every subscriber receives every published state; lagging receivers
//! skip old states, which is fine because only the latest one matters.

use std::sync::OnceLock;

use hud_mpris::PublishedState;
use tokio::sync::broadcast::{self, Receiver, Sender};

/// Enough for burst handling without memory bloat.
pub const CHANNEL_CAPACITY: usize = 64;

static SENDER: OnceLock<Sender<PublishedState>> = OnceLock::new();

fn sender() -> &'static Sender<PublishedState> {
    SENDER.get_or_init(|| {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        tx
    })
}

/// Publish a state to all presenters. Non-blocking; dropped when nobody
/// is subscribed yet.
pub fn send(state: PublishedState) {
    let _ = sender().send(state);
}

pub fn subscribe() -> Receiver<PublishedState> {
    sender().subscribe()
}
