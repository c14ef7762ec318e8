//! Shared types and host<->engine messages for livecast.
//!
//! This crate defines the configuration, identifiers, and message types used
//! between a hosting application and the lifecycle engine.

mod commands;
mod events;
mod state;
mod types;

pub use commands::LifecycleCommand;
pub use events::LifecycleEvent;
pub use state::StartPhase;
pub use types::{
    BroadcastId, LifecycleConfig, DEFAULT_INGEST_PORT, DEFAULT_PREVIEW_HEIGHT,
    DEFAULT_PREVIEW_WIDTH,
};

use crossbeam_channel::{Receiver, Sender};

/// Channel capacity for commands (host → engine).
pub const COMMAND_CHANNEL_CAPACITY: usize = 16;

/// Channel capacity for events (engine → host).
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Creates a bounded command channel.
pub fn command_channel() -> (Sender<LifecycleCommand>, Receiver<LifecycleCommand>) {
    crossbeam_channel::bounded(COMMAND_CHANNEL_CAPACITY)
}

/// Creates a bounded event channel.
pub fn event_channel() -> (Sender<LifecycleEvent>, Receiver<LifecycleEvent>) {
    crossbeam_channel::bounded(EVENT_CHANNEL_CAPACITY)
}
