//! Live broadcast lifecycle orchestrator.
//!
//! This crate sequences the platform calls needed to go live (token, create,
//! start), turns the returned upload URL into an RTMP ingest URI, and ends
//! broadcasts on request. All platform I/O goes through a
//! [`livecast_session::SessionClient`] supplied by the caller.

mod error;
mod ingest;
mod lifecycle;
mod orchestrator;
pub mod requests;

pub use error::{IngestUrlError, LifecycleError};
pub use ingest::{IngestUri, INGEST_SCHEME};
pub use lifecycle::{BroadcastLifecycle, LiveBroadcast};
pub use orchestrator::Engine;

use crossbeam_channel::{Receiver, Sender};
use livecast_ipc::{LifecycleCommand, LifecycleConfig, LifecycleEvent};
use livecast_session::SessionClient;

/// Result type for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Create an engine instance with IPC channels.
pub fn create_engine<S: SessionClient>(
    session: S,
    config: LifecycleConfig,
    command_rx: Receiver<LifecycleCommand>,
    event_tx: Sender<LifecycleEvent>,
) -> Engine<S> {
    Engine::new(session, config, command_rx, event_tx)
}
