//! Events sent from the engine to the host.

use serde::{Deserialize, Serialize};

use crate::state::StartPhase;
use crate::types::BroadcastId;

/// Events that the engine can send to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// Engine is ready to accept commands.
    Ready,

    /// A broadcast was created and its ingest URI resolved.
    Started {
        /// Id of the created broadcast.
        broadcast_id: BroadcastId,

        /// Where to publish the stream.
        ingest_uri: String,

        /// Whether the platform acknowledged the start request.
        confirmed: bool,
    },

    /// The start sequence failed.
    StartFailed {
        /// Phase the sequence failed in.
        phase: StartPhase,

        /// Error message.
        message: String,

        /// Set when the broadcast was created before the failure, so the
        /// host can end it.
        broadcast_id: Option<BroadcastId>,
    },

    /// An end request was issued for this broadcast.
    EndRequested { broadcast_id: BroadcastId },

    /// Engine has shut down.
    Shutdown,
}
