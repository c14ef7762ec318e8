//! Commands sent from the host to the engine.

use serde::{Deserialize, Serialize};

use crate::types::BroadcastId;

/// Commands that the host can send to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LifecycleCommand {
    /// Create and start a broadcast.
    Start,

    /// End a broadcast, not necessarily one started by this engine.
    End { broadcast_id: BroadcastId },

    /// Shutdown the engine completely.
    Shutdown,
}
