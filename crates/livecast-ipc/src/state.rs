//! Phases of the broadcast start sequence.

use serde::{Deserialize, Serialize};

/// Start phases, in the order the orchestrator runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartPhase {
    /// Fetching the anti-forgery token from the session.
    AcquireToken,

    /// Creating the broadcast resource.
    CreateBroadcast,

    /// Asking the platform to start the created broadcast.
    ConfirmStart,

    /// Turning the upload URL into an ingest URI.
    ResolveIngest,
}

impl StartPhase {
    /// Returns the next phase, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::AcquireToken => Some(Self::CreateBroadcast),
            Self::CreateBroadcast => Some(Self::ConfirmStart),
            Self::ConfirmStart => Some(Self::ResolveIngest),
            Self::ResolveIngest => None,
        }
    }

    /// Returns the display name for this phase.
    pub fn name(self) -> &'static str {
        match self {
            Self::AcquireToken => "Acquiring token",
            Self::CreateBroadcast => "Creating broadcast",
            Self::ConfirmStart => "Starting broadcast",
            Self::ResolveIngest => "Resolving ingest URI",
        }
    }
}
