//! Error types for the lifecycle module.

use thiserror::Error;

use livecast_ipc::{BroadcastId, StartPhase};
use livecast_session::SessionError;

/// Why an upload URL could not be turned into an ingest URI.
#[derive(Debug, Error)]
pub enum IngestUrlError {
    /// Not a structurally valid absolute URL.
    #[error("Invalid URL: {0}")]
    Parse(#[from] url::ParseError),

    /// A character that cannot appear in a URI.
    #[error("Illegal character {character:?} at index {index}")]
    InvalidCharacter { character: char, index: usize },

    /// A `%` not followed by two hex digits.
    #[error("Malformed escape at index {index}")]
    InvalidEscape { index: usize },

    /// Parsed, but there is nothing to connect to.
    #[error("URL has no host")]
    MissingHost,
}

/// Errors that can occur during a broadcast lifecycle operation.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The session could not produce an anti-forgery token.
    #[error("Token acquisition failed: {0}")]
    TokenAcquisition(#[source] SessionError),

    /// A request to the platform failed.
    #[error("{operation} request failed: {source}")]
    RemoteExchange {
        operation: &'static str,
        #[source]
        source: SessionError,
    },

    /// The platform answered but left out a required field.
    #[error("{operation} response has no {field}")]
    IncompleteResponse {
        operation: &'static str,
        field: &'static str,
        broadcast_id: Option<BroadcastId>,
    },

    /// The platform returned an id that cannot be used as a path segment.
    #[error("Broadcast id '{0}' is not a valid path segment")]
    InvalidBroadcastId(BroadcastId),

    /// The upload URL could not be rewritten into an ingest URI.
    #[error("Cannot derive ingest URI from {url:?}: {source}")]
    IngestUrl {
        broadcast_id: BroadcastId,
        url: String,
        #[source]
        source: IngestUrlError,
    },
}

impl LifecycleError {
    /// The start phase this error aborts.
    ///
    /// Never [`StartPhase::ConfirmStart`]: a failed confirmation does not
    /// abort a start.
    pub fn start_phase(&self) -> StartPhase {
        match self {
            Self::TokenAcquisition(_) => StartPhase::AcquireToken,
            Self::RemoteExchange { .. }
            | Self::IncompleteResponse { .. }
            | Self::InvalidBroadcastId(_) => StartPhase::CreateBroadcast,
            Self::IngestUrl { .. } => StartPhase::ResolveIngest,
        }
    }

    /// Id of a broadcast that exists on the platform despite the failure.
    ///
    /// Callers should end it if they are not going to publish to it.
    pub fn broadcast_id(&self) -> Option<&BroadcastId> {
        match self {
            Self::IncompleteResponse { broadcast_id, .. } => broadcast_id.as_ref(),
            Self::IngestUrl { broadcast_id, .. } => Some(broadcast_id),
            Self::TokenAcquisition(_)
            | Self::RemoteExchange { .. }
            | Self::InvalidBroadcastId(_) => None,
        }
    }
}
