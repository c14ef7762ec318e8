//! Broadcast lifecycle: create, start, and end against a platform session.

use tracing::{debug, error, info, instrument, warn};

use livecast_ipc::{BroadcastId, LifecycleConfig, StartPhase};
use livecast_session::{PlatformRequest, SessionClient};

use crate::error::LifecycleError;
use crate::ingest::IngestUri;
use crate::requests::{CreateBroadcastRequest, EndBroadcastRequest, StartBroadcastRequest};
use crate::LifecycleResult;

/// A broadcast that was created and is ready to receive a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveBroadcast {
    /// Id to pass to [`BroadcastLifecycle::end`] later.
    pub broadcast_id: BroadcastId,

    /// Where to publish.
    pub ingest_uri: IngestUri,

    /// Whether the platform acknowledged the start request.
    pub confirmed: bool,
}

/// Runs broadcast lifecycle operations against a session.
///
/// Holds no per-broadcast state. Every call fetches its own token from the
/// session and derives everything else from its arguments. Calls on the
/// same session must be serialized by the caller.
#[derive(Debug, Clone, Default)]
pub struct BroadcastLifecycle {
    config: LifecycleConfig,
}

impl BroadcastLifecycle {
    /// Create a lifecycle with the given configuration.
    pub fn new(config: LifecycleConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Create a broadcast, start it, and resolve its ingest URI.
    ///
    /// A token failure or a failed create aborts before anything else is
    /// sent. A failed start confirmation is logged and the ingest URI is
    /// still returned, with [`LiveBroadcast::confirmed`] unset.
    ///
    /// An error does not mean nothing exists on the platform: when
    /// [`LifecycleError::broadcast_id`] is set, the broadcast was created and
    /// ending it is up to the caller.
    #[instrument(name = "start_broadcast", skip_all)]
    pub fn start<S: SessionClient>(&self, session: &S) -> LifecycleResult<LiveBroadcast> {
        let csrf_token = acquire_token(session)?;

        let create = CreateBroadcastRequest::new(session.device_id(), &csrf_token, &self.config);
        let created = send_request(session, &create).map_err(|e| {
            error!(error = %e, "Error occurred while creating broadcast");
            e
        })?;

        if created.broadcast_id.is_empty() {
            return Err(incomplete(create.name(), "broadcast_id", None));
        }
        if !created.broadcast_id.is_path_safe() {
            let e = LifecycleError::InvalidBroadcastId(created.broadcast_id);
            error!(error = %e, "Platform returned an unusable broadcast id");
            return Err(e);
        }
        if created.upload_url.is_empty() {
            return Err(incomplete(
                create.name(),
                "upload_url",
                Some(created.broadcast_id),
            ));
        }
        info!(broadcast_id = %created.broadcast_id, "Broadcast created");

        let start = StartBroadcastRequest::new(
            session.device_id(),
            &csrf_token,
            created.broadcast_id.clone(),
        );
        // Not fatal: the ingest URI is returned either way.
        let confirmed = match send_request(session, &start) {
            Ok(_) => true,
            Err(e) => {
                warn!(
                    phase = StartPhase::ConfirmStart.name(),
                    broadcast_id = %created.broadcast_id,
                    error = %e,
                    "Continuing without start confirmation"
                );
                false
            }
        };

        let ingest_uri = IngestUri::from_upload_url(&created.upload_url, self.config.ingest_port)
            .map_err(|source| {
                let e = LifecycleError::IngestUrl {
                    broadcast_id: created.broadcast_id.clone(),
                    url: created.upload_url.clone(),
                    source,
                };
                error!(error = %e, "Error occurred while resolving the ingest URI");
                e
            })?;

        info!(
            broadcast_id = %created.broadcast_id,
            ingest_uri = %ingest_uri,
            confirmed,
            "Broadcast ready for ingest"
        );

        Ok(LiveBroadcast {
            broadcast_id: created.broadcast_id,
            ingest_uri,
            confirmed,
        })
    }

    /// Ask the platform to end `broadcast_id`.
    ///
    /// Fire and forget: failures are logged and swallowed, nothing is
    /// retried. The broadcast need not have been started by this process.
    #[instrument(name = "end_broadcast", skip_all, fields(broadcast_id = %broadcast_id))]
    pub fn end<S: SessionClient>(&self, session: &S, broadcast_id: &BroadcastId) {
        if !broadcast_id.is_path_safe() {
            warn!("Refusing to end a broadcast with an unusable id");
            return;
        }

        let Ok(csrf_token) = acquire_token(session) else {
            return;
        };

        let request = EndBroadcastRequest::new(
            session.user_id(),
            session.device_id(),
            &csrf_token,
            broadcast_id.clone(),
        );
        match send_request(session, &request) {
            Ok(_) => info!("End of broadcast requested"),
            Err(e) => warn!(error = %e, "End of broadcast was not acknowledged"),
        }
    }
}

fn acquire_token<S: SessionClient>(session: &S) -> LifecycleResult<String> {
    session.fetch_or_get_csrf_token().map_err(|e| {
        error!(error = %e, "Error occurred during request for CSRF token");
        LifecycleError::TokenAcquisition(e)
    })
}

/// Every remote exchange goes through here, so a session error always
/// reaches lifecycle code as a [`LifecycleError::RemoteExchange`].
///
/// Failures are only traced here; the caller decides whether they are fatal
/// and logs them at the matching level.
fn send_request<S, R>(session: &S, request: &R) -> LifecycleResult<R::Response>
where
    S: SessionClient,
    R: PlatformRequest,
{
    session.send_request(request).map_err(|source| {
        debug!(
            operation = request.name(),
            endpoint = %request.endpoint(),
            error = %source,
            "Request failed"
        );
        LifecycleError::RemoteExchange {
            operation: request.name(),
            source,
        }
    })
}

fn incomplete(
    operation: &'static str,
    field: &'static str,
    broadcast_id: Option<BroadcastId>,
) -> LifecycleError {
    let e = LifecycleError::IncompleteResponse {
        operation,
        field,
        broadcast_id,
    };
    error!(error = %e, "Platform returned an incomplete response");
    e
}
