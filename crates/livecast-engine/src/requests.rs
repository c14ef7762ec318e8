//! Wire shapes of the three live broadcast requests.
//!
//! Field names and fixed values are the platform's contract and must not
//! change. All values are sent as strings.

use serde::{Deserialize, Serialize};

use livecast_ipc::{BroadcastId, LifecycleConfig};
use livecast_session::PlatformRequest;

/// Transport tag sent as `broadcast_type`.
pub const BROADCAST_TYPE: &str = "RTMP";

const INTERNAL_ONLY: &str = "0";
const SEND_NOTIFICATIONS: &str = "1";

/// Body of `live/create/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateBroadcastPayload {
    #[serde(rename = "_uuid")]
    pub uuid: String,
    #[serde(rename = "_csrftoken")]
    pub csrf_token: String,
    pub preview_height: String,
    pub preview_width: String,
    pub broadcast_message: String,
    pub broadcast_type: String,
    pub internal_only: String,
}

/// Successful answer to `live/create/`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBroadcastResult {
    pub broadcast_id: BroadcastId,
    pub upload_url: String,
}

/// Creates a broadcast resource.
#[derive(Debug, Clone)]
pub struct CreateBroadcastRequest {
    payload: CreateBroadcastPayload,
}

impl CreateBroadcastRequest {
    pub fn new(device_id: &str, csrf_token: &str, config: &LifecycleConfig) -> Self {
        Self {
            payload: CreateBroadcastPayload {
                uuid: device_id.to_string(),
                csrf_token: csrf_token.to_string(),
                preview_height: config.preview_height.to_string(),
                preview_width: config.preview_width.to_string(),
                broadcast_message: config.broadcast_message.clone(),
                broadcast_type: BROADCAST_TYPE.to_string(),
                internal_only: INTERNAL_ONLY.to_string(),
            },
        }
    }
}

impl PlatformRequest for CreateBroadcastRequest {
    type Payload = CreateBroadcastPayload;
    type Response = CreateBroadcastResult;

    fn name(&self) -> &'static str {
        "create_broadcast"
    }

    fn endpoint(&self) -> String {
        "live/create/".to_string()
    }

    fn payload(&self) -> &CreateBroadcastPayload {
        &self.payload
    }
}

/// Body of `live/{id}/start/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartBroadcastPayload {
    #[serde(rename = "_uuid")]
    pub uuid: String,
    #[serde(rename = "_csrftoken")]
    pub csrf_token: String,
    pub should_send_notifications: String,
}

/// Acknowledgement returned by start and end.
///
/// The body carries nothing the lifecycle depends on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BroadcastAck {
    #[serde(default)]
    pub status: Option<String>,
}

/// Starts a created broadcast, notifying followers.
#[derive(Debug, Clone)]
pub struct StartBroadcastRequest {
    broadcast_id: BroadcastId,
    payload: StartBroadcastPayload,
}

impl StartBroadcastRequest {
    pub fn new(device_id: &str, csrf_token: &str, broadcast_id: BroadcastId) -> Self {
        Self {
            broadcast_id,
            payload: StartBroadcastPayload {
                uuid: device_id.to_string(),
                csrf_token: csrf_token.to_string(),
                should_send_notifications: SEND_NOTIFICATIONS.to_string(),
            },
        }
    }
}

impl PlatformRequest for StartBroadcastRequest {
    type Payload = StartBroadcastPayload;
    type Response = BroadcastAck;

    fn name(&self) -> &'static str {
        "start_broadcast"
    }

    fn endpoint(&self) -> String {
        format!("live/{}/start/", self.broadcast_id)
    }

    fn payload(&self) -> &StartBroadcastPayload {
        &self.payload
    }
}

/// Body of `live/{id}/end_broadcast/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndBroadcastPayload {
    #[serde(rename = "_uid")]
    pub uid: String,
    #[serde(rename = "_uuid")]
    pub uuid: String,
    #[serde(rename = "_csrftoken")]
    pub csrf_token: String,
}

/// Ends a broadcast.
#[derive(Debug, Clone)]
pub struct EndBroadcastRequest {
    broadcast_id: BroadcastId,
    payload: EndBroadcastPayload,
}

impl EndBroadcastRequest {
    pub fn new(user_id: u64, device_id: &str, csrf_token: &str, broadcast_id: BroadcastId) -> Self {
        Self {
            broadcast_id,
            payload: EndBroadcastPayload {
                uid: user_id.to_string(),
                uuid: device_id.to_string(),
                csrf_token: csrf_token.to_string(),
            },
        }
    }
}

impl PlatformRequest for EndBroadcastRequest {
    type Payload = EndBroadcastPayload;
    type Response = BroadcastAck;

    fn name(&self) -> &'static str {
        "end_broadcast"
    }

    fn endpoint(&self) -> String {
        format!("live/{}/end_broadcast/", self.broadcast_id)
    }

    fn payload(&self) -> &EndBroadcastPayload {
        &self.payload
    }
}
