//! The session contract the lifecycle engine is written against.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::SessionResult;

/// A typed request to the platform's private API.
///
/// Requests are always sent as signed POSTs; the session owns signing and
/// the wire encoding of [`PlatformRequest::payload`].
pub trait PlatformRequest {
    /// Body sent with the request.
    type Payload: Serialize;

    /// Shape of a successful response body.
    type Response: DeserializeOwned;

    /// Operation name used in logs.
    fn name(&self) -> &'static str;

    /// API path relative to the platform's base URL, e.g. `live/create/`.
    fn endpoint(&self) -> String;

    /// The request body.
    fn payload(&self) -> &Self::Payload;
}

/// An authenticated session with the platform.
///
/// Implementations own the login state, the token cache, and the HTTP
/// transport. Callers only read from the session and issue requests through
/// it.
pub trait SessionClient {
    /// Stable per-device identifier sent as `_uuid`.
    fn device_id(&self) -> &str;

    /// Numeric id of the logged-in user.
    fn user_id(&self) -> u64;

    /// Returns the cached anti-forgery token, fetching it first if needed.
    fn fetch_or_get_csrf_token(&self) -> SessionResult<String>;

    /// Sends `request` and decodes its response.
    fn send_request<R: PlatformRequest>(&self, request: &R) -> SessionResult<R::Response>;
}

impl<S: SessionClient + ?Sized> SessionClient for &S {
    fn device_id(&self) -> &str {
        (**self).device_id()
    }

    fn user_id(&self) -> u64 {
        (**self).user_id()
    }

    fn fetch_or_get_csrf_token(&self) -> SessionResult<String> {
        (**self).fetch_or_get_csrf_token()
    }

    fn send_request<R: PlatformRequest>(&self, request: &R) -> SessionResult<R::Response> {
        (**self).send_request(request)
    }
}
