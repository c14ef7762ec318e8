//! Platform session contract.
//!
//! The lifecycle engine never talks HTTP itself. It goes through a
//! [`SessionClient`], which owns login state, the anti-forgery token cache,
//! request signing, and transport. This crate defines that contract, the
//! errors a session can report, and (behind the `mock` feature) a scripted
//! session for tests.

mod client;
mod error;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use client::{PlatformRequest, SessionClient};
pub use error::SessionError;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
