//! Ingest URI derivation.
//!
//! The platform hands back an upload endpoint addressed as a web URL.
//! Publishers expect an RTMP URI on a fixed port, so the scheme and port are
//! replaced and everything else is carried over verbatim.
//!
//! Upload URLs are signed, so the rewrite works on the raw string. `url` is
//! only used to validate the input; its serialization normalizes hosts,
//! paths, and queries, which would change what the signature covers.

use std::fmt;

use url::Url;

use crate::error::IngestUrlError;

/// Scheme every ingest URI uses.
pub const INGEST_SCHEME: &str = "rtmp";

/// Where a broadcaster publishes audio and video.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IngestUri {
    serialization: String,
    host_start: usize,
    host_end: usize,
    path_start: usize,
    port: u16,
}

impl IngestUri {
    /// Rewrite `upload_url` to the ingest scheme on `port`.
    ///
    /// User info, host, path, query, and fragment are copied byte for byte.
    /// Fails if `upload_url` contains characters a URI cannot carry, or is
    /// not an absolute URL with a host.
    pub fn from_upload_url(upload_url: &str, port: u16) -> Result<Self, IngestUrlError> {
        check_uri_characters(upload_url)?;

        let parsed = Url::parse(upload_url)?;
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(IngestUrlError::MissingHost);
        }

        // `https:host/path` parses for special schemes but has no authority.
        let (_, hierarchy) = upload_url
            .split_once(':')
            .ok_or(IngestUrlError::MissingHost)?;
        let after_slashes = hierarchy
            .strip_prefix("//")
            .ok_or(IngestUrlError::MissingHost)?;

        let authority_end = after_slashes
            .find(|c: char| matches!(c, '/' | '?' | '#'))
            .unwrap_or(after_slashes.len());
        let (authority, rest) = after_slashes.split_at(authority_end);

        let (userinfo, host_port) = match authority.rfind('@') {
            Some(at) => authority.split_at(at + 1),
            None => ("", authority),
        };
        let host = if host_port.starts_with('[') {
            host_port
                .find(']')
                .map_or(host_port, |close| &host_port[..=close])
        } else {
            host_port
                .split_once(':')
                .map_or(host_port, |(host, _)| host)
        };
        if host.is_empty() {
            return Err(IngestUrlError::MissingHost);
        }

        let host_start = INGEST_SCHEME.len() + "://".len() + userinfo.len();
        let host_end = host_start + host.len();
        let serialization = format!("{INGEST_SCHEME}://{userinfo}{host}:{port}{rest}");
        let path_start = serialization.len() - rest.len();

        Ok(Self {
            serialization,
            host_start,
            host_end,
            path_start,
            port,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.serialization
    }

    pub fn scheme(&self) -> &str {
        INGEST_SCHEME
    }

    /// The host as written in the upload URL, brackets included for IPv6.
    pub fn host_str(&self) -> &str {
        &self.serialization[self.host_start..self.host_end]
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path(&self) -> &str {
        let tail = &self.serialization[self.path_start..];
        let end = tail.find(|c: char| matches!(c, '?' | '#')).unwrap_or(tail.len());
        &tail[..end]
    }

    pub fn query(&self) -> Option<&str> {
        let tail = &self.serialization[self.path_start..];
        let tail = tail.split_once('#').map_or(tail, |(before, _)| before);
        tail.split_once('?').map(|(_, query)| query)
    }
}

/// Rejects anything outside the RFC 3986 character set, and malformed
/// percent escapes.
fn check_uri_characters(uri: &str) -> Result<(), IngestUrlError> {
    let bytes = uri.as_bytes();
    for (index, character) in uri.char_indices() {
        match character {
            '%' => {
                let escape = bytes.get(index + 1..index + 3);
                if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                    return Err(IngestUrlError::InvalidEscape { index });
                }
            }
            c if c.is_ascii_alphanumeric() => {}
            '-' | '.' | '_' | '~' => {}
            ':' | '/' | '?' | '#' | '[' | ']' | '@' => {}
            '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=' => {}
            _ => return Err(IngestUrlError::InvalidCharacter { character, index }),
        }
    }
    Ok(())
}

impl fmt::Display for IngestUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialization)
    }
}

impl AsRef<str> for IngestUri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<IngestUri> for String {
    fn from(uri: IngestUri) -> Self {
        uri.serialization
    }
}
