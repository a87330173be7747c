//! HTTP clients and bounded response helpers.
//!
//! JSON calls go through a `ureq` agent. Multipart uploads use a blocking
//! `reqwest` client with the same timeouts.

use std::io::{self, Read};
use std::time::Duration;

/// Timeouts applied to every request made through an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct HttpTimeouts {
    pub connect: Duration,
    /// Used for both reading the response and writing the request body.
    pub io: Duration,
}

/// Build an agent with consistent timeouts.
pub(crate) fn agent(timeouts: HttpTimeouts) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(timeouts.connect)
        .timeout_read(timeouts.io)
        .timeout_write(timeouts.io)
        .build()
}

/// Build a blocking upload client with the same timeouts as [`agent`].
pub(crate) fn upload_client(
    timeouts: HttpTimeouts,
) -> Result<reqwest::blocking::Client, reqwest::Error> {
    reqwest::blocking::Client::builder()
        .connect_timeout(timeouts.connect)
        .timeout(timeouts.io)
        .build()
}

/// Read a response into memory, enforcing a maximum byte size.
pub(crate) fn read_response_bytes(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    let declared = response
        .header("Content-Length")
        .and_then(|length| length.parse::<u64>().ok());
    read_limited(response.into_reader(), declared, max_bytes)
}

/// Read an upload response body as lossy UTF-8 text, bounded like [`read_response_bytes`].
pub(crate) fn read_upload_response_text(
    response: reqwest::blocking::Response,
    max_bytes: usize,
) -> Result<String, io::Error> {
    let declared = response.content_length();
    let bytes = read_limited(response, declared, max_bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_limited(
    reader: impl Read,
    declared: Option<u64>,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    if let Some(length) = declared.filter(|length| *length > max_bytes as u64) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response too large: {length} bytes"),
        ));
    }
    let mut limited = reader.take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response exceeded {max_bytes} bytes"),
        ));
    }
    Ok(bytes)
}

/// Read a response body as lossy UTF-8 text, bounded like [`read_response_bytes`].
pub(crate) fn read_response_text(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<String, io::Error> {
    let bytes = read_response_bytes(response, max_bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
