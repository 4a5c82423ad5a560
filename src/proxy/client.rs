//! Helper-side proxy client.
//!
//! The askpass and editor helpers are single-shot clients: read the proxy
//! address from the environment, connect, write one request frame,
//! half-close, block on one response frame, exit.

use crate::core::error::{GinBuffersError, Result};
use crate::proxy::frame::{Request, Response, PROXY_ADDRESS_VAR};
use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream};

/// Resolve the proxy address published by the host session.
pub fn proxy_address() -> Result<String> {
    let raw = std::env::var(PROXY_ADDRESS_VAR).map_err(|_| {
        GinBuffersError::ProxyAddressMissing {
            var: PROXY_ADDRESS_VAR.to_string(),
        }
    })?;
    let addr: String = serde_json::from_str(&raw)?;
    Ok(addr)
}

/// Perform one request/response round trip against the proxy.
pub fn round_trip(request: &Request) -> Result<Response> {
    let addr = proxy_address()?;
    let mut stream = TcpStream::connect(&addr)?;
    stream.write_all(request.encode().as_bytes())?;
    // Half-close so the proxy's read side sees EOF after the single frame.
    stream.shutdown(Shutdown::Write)?;

    let mut frame = String::new();
    stream.read_to_string(&mut frame)?;
    Response::parse(&frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test because the assertions share one process-wide variable.
    #[test]
    fn test_proxy_address_resolution() {
        std::env::remove_var(PROXY_ADDRESS_VAR);
        assert!(matches!(
            proxy_address(),
            Err(GinBuffersError::ProxyAddressMissing { .. })
        ));

        std::env::set_var(PROXY_ADDRESS_VAR, "127.0.0.1:4242");
        assert!(matches!(proxy_address(), Err(GinBuffersError::Json(_))));

        std::env::set_var(PROXY_ADDRESS_VAR, "\"127.0.0.1:4242\"");
        assert_eq!(proxy_address().expect("valid address"), "127.0.0.1:4242");

        std::env::remove_var(PROXY_ADDRESS_VAR);
    }
}
