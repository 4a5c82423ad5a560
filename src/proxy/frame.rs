//! Wire frames for the prompt proxy protocol.
//!
//! A request is `"<kind>:<payload>"` with kind in {`askpass`, `editor`}; a
//! response is `"<status>:<value>"` with status in {`ok`, `err`, `cancel`}.
//! Frames are newline-free and sent as a single write; framing relies on
//! one-shot connection semantics (a half-close / EOF delimits the frame in
//! each direction).

use crate::core::error::{GinBuffersError, Result};

/// Environment variable carrying the JSON-encoded proxy socket address.
pub const PROXY_ADDRESS_VAR: &str = "GIN_PROXY_ADDRESS";

/// What a connecting helper is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Askpass,
    Editor,
}

impl RequestKind {
    fn as_str(self) -> &'static str {
        match self {
            RequestKind::Askpass => "askpass",
            RequestKind::Editor => "editor",
        }
    }
}

/// One request frame: the kind plus its payload (prompt text for askpass,
/// file path for editor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub kind: RequestKind,
    pub payload: String,
}

impl Request {
    pub fn askpass(prompt: impl Into<String>) -> Self {
        Self {
            kind: RequestKind::Askpass,
            payload: prompt.into(),
        }
    }

    pub fn editor(file: impl Into<String>) -> Self {
        Self {
            kind: RequestKind::Editor,
            payload: file.into(),
        }
    }

    pub fn encode(&self) -> String {
        format!("{}:{}", self.kind.as_str(), self.payload)
    }

    /// Parse a leading frame. A frame without a `<ident>:` prefix is
    /// malformed; an identifier other than the two known kinds is an
    /// unknown-kind error. Both are fatal for the connection only.
    pub fn parse(frame: &str) -> Result<Self> {
        let (kind, payload) = frame
            .split_once(':')
            .ok_or_else(|| GinBuffersError::malformed_frame(frame))?;
        if kind.is_empty() || !kind.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(GinBuffersError::malformed_frame(frame));
        }
        match kind {
            "askpass" => Ok(Request::askpass(payload)),
            "editor" => Ok(Request::editor(payload)),
            other => Err(GinBuffersError::unknown_request_kind(other)),
        }
    }
}

/// One response frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Ok(String),
    Err(String),
    Cancel,
}

impl Response {
    pub fn encode(&self) -> String {
        match self {
            Response::Ok(value) => format!("ok:{value}"),
            Response::Err(message) => format!("err:{message}"),
            Response::Cancel => "cancel:".to_string(),
        }
    }

    pub fn parse(frame: &str) -> Result<Self> {
        let (status, value) = frame
            .split_once(':')
            .ok_or_else(|| GinBuffersError::malformed_frame(frame))?;
        match status {
            "ok" => Ok(Response::Ok(value.to_string())),
            "err" => Ok(Response::Err(value.to_string())),
            "cancel" => Ok(Response::Cancel),
            _ => Err(GinBuffersError::malformed_frame(frame)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_encode_decode() -> Result<()> {
        let request = Request::askpass("Password for 'https://example.com':");
        let frame = request.encode();
        assert_eq!(frame, "askpass:Password for 'https://example.com':");
        assert_eq!(Request::parse(&frame)?, request);

        let request = Request::editor("/tmp/COMMIT_EDITMSG");
        assert_eq!(Request::parse(&request.encode())?, request);
        Ok(())
    }

    #[test]
    fn test_payload_may_contain_colons() -> Result<()> {
        let request = Request::parse("askpass:user:pass@host:")?;
        assert_eq!(request.payload, "user:pass@host:");
        Ok(())
    }

    #[test]
    fn test_malformed_frame() {
        assert!(matches!(
            Request::parse("no colon in sight"),
            Err(GinBuffersError::MalformedFrame { .. })
        ));
        assert!(matches!(
            Request::parse(":empty kind"),
            Err(GinBuffersError::MalformedFrame { .. })
        ));
        assert!(matches!(
            Request::parse("not an ident!:x"),
            Err(GinBuffersError::MalformedFrame { .. })
        ));
    }

    #[test]
    fn test_unknown_kind() {
        match Request::parse("telnet:whatever") {
            Err(GinBuffersError::UnknownRequestKind { kind }) => assert_eq!(kind, "telnet"),
            other => panic!("expected UnknownRequestKind, got {other:?}"),
        }
    }

    #[test]
    fn test_response_encoding() {
        assert_eq!(Response::Ok("secret".to_string()).encode(), "ok:secret");
        assert_eq!(Response::Ok(String::new()).encode(), "ok:");
        assert_eq!(Response::Err("denied".to_string()).encode(), "err:denied");
        assert_eq!(Response::Cancel.encode(), "cancel:");
    }

    #[test]
    fn test_response_parse() -> Result<()> {
        assert_eq!(Response::parse("ok:secret")?, Response::Ok("secret".to_string()));
        assert_eq!(Response::parse("cancel:")?, Response::Cancel);
        assert!(Response::parse("nope").is_err());
        assert!(Response::parse("weird:x").is_err());
        Ok(())
    }
}
