//! Loopback TCP proxy bridging git's prompt helpers to the host.
//!
//! This module defines [`ProxyServer`] which listens on an OS-assigned
//! loopback port for the two short-lived helper executables git spawns in
//! place of its own prompts (`GIT_ASKPASS`, `GIT_EDITOR`). Each helper makes
//! exactly one connection, sends one request frame, and blocks on one
//! response frame.
//!
//! # Public API
//! - [`ProxyServer`]: Listener lifecycle and git environment wiring
//! - [`PromptHost`]: Host-side callbacks answering prompts
//! - [`EditSignal`] / [`EditOutcome`]: One-shot accept/cancel signal for the
//!   interactive edit session
//! - [`ProxyConfig`]: Wiring switches and the edit-session timeout
//!
//! # Connection Handling
//! The accept loop runs on its own thread and hands every connection to a
//! fresh thread, so a helper blocked on a long edit session never delays
//! another helper. A malformed or unknown leading frame closes that
//! connection without a response; the listener is unaffected. The listener
//! lives for the host session and is reclaimed at process exit.

use crate::core::error::{GinBuffersError, Result};
use crate::proxy::frame::{Request, RequestKind, Response, PROXY_ADDRESS_VAR};
use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, SyncSender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How the host concluded an interactive edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Accepted,
    Cancelled,
}

/// One-shot signal the host invokes when an edit session concludes.
///
/// Consuming the signal twice is impossible by construction; dropping it
/// without signaling lets the waiting connection time out.
pub struct EditSignal {
    tx: SyncSender<EditOutcome>,
}

impl EditSignal {
    pub fn accept(self) {
        let _ = self.tx.send(EditOutcome::Accepted);
    }

    pub fn cancel(self) {
        let _ = self.tx.send(EditOutcome::Cancelled);
    }
}

/// Host-side prompt callbacks.
///
/// `ask_secret` returns the secret for an askpass prompt, or an error when
/// the user cancels (a cancel surfaces to git as `err`, not as a separate
/// status). `begin_edit` opens the file in an interactive editing surface
/// and must eventually fire `done`; the connection waits on it.
pub trait PromptHost: Send + Sync {
    fn ask_secret(&self, prompt: &str) -> Result<String>;
    fn begin_edit(&self, path: &Path, done: EditSignal) -> Result<()>;
}

/// Proxy wiring configuration.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Point `GIT_ASKPASS` at the askpass helper.
    pub wire_askpass: bool,
    /// Point `GIT_EDITOR` at the editor helper.
    pub wire_editor: bool,
    /// Upper bound on one interactive edit session, so a host that dies
    /// mid-edit cannot leave the helper process blocked forever.
    pub edit_timeout: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            wire_askpass: true,
            wire_editor: true,
            edit_timeout: Duration::from_secs(600),
        }
    }
}

/// The running proxy listener.
pub struct ProxyServer {
    addr: SocketAddr,
    config: ProxyConfig,
}

impl ProxyServer {
    /// Bind the loopback listener and start serving connections.
    pub fn start(host: Arc<dyn PromptHost>) -> Result<Self> {
        Self::start_with_config(host, ProxyConfig::default())
    }

    pub fn start_with_config(host: Arc<dyn PromptHost>, config: ProxyConfig) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        log::debug!("prompt proxy listening on {addr}");

        let edit_timeout = config.edit_timeout;
        thread::spawn(move || {
            for stream in listener.incoming() {
                match stream {
                    Ok(stream) => {
                        let host = Arc::clone(&host);
                        thread::spawn(move || handle_connection(stream, host, edit_timeout));
                    }
                    Err(e) => log::warn!("prompt proxy accept failed: {e}"),
                }
            }
        });

        Ok(Self { addr, config })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Environment variables to inject into spawned git commands:
    /// the JSON-encoded proxy address, plus `GIT_ASKPASS`/`GIT_EDITOR`
    /// pointing at the helper executables unless disabled by configuration.
    pub fn git_env(&self) -> Result<Vec<(String, String)>> {
        let mut env = vec![(
            PROXY_ADDRESS_VAR.to_string(),
            serde_json::to_string(&self.addr.to_string())?,
        )];
        if self.config.wire_askpass {
            env.push((
                "GIT_ASKPASS".to_string(),
                helper_path("gin-askpass")?.to_string_lossy().into_owned(),
            ));
        }
        if self.config.wire_editor {
            env.push((
                "GIT_EDITOR".to_string(),
                helper_path("gin-editor")?.to_string_lossy().into_owned(),
            ));
        }
        Ok(env)
    }
}

/// Helper executables are installed next to the host binary.
fn helper_path(name: &str) -> Result<PathBuf> {
    let mut path = std::env::current_exe()?;
    path.set_file_name(format!("{name}{}", std::env::consts::EXE_SUFFIX));
    Ok(path)
}

fn handle_connection(mut stream: TcpStream, host: Arc<dyn PromptHost>, edit_timeout: Duration) {
    // The helper half-closes its write side after the single frame, so
    // reading to EOF yields exactly that frame.
    let mut frame = String::new();
    if let Err(e) = stream.read_to_string(&mut frame) {
        log::debug!("prompt proxy read failed: {e}");
        return;
    }

    let request = match Request::parse(&frame) {
        Ok(request) => request,
        Err(e) => {
            // Fatal for this connection only: close without a response.
            log::debug!("dropping proxy connection: {e}");
            return;
        }
    };

    let response = match request.kind {
        RequestKind::Askpass => match host.ask_secret(&request.payload) {
            Ok(secret) => Response::Ok(secret),
            Err(e) => Response::Err(e.to_string()),
        },
        RequestKind::Editor => handle_edit(&host, &request.payload, edit_timeout),
    };

    if let Err(e) = stream.write_all(response.encode().as_bytes()) {
        log::debug!("prompt proxy write failed: {e}");
    }
}

fn handle_edit(host: &Arc<dyn PromptHost>, file: &str, timeout: Duration) -> Response {
    let (tx, rx) = mpsc::sync_channel(1);
    if let Err(e) = host.begin_edit(Path::new(file), EditSignal { tx }) {
        return Response::Err(e.to_string());
    }

    match rx.recv_timeout(timeout) {
        Ok(EditOutcome::Accepted) => Response::Ok(String::new()),
        Ok(EditOutcome::Cancelled) => {
            // A cancelled edit must leave git an empty file, the same way
            // aborting a commit message does.
            match fs::write(file, b"") {
                Ok(()) => Response::Cancel,
                Err(e) => Response::Err(e.to_string()),
            }
        }
        Err(_) => Response::Err(GinBuffersError::EditSessionTimeout.to_string()),
    }
}
