//! Local IPC proxy for interactive git prompts.
//!
//! When a spawned `git` subprocess needs a credential or an editor session,
//! it runs the helper executables this crate installs as `GIT_ASKPASS` /
//! `GIT_EDITOR`. The helpers connect back to the host over a loopback TCP
//! socket and the host answers through [`PromptHost`].

pub mod client;
pub mod frame;
pub mod server;

pub use frame::{Request, RequestKind, Response, PROXY_ADDRESS_VAR};
pub use server::{EditOutcome, EditSignal, PromptHost, ProxyConfig, ProxyServer};
