//! `GIT_EDITOR` helper.
//!
//! Single-shot proxy client: git runs this with the file to edit as its
//! argument and blocks until the helper exits. The helper forwards the
//! filename to the host session and waits for the interactive edit to
//! conclude. Exit code 0 means the edit was accepted; 1 means it was
//! cancelled (the host already truncated the file) or failed.

use gin_buffers::proxy::{client, Request, Response};
use std::process::ExitCode;

fn main() -> ExitCode {
    let file = match std::env::args().nth(1) {
        Some(file) => file,
        None => {
            eprintln!("usage: gin-editor <file>");
            return ExitCode::FAILURE;
        }
    };

    match client::round_trip(&Request::editor(file)) {
        Ok(Response::Ok(_)) => ExitCode::SUCCESS,
        Ok(Response::Cancel) => ExitCode::FAILURE,
        Ok(Response::Err(message)) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
