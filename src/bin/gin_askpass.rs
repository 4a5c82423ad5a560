//! `GIT_ASKPASS` helper.
//!
//! Single-shot proxy client: git runs this with the prompt text as its
//! argument, the helper forwards it to the host session and prints the
//! answered secret on stdout. Exit code 0 means the secret was provided;
//! 1 means the host failed or the user cancelled.

use gin_buffers::proxy::{client, Request, Response};
use std::process::ExitCode;

fn main() -> ExitCode {
    let prompt = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    match client::round_trip(&Request::askpass(prompt)) {
        Ok(Response::Ok(secret)) => {
            println!("{secret}");
            ExitCode::SUCCESS
        }
        Ok(Response::Err(message)) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
        Ok(Response::Cancel) => {
            eprintln!("prompt cancelled");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
