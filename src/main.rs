mod attendance;
mod chat;
mod ipc;
mod report;
mod roster;
mod tasks;
mod validate;

use std::io::{self, BufRead, Write};

use attendance::{FixedRecognizer, Recognizer, UniformRecognizer};
use chat::ChatClient;

// PORTALD_RECOGNIZED_FACES pins the mock recognizer so protocol-level tests
// stay deterministic.
fn recognizer_from_env() -> Box<dyn Recognizer> {
    match std::env::var("PORTALD_RECOGNIZED_FACES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
    {
        Some(n) => Box::new(FixedRecognizer(n)),
        None => Box::new(UniformRecognizer),
    }
}

fn main() {
    // Diagnostics go to stderr; stdout carries the protocol.
    env_logger::init();

    let mut state = ipc::AppState::seeded(recognizer_from_env(), ChatClient::from_env());
    log::info!(
        "portald {} ready ({} students, {} users)",
        env!("CARGO_PKG_VERSION"),
        state.attendance.roster().len(),
        state.users.len()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id; ignore.
                let _ = writeln!(
                    stdout,
                    "{{\"ok\":false,\"error\":{{\"code\":\"bad_json\",\"message\":\"{}\"}}}}",
                    e
                );
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
}
