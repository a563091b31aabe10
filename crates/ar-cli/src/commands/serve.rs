use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use ar_run::{RunTracker, TrackerConfig};

/// Answer one JSON request per input line until EOF.
pub fn run(config: TrackerConfig) -> Result<(), String> {
    let tracker = RunTracker::new(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    info!("serving requests on stdin");
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| e.to_string())?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let response = tracker.handle_json(input);
        debug!(ok = response.is_ok(), "request handled");
        let encoded = serde_json::to_string(&response).map_err(|e| e.to_string())?;
        writeln!(out, "{encoded}").map_err(|e| e.to_string())?;
        out.flush().map_err(|e| e.to_string())?;
    }
    info!("input closed, stopping");
    Ok(())
}
