use colored::Colorize;

use ar_run::{Request, Response, RunTracker, TrackerConfig};

pub fn run(
    config: TrackerConfig,
    len: Option<usize>,
    seed: Option<u64>,
    json: bool,
) -> Result<(), String> {
    let tracker = RunTracker::new(config);
    let count = len.unwrap_or(tracker.config().roster.len());
    let response = tracker.handle(Request::ShuffleCharacters { len: count, seed });

    if json {
        let out = serde_json::to_string(&response).map_err(|e| e.to_string())?;
        println!("{out}");
    }

    let (order, seed) = match response {
        Response::Shuffle { order, seed } => (order, seed),
        Response::Rejected(failure) => return Err(failure.message),
        Response::State(_) => return Err("shuffle did not produce an order".into()),
    };
    if json {
        return Ok(());
    }

    println!("  {} {}", "Shuffled".bold(), format!("(seed={seed})").dimmed());
    println!();
    if len.is_some() {
        let indices: Vec<String> = order.iter().map(usize::to_string).collect();
        println!("  {}", indices.join(" "));
    } else {
        let names = ar_shuffle::permute(&tracker.config().roster, &order);
        for (i, name) in names.iter().enumerate() {
            println!("  {:>2}. {name}", i + 1);
        }
    }
    Ok(())
}
