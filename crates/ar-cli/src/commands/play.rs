use std::io::{self, BufRead, Write};

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use ar_run::{RunError, RunPhase, RunState, RunTracker, TrackerConfig};

const HELP: &str = "\
Run commands:
  start [seed]        Start a new run over the roster
  done [character]    Complete a character (default: next in queue)
  fail                Mark the run as failed
  reset               Discard the run
  status              Show the run

Portrait commands:
  shuffle [seed]      Shuffle the portrait order
  undo                Restore the order before the last shuffle
  portraits           Show the portrait order

  help                Show this help
  quit                Exit";

/// An interactive session over one run tracker.
///
/// The portrait order and its undo buffer live here, not in the tracker.
pub struct PlaySession {
    tracker: RunTracker,
    portraits: Vec<String>,
    previous: Option<Vec<String>>,
    first_seed: Option<u64>,
}

impl PlaySession {
    pub fn new(config: TrackerConfig, first_seed: Option<u64>) -> Self {
        let portraits = config.roster.clone();
        Self {
            tracker: RunTracker::new(config),
            portraits,
            previous: None,
            first_seed,
        }
    }

    /// Process a line of user input and return the text to show.
    pub fn process(&mut self, input: &str) -> Result<String, String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let (cmd, rest) = match trimmed.split_once(' ') {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (trimmed.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "start" => {
                let seed = parse_seed(rest)?.or_else(|| self.first_seed.take());
                let state = self.tracker.start_default_run(seed).map_err(describe)?;
                Ok(render_run(&state))
            }
            "done" | "complete" => {
                let name = (!rest.is_empty()).then_some(rest);
                let state = self.tracker.complete_character(name).map_err(describe)?;
                Ok(render_run(&state))
            }
            "fail" => {
                let state = self.tracker.fail_run().map_err(describe)?;
                Ok(render_run(&state))
            }
            "reset" => {
                self.tracker.reset_run().map_err(describe)?;
                Ok("Run reset.".to_string())
            }
            "status" => Ok(render_run(&self.tracker.get_run_state())),
            "shuffle" => {
                let seed = self.tracker.resolve_seed(parse_seed(rest)?);
                let order = ar_shuffle::shuffled_indices(self.portraits.len(), seed);
                let shuffled = ar_shuffle::permute(&self.portraits, &order);
                self.previous = Some(std::mem::replace(&mut self.portraits, shuffled));
                Ok(format!(
                    "{} {}\n{}",
                    "Shuffled".bold(),
                    format!("(seed={seed})").dimmed(),
                    self.render_portraits()
                ))
            }
            "undo" => {
                let previous = self.previous.take().ok_or("nothing to undo")?;
                self.portraits = previous;
                Ok(format!("{}\n{}", "Restored.".bold(), self.render_portraits()))
            }
            "portraits" => Ok(self.render_portraits()),
            "help" => Ok(HELP.to_string()),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            _ => Err(format!("unknown command: {cmd} (type 'help')")),
        }
    }

    fn render_portraits(&self) -> String {
        self.portraits
            .iter()
            .enumerate()
            .map(|(i, name)| format!("  {:>2}. {name}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_seed(rest: &str) -> Result<Option<u64>, String> {
    if rest.is_empty() {
        return Ok(None);
    }
    rest.parse()
        .map(Some)
        .map_err(|_| format!("invalid seed: {rest}"))
}

fn describe(err: RunError) -> String {
    format!("{err} ({})", err.kind())
}

/// Completed characters first, then the queue, as the portrait grid shows them.
fn render_run(state: &RunState) -> String {
    let headline = match state.phase() {
        RunPhase::Idle => return "No run in progress. Type 'start' to begin.".to_string(),
        RunPhase::Failed => format!("Run #{} FAILED", state.run_id).red().bold(),
        RunPhase::Active if state.is_finished() => {
            format!("Run #{} complete!", state.run_id).green().bold()
        }
        RunPhase::Active => format!("Run #{}", state.run_id).bold(),
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Character", "Status"]);

    let mut row = 0;
    for name in &state.completed {
        row += 1;
        table.add_row(vec![row.to_string(), name.clone(), "done".to_string()]);
    }
    let next = state.next().filter(|_| !state.failed);
    for name in &state.queue {
        row += 1;
        let status = match (state.failed, next == Some(name.as_str())) {
            (true, _) => "-",
            (false, true) => "next",
            (false, false) => "queued",
        };
        table.add_row(vec![row.to_string(), name.clone(), status.to_string()]);
    }

    format!(
        "{headline}  {}/{} completed ({}%)\n{table}",
        state.completed.len(),
        state.total(),
        state.progress_percent()
    )
}

pub fn run(config: TrackerConfig, seed: Option<u64>) -> Result<(), String> {
    let mut session = PlaySession::new(config, seed);

    println!("  {} Iron Man Run", "Aether".bold());
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.yellow());
            }
        }
    }

    Ok(())
}
