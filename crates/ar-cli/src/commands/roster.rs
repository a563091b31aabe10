use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use ar_run::TrackerConfig;

pub fn run(config: &TrackerConfig) -> Result<(), String> {
    println!(
        "  {} ({} characters)",
        "Roster".bold(),
        config.roster.len()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Character"]);
    for (i, name) in config.roster.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), name.clone()]);
    }

    println!("{table}");
    if let Some(seed) = config.seed {
        println!("  Fixed seed: {seed}");
    }
    Ok(())
}
