use std::path::Path;

use comfy_table::Table;

use shiny_core::estimate;

const MILESTONES: [f64; 4] = [0.5, 0.75, 0.9, 0.99];

pub fn run(dir: Option<&Path>) -> Result<(), String> {
    let store = super::open_store(dir)?;
    let hunt = super::current(&store)?;
    let odds = estimate(&hunt.settings);

    println!("  {}", super::describe_settings(&hunt.settings));
    println!(
        "  1 in {} ({} per attempt, {} roll(s))",
        super::format_one_in(odds.one_in),
        super::format_percent(odds.probability),
        odds.rolls
    );
    println!("  {}", odds.explanation);
    println!();

    let mut table = Table::new();
    table.set_header(vec!["Chance", "Attempts", "Remaining"]);
    for target in MILESTONES {
        let Some(needed) = odds.attempts_for_chance(target) else {
            continue;
        };
        let remaining = needed.saturating_sub(hunt.attempt_counter);
        table.add_row(vec![
            format!("{:.0}%", target * 100.0),
            needed.to_string(),
            remaining.to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}
