use std::path::Path;

use colored::Colorize;

use shiny_core::estimate;

pub fn run(dir: Option<&Path>) -> Result<(), String> {
    let store = super::open_store(dir)?;
    let hunt = super::current(&store)?;
    let odds = estimate(&hunt.settings);

    println!("  {} {} ({})", "Hunt:".bold(), hunt.title, hunt.short_id());
    println!("  {}", super::describe_settings(&hunt.settings));
    println!(
        "  Started: {}",
        hunt.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("  Attempts: {}", hunt.attempt_counter);
    println!(
        "  Odds: 1 in {} ({} per attempt)",
        super::format_one_in(odds.one_in),
        super::format_percent(odds.probability)
    );
    println!(
        "  Chance so far: {}",
        super::format_percent(odds.chance_within(hunt.attempt_counter)).yellow()
    );
    println!("  Archived hunts: {}", store.sessions().len());

    Ok(())
}
