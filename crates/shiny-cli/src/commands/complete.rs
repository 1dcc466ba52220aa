use std::path::Path;

use colored::Colorize;

pub fn run(dir: Option<&Path>) -> Result<(), String> {
    let mut store = super::open_store(dir)?;
    store.complete_current();

    let archived = store
        .sessions()
        .first()
        .ok_or_else(|| "nothing was archived".to_string())?;
    println!(
        "  {} '{}' after {} attempts ({})",
        "Archived".green().bold(),
        archived.title,
        archived.attempt_counter,
        archived.short_id()
    );
    println!("  New hunt started.");
    Ok(())
}
