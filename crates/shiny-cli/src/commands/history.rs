use std::path::Path;

use comfy_table::Table;

pub fn run(dir: Option<&Path>) -> Result<(), String> {
    let store = super::open_store(dir)?;
    let sessions = store.sessions();
    if sessions.is_empty() {
        println!("No archived hunts.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Method", "Attempts", "Started"]);
    for s in sessions {
        table.add_row(vec![
            s.short_id().to_string(),
            s.title.clone(),
            s.settings.method.to_string(),
            s.attempt_counter.to_string(),
            s.created_at.format("%Y-%m-%d").to_string(),
        ]);
    }
    println!("{table}");
    println!("  {} archived hunt(s)", sessions.len());
    Ok(())
}
