use std::path::Path;

use shiny_core::estimate;

pub fn increment(dir: Option<&Path>, delta: i64) -> Result<(), String> {
    let mut store = super::open_store(dir)?;
    store.increment_counter(delta);
    let hunt = super::current(&store)?;
    let chance = estimate(&hunt.settings).chance_within(hunt.attempt_counter);

    println!(
        "  Attempts: {} ({delta:+}) | chance so far {}",
        hunt.attempt_counter,
        super::format_percent(chance)
    );
    Ok(())
}

pub fn reset(dir: Option<&Path>) -> Result<(), String> {
    let mut store = super::open_store(dir)?;
    store.reset_counter();
    let hunt = super::current(&store)?;
    println!("  Attempts reset to {}", hunt.attempt_counter);
    Ok(())
}
