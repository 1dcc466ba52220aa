use std::path::Path;

pub fn delete(dir: Option<&Path>, prefix: &str) -> Result<(), String> {
    let mut store = super::open_store(dir)?;
    let (id, title) = {
        let s = store
            .find_archived_by_prefix(prefix)
            .map_err(|e| e.to_string())?;
        (s.id.clone(), s.title.clone())
    };
    store.delete_archived(&id);
    println!("  Deleted '{title}' ({id})");
    Ok(())
}

pub fn load(dir: Option<&Path>, prefix: &str) -> Result<(), String> {
    let mut store = super::open_store(dir)?;
    let id = store
        .find_archived_by_prefix(prefix)
        .map_err(|e| e.to_string())?
        .id
        .clone();
    store.load_from_archive(&id);

    let hunt = super::current(&store)?;
    println!(
        "  Loaded '{}' into the current hunt: {} attempts",
        hunt.title, hunt.attempt_counter
    );
    println!("  {}", super::describe_settings(&hunt.settings));
    Ok(())
}
