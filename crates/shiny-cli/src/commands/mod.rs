pub mod archive;
pub mod complete;
pub mod counter;
pub mod history;
pub mod odds;
pub mod set;
pub mod status;

use std::path::Path;

use colored::Colorize;

use shiny_core::{HuntSession, HuntSettings, SessionStore, TrackerConfig};

/// Open and initialize the store for the given data directory.
fn open_store(dir: Option<&Path>) -> Result<SessionStore, String> {
    let mut config = TrackerConfig::default();
    if let Some(dir) = dir {
        config = config.with_data_dir(dir);
    }
    SessionStore::open(config).map_err(|e| format!("cannot open session store: {e}"))
}

fn current(store: &SessionStore) -> Result<&HuntSession, String> {
    store
        .current()
        .ok_or_else(|| "no current hunt".to_string())
}

/// "4096" for whole numbers, "683.1" otherwise.
fn format_one_in(one_in: f64) -> String {
    if (one_in - one_in.round()).abs() < 0.05 {
        format!("{one_in:.0}")
    } else {
        format!("{one_in:.1}")
    }
}

/// Percentage with more digits for tiny values.
fn format_percent(p: f64) -> String {
    let pct = p * 100.0;
    if pct < 1.0 {
        format!("{pct:.4}%")
    } else {
        format!("{pct:.2}%")
    }
}

/// One-line summary of the settings that matter for the method.
fn describe_settings(settings: &HuntSettings) -> String {
    let on_off = |b: bool| if b { "on".green() } else { "off".dimmed() };
    let mut out = format!(
        "{} | charm {}",
        settings.method.to_string().bold(),
        on_off(settings.shiny_charm_active)
    );
    if settings.method.uses_sparkling_power() {
        out.push_str(&format!(
            " | sparkling {}",
            on_off(settings.sparkling_power_active)
        ));
    }
    if settings.method.uses_defeat_count() {
        out.push_str(&format!(" | defeated {}", settings.outbreak_defeat_count));
    }
    out
}
