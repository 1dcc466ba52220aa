//! Hunt data model.
//!
//! A hunt is a [`HuntSession`]: an attempt counter plus the [`HuntSettings`]
//! that decide its odds. [`AppState`] holds the hunt in progress and the
//! archive of completed ones.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ShinyError;

/// Title given to sessions the user has not named.
pub const DEFAULT_TITLE: &str = "Untitled";

/// How the user is hunting. Decides which settings matter and which odds
/// formula applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HuntMethod {
    /// Random encounters in the overworld.
    #[default]
    WildEncounter,
    /// A mass outbreak event with a defeat counter.
    MassOutbreak,
    /// Egg hatching with parents from different language versions.
    EggMasuda,
}

impl HuntMethod {
    /// Parse a method from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "wild" | "wild-encounter" => Some(Self::WildEncounter),
            "outbreak" | "mass-outbreak" => Some(Self::MassOutbreak),
            "masuda" | "egg" | "egg-masuda" => Some(Self::EggMasuda),
            _ => None,
        }
    }

    /// Match a stored method name exactly. Aliases are not accepted.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "wild" => Some(Self::WildEncounter),
            "outbreak" => Some(Self::MassOutbreak),
            "masuda" => Some(Self::EggMasuda),
            _ => None,
        }
    }

    /// The name stored on disk.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::WildEncounter => "wild",
            Self::MassOutbreak => "outbreak",
            Self::EggMasuda => "masuda",
        }
    }

    /// Whether the sparkling power toggle affects this method.
    pub fn uses_sparkling_power(self) -> bool {
        matches!(self, Self::WildEncounter | Self::MassOutbreak)
    }

    /// Whether the outbreak defeat count affects this method.
    pub fn uses_defeat_count(self) -> bool {
        self == Self::MassOutbreak
    }
}

impl fmt::Display for HuntMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WildEncounter => write!(f, "Wild Encounter"),
            Self::MassOutbreak => write!(f, "Mass Outbreak"),
            Self::EggMasuda => write!(f, "Masuda Method"),
        }
    }
}

impl FromStr for HuntMethod {
    type Err = ShinyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ShinyError::UnknownMethod(s.to_string()))
    }
}

/// The boosting options configured for a hunt.
///
/// Fields that do not apply to the chosen method are kept as-is and ignored
/// by the odds engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HuntSettings {
    /// Hunt method.
    pub method: HuntMethod,
    /// Whether the shiny charm is owned.
    pub shiny_charm_active: bool,
    /// Whether a sparkling power meal is active (wild and outbreak only).
    pub sparkling_power_active: bool,
    /// Outbreak defeats so far; 0, 30, and 60 are the usual values.
    pub outbreak_defeat_count: u32,
}

impl HuntSettings {
    /// Settings for the given method with every boost off.
    pub fn for_method(method: HuntMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Set the shiny charm flag.
    pub fn with_shiny_charm(mut self, active: bool) -> Self {
        self.shiny_charm_active = active;
        self
    }

    /// Set the sparkling power flag.
    pub fn with_sparkling_power(mut self, active: bool) -> Self {
        self.sparkling_power_active = active;
        self
    }

    /// Set the outbreak defeat count.
    pub fn with_defeat_count(mut self, count: u32) -> Self {
        self.outbreak_defeat_count = count;
        self
    }
}

/// One hunt: a counter, its configuration, and bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct HuntSession {
    /// Unique identifier.
    pub id: String,
    /// User label.
    pub title: String,
    /// Attempts so far.
    pub attempt_counter: u32,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Boosting options.
    pub settings: HuntSettings,
    /// Whether the hunt has been completed and archived.
    pub completed: bool,
}

impl HuntSession {
    /// A fresh session: new id, default title and settings, zero counter.
    pub fn new() -> Self {
        Self::titled(DEFAULT_TITLE)
    }

    /// A fresh session with the given title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            id: new_session_id(),
            title: title.into(),
            attempt_counter: 0,
            created_at: Utc::now(),
            settings: HuntSettings::default(),
            completed: false,
        }
    }

    /// Apply a signed delta to the counter, saturating at zero.
    pub fn add_attempts(&mut self, delta: i64) {
        let next = i64::from(self.attempt_counter).saturating_add(delta);
        self.attempt_counter = u32::try_from(next.max(0)).unwrap_or(u32::MAX);
    }

    /// The first eight characters of the id, for display.
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

impl Default for HuntSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a new unique session id.
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Everything the tracker knows: archived hunts and the active one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Completed hunts, most recently completed first.
    pub sessions: Vec<HuntSession>,
    /// The hunt in progress.
    pub current: Option<HuntSession>,
}

impl AppState {
    /// Look up an archived session by exact id.
    pub fn archived(&self, id: &str) -> Option<&HuntSession> {
        self.sessions.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_methods() {
        assert_eq!(HuntMethod::parse("wild"), Some(HuntMethod::WildEncounter));
        assert_eq!(
            HuntMethod::parse("Mass Outbreak"),
            Some(HuntMethod::MassOutbreak)
        );
        assert_eq!(HuntMethod::parse("egg"), Some(HuntMethod::EggMasuda));
        assert_eq!(HuntMethod::parse("MASUDA"), Some(HuntMethod::EggMasuda));
        assert_eq!(HuntMethod::parse("radar"), None);
    }

    #[test]
    fn from_wire_is_exact() {
        for method in [
            HuntMethod::WildEncounter,
            HuntMethod::MassOutbreak,
            HuntMethod::EggMasuda,
        ] {
            assert_eq!(HuntMethod::from_wire(method.wire_name()), Some(method));
        }
        assert_eq!(HuntMethod::from_wire("egg"), None);
        assert_eq!(HuntMethod::from_wire("Masuda"), None);
        assert_eq!(HuntMethod::from_wire("Mass Outbreak"), None);
    }

    #[test]
    fn from_str_reports_unknown_method() {
        let err = "radar".parse::<HuntMethod>().unwrap_err();
        assert!(err.to_string().contains("radar"));
    }

    #[test]
    fn wire_names() {
        assert_eq!(HuntMethod::WildEncounter.wire_name(), "wild");
        assert_eq!(HuntMethod::MassOutbreak.wire_name(), "outbreak");
        assert_eq!(HuntMethod::EggMasuda.wire_name(), "masuda");
    }

    #[test]
    fn method_relevance() {
        assert!(HuntMethod::WildEncounter.uses_sparkling_power());
        assert!(!HuntMethod::EggMasuda.uses_sparkling_power());
        assert!(HuntMethod::MassOutbreak.uses_defeat_count());
        assert!(!HuntMethod::WildEncounter.uses_defeat_count());
    }

    #[test]
    fn new_session_defaults() {
        let s = HuntSession::new();
        assert_eq!(s.title, "Untitled");
        assert_eq!(s.attempt_counter, 0);
        assert_eq!(s.settings, HuntSettings::default());
        assert!(!s.completed);
        assert_eq!(s.short_id().len(), 8);
    }

    #[test]
    fn session_ids_are_unique() {
        let a = HuntSession::new();
        let b = HuntSession::new();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn add_attempts_saturates_at_zero() {
        let mut s = HuntSession::new();
        s.attempt_counter = 3;
        s.add_attempts(-10);
        assert_eq!(s.attempt_counter, 0);
        s.add_attempts(5);
        assert_eq!(s.attempt_counter, 5);
    }

    #[test]
    fn add_attempts_saturates_at_max() {
        let mut s = HuntSession::new();
        s.attempt_counter = u32::MAX - 1;
        s.add_attempts(10);
        assert_eq!(s.attempt_counter, u32::MAX);
    }

    #[test]
    fn settings_builder() {
        let s = HuntSettings::for_method(HuntMethod::MassOutbreak)
            .with_shiny_charm(true)
            .with_sparkling_power(true)
            .with_defeat_count(60);
        assert_eq!(s.method, HuntMethod::MassOutbreak);
        assert!(s.shiny_charm_active);
        assert!(s.sparkling_power_active);
        assert_eq!(s.outbreak_defeat_count, 60);
    }
}
