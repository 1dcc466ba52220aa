//! Lenient JSON encoding of hunt sessions.
//!
//! Encoding goes through serde record types so the on-disk shape is fixed in
//! one place. Decoding walks a [`serde_json::Value`] field by field: a
//! missing or wrong-typed field takes its default instead of failing the
//! whole record, because the persisted blobs are the only untrusted input
//! the tracker ever reads.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ShinyResult;
use crate::hunt::{DEFAULT_TITLE, HuntMethod, HuntSession, HuntSettings, new_session_id};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord<'a> {
    id: &'a str,
    title: &'a str,
    attempt_counter: u32,
    created_at: String,
    completed: bool,
    settings: SettingsRecord,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsRecord {
    method: &'static str,
    shiny_charm_active: bool,
    sparkling_power_active: bool,
    outbreak_defeat_count: u32,
}

impl<'a> From<&'a HuntSession> for SessionRecord<'a> {
    fn from(session: &'a HuntSession) -> Self {
        let settings = &session.settings;
        Self {
            id: &session.id,
            title: &session.title,
            attempt_counter: session.attempt_counter,
            created_at: session
                .created_at
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            completed: session.completed,
            settings: SettingsRecord {
                method: settings.method.wire_name(),
                shiny_charm_active: settings.shiny_charm_active,
                sparkling_power_active: settings.sparkling_power_active,
                outbreak_defeat_count: settings.outbreak_defeat_count,
            },
        }
    }
}

/// Encode one session as a JSON object.
pub fn encode_session(session: &HuntSession) -> ShinyResult<String> {
    Ok(serde_json::to_string(&SessionRecord::from(session))?)
}

/// Encode a list of sessions as a JSON array, preserving order.
pub fn encode_archive(sessions: &[HuntSession]) -> ShinyResult<String> {
    let records: Vec<SessionRecord<'_>> = sessions.iter().map(SessionRecord::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Decode one session. Returns `None` only if the blob is not a JSON object.
pub fn decode_session(blob: &str) -> Option<HuntSession> {
    match serde_json::from_str::<Value>(blob) {
        Ok(value) => session_from_value(&value),
        Err(e) => {
            tracing::warn!("discarding unreadable session blob: {e}");
            None
        }
    }
}

/// Decode a list of sessions. Anything that is not an array yields an empty
/// list; entries that are not objects are skipped.
pub fn decode_archive(blob: &str) -> Vec<HuntSession> {
    let value = match serde_json::from_str::<Value>(blob) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("discarding unreadable archive blob: {e}");
            return Vec::new();
        }
    };
    match value.as_array() {
        Some(items) => items.iter().filter_map(session_from_value).collect(),
        None => {
            tracing::warn!("archive blob is not a list, starting empty");
            Vec::new()
        }
    }
}

fn session_from_value(value: &Value) -> Option<HuntSession> {
    let obj = value.as_object()?;

    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(new_session_id);

    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_TITLE)
        .to_string();

    let created_at = obj
        .get("createdAt")
        .or_else(|| obj.get("createdAtISO8601"))
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    let settings = obj
        .get("settings")
        .and_then(Value::as_object)
        .map(settings_from_map)
        .unwrap_or_default();

    Some(HuntSession {
        id,
        title,
        attempt_counter: lenient_u32(obj.get("attemptCounter")),
        created_at,
        settings,
        completed: lenient_bool(obj.get("completed")),
    })
}

fn settings_from_map(obj: &Map<String, Value>) -> HuntSettings {
    HuntSettings {
        method: obj
            .get("method")
            .and_then(Value::as_str)
            .and_then(HuntMethod::from_wire)
            .unwrap_or_default(),
        shiny_charm_active: lenient_bool(obj.get("shinyCharmActive")),
        sparkling_power_active: lenient_bool(obj.get("sparklingPowerActive")),
        outbreak_defeat_count: lenient_u32(obj.get("outbreakDefeatCount")),
    }
}

fn lenient_bool(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or(false)
}

/// Numbers clamp into `u32`; anything else is zero.
fn lenient_u32(value: Option<&Value>) -> u32 {
    let Some(n) = value.and_then(Value::as_f64) else {
        return 0;
    };
    if n.is_nan() || n <= 0.0 {
        0
    } else if n >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        n as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn sample() -> HuntSession {
        HuntSession {
            id: "hunt-1".to_string(),
            title: "Ralts".to_string(),
            attempt_counter: 42,
            created_at: Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap(),
            settings: HuntSettings::for_method(HuntMethod::MassOutbreak)
                .with_shiny_charm(true)
                .with_defeat_count(30),
            completed: false,
        }
    }

    #[test]
    fn wire_shape() {
        let json = encode_session(&sample()).unwrap();
        insta::assert_snapshot!(json, @r#"{"id":"hunt-1","title":"Ralts","attemptCounter":42,"createdAt":"2026-10-19T08:00:00Z","completed":false,"settings":{"method":"outbreak","shinyCharmActive":true,"sparklingPowerActive":false,"outbreakDefeatCount":30}}"#);
    }

    #[test]
    fn session_round_trip() {
        let s = sample();
        let decoded = decode_session(&encode_session(&s).unwrap()).unwrap();
        assert_eq!(decoded, s);
    }

    #[test]
    fn archive_round_trip_keeps_order() {
        let mut a = sample();
        a.completed = true;
        let mut b = HuntSession::titled("Gible");
        b.completed = true;
        let list = vec![b, a];
        let decoded = decode_archive(&encode_archive(&list).unwrap());
        assert_eq!(decoded, list);
    }

    #[test]
    fn unknown_method_decodes_as_wild() {
        let blob = r#"{"id":"x","settings":{"method":"pokeradar","shinyCharmActive":true}}"#;
        let s = decode_session(blob).unwrap();
        assert_eq!(s.settings.method, HuntMethod::WildEncounter);
        assert!(s.settings.shiny_charm_active);
    }

    #[test]
    fn method_aliases_decode_as_wild() {
        for name in ["egg", "Masuda", "Mass Outbreak", "OUTBREAK", " wild"] {
            let blob = format!(r#"{{"id":"x","settings":{{"method":"{name}"}}}}"#);
            let s = decode_session(&blob).unwrap();
            assert_eq!(s.settings.method, HuntMethod::WildEncounter, "{name}");
        }
        let s = decode_session(r#"{"id":"x","settings":{"method":"masuda"}}"#).unwrap();
        assert_eq!(s.settings.method, HuntMethod::EggMasuda);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let s = decode_session(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(s.id, "abc");
        assert_eq!(s.title, "Untitled");
        assert_eq!(s.attempt_counter, 0);
        assert!(!s.completed);
        assert_eq!(s.settings, HuntSettings::default());
    }

    #[test]
    fn missing_id_gets_a_fresh_one() {
        let s = decode_session("{}").unwrap();
        assert!(!s.id.is_empty());
    }

    #[test]
    fn wrong_types_degrade_per_field() {
        let blob = r#"{
            "id": "abc",
            "title": 7,
            "attemptCounter": "lots",
            "createdAt": "yesterday",
            "completed": "yes",
            "settings": {"method": 3, "shinyCharmActive": 1, "outbreakDefeatCount": 60}
        }"#;
        let s = decode_session(blob).unwrap();
        assert_eq!(s.id, "abc");
        assert_eq!(s.title, "Untitled");
        assert_eq!(s.attempt_counter, 0);
        assert!(!s.completed);
        assert_eq!(s.settings.method, HuntMethod::WildEncounter);
        assert!(!s.settings.shiny_charm_active);
        assert_eq!(s.settings.outbreak_defeat_count, 60);
    }

    #[test]
    fn counters_clamp_into_range() {
        let s = decode_session(r#"{"attemptCounter": -5}"#).unwrap();
        assert_eq!(s.attempt_counter, 0);
        let s = decode_session(r#"{"attemptCounter": 1e12}"#).unwrap();
        assert_eq!(s.attempt_counter, u32::MAX);
        let s = decode_session(r#"{"attemptCounter": 12.9}"#).unwrap();
        assert_eq!(s.attempt_counter, 12);
    }

    #[test]
    fn garbage_blobs() {
        assert!(decode_session("not json").is_none());
        assert!(decode_session("[1,2]").is_none());
        assert!(decode_archive("not json").is_empty());
        assert!(decode_archive(r#"{"id":"x"}"#).is_empty());
    }

    #[test]
    fn archive_skips_non_objects() {
        let decoded = decode_archive(r#"[{"id":"a"}, 5, null, {"id":"b"}]"#);
        let ids: Vec<_> = decoded.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    fn arb_session() -> impl Strategy<Value = HuntSession> {
        (
            "[a-z0-9-]{1,36}",
            ".{0,20}",
            any::<u32>(),
            0i64..4_000_000_000,
            0u32..1_000_000_000,
            prop_oneof![
                Just(HuntMethod::WildEncounter),
                Just(HuntMethod::MassOutbreak),
                Just(HuntMethod::EggMasuda),
            ],
            any::<(bool, bool, bool)>(),
            any::<u32>(),
        )
            .prop_map(
                |(id, title, counter, secs, nanos, method, (charm, sparkling, done), defeated)| {
                    HuntSession {
                        id,
                        title,
                        attempt_counter: counter,
                        created_at: Utc.timestamp_opt(secs, nanos).unwrap(),
                        settings: HuntSettings::for_method(method)
                            .with_shiny_charm(charm)
                            .with_sparkling_power(sparkling)
                            .with_defeat_count(defeated),
                        completed: done,
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn any_session_round_trips(s in arb_session()) {
            let decoded = decode_session(&encode_session(&s).unwrap()).unwrap();
            prop_assert_eq!(decoded, s);
        }
    }
}
