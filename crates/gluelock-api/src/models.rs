// Wire types for the Glue REST API.
//
// Field names follow the vendor's PascalCase JSON. Identifiers are
// normalised to strings because the API is not consistent about
// emitting them as numbers or strings.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// `Status` value the command endpoint returns on success.
pub const COMMAND_STATUS_SUCCESS: i64 = 1;

/// A hub and the locks paired with it. `GET /Hubs`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Hub {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "strings_or_numbers")]
    pub lock_ids: Vec<String>,
}

/// Catalog entry describing what a lock event means. `GET /EventTypes`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventType {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub description: String,
}

/// Envelope returned by `GET /Events/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsResponse {
    #[serde(rename = "LockEvent", default)]
    pub lock_event: Vec<LockEvent>,
}

/// One lock event as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LockEvent {
    #[serde(deserialize_with = "string_or_number")]
    pub lock_id: String,
    /// Raw creation timestamp. Usually ISO-8601 without a zone designator.
    pub created: String,
    #[serde(deserialize_with = "string_or_number")]
    pub event_type_id: String,
}

impl LockEvent {
    /// Parse `created` as a UTC instant.
    ///
    /// Timestamps without an offset are taken to be UTC. Returns `None`
    /// for anything unparseable.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created)
    }
}

/// Lock status record. `GET /Locks/{lockId}`
///
/// Only the battery fields are modelled; everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LockStatus {
    #[serde(default)]
    pub battery_status_before: Option<f64>,
    #[serde(default)]
    pub battery_status_after: Option<f64>,
}

/// A lock or unlock instruction. Travels as its [`wire_code`](Self::wire_code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum HubCommand {
    Lock,
    Unlock,
}

impl HubCommand {
    /// The string the command endpoint expects in `HubCommand`.
    pub fn wire_code(self) -> &'static str {
        match self {
            Self::Lock => "1",
            Self::Unlock => "0",
        }
    }

    /// Inverse of [`wire_code`](Self::wire_code).
    pub fn from_wire_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(Self::Lock),
            "0" => Some(Self::Unlock),
            _ => None,
        }
    }
}

impl Serialize for HubCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_code())
    }
}

impl<'de> Deserialize<'de> for HubCommand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = string_or_number(deserializer)?;
        Self::from_wire_code(&code)
            .ok_or_else(|| de::Error::custom(format!("unknown hub command {code:?}")))
    }
}

/// Body sent to `POST /Hubs/{hubId}/Commands`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommandRequest<'a> {
    pub lock_id: &'a str,
    pub hub_command: HubCommand,
}

/// Response of the command endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommandResponse {
    pub status: i64,
}

impl CommandResponse {
    pub fn is_success(self) -> bool {
        self.status == COMMAND_STATUS_SUCCESS
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Parse a vendor timestamp. Accepts RFC 3339 and zone-less ISO-8601
/// (with or without fractional seconds), the latter as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Str(String),
    Int(i64),
    Uint(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Str(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::Uint(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn strings_or_numbers<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawId>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(String::from).collect())
}
