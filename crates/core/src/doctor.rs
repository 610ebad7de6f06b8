use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Table (collection) holding the doctor directory
pub const DOCTORS_TABLE: &str = "doctors";

/// Column the directory is filtered on
pub const SPECIALIZATION_FIELD: &str = "specialization";

/// A doctor as stored in the external directory.
///
/// The record is opaque: every field is passed through to the client
/// verbatim. Only `specialization` has meaning here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DoctorRecord(pub Map<String, JsonValue>);

impl DoctorRecord {
    /// The record's specialization, if it has a string one
    pub fn specialization(&self) -> Option<&str> {
        self.0.get(SPECIALIZATION_FIELD).and_then(JsonValue::as_str)
    }

    /// Look up an arbitrary field
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field)
    }
}

impl From<Map<String, JsonValue>> for DoctorRecord {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

impl TryFrom<JsonValue> for DoctorRecord {
    type Error = JsonValue;

    /// Succeeds only for JSON objects; anything else is handed back.
    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}
