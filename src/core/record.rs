//! Plain, detached views of snapshots.

use super::snapshot::{Fields, TIME_KEY};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Owned copy of a snapshot's contents.
///
/// Records are what callers read and what hooks receive. Changing a record
/// never touches the snapshot it was copied from. Serialized, a record is a
/// single flat object with `time` alongside the caller fields.
///
/// # Example
///
/// ```rust
/// use hookstate::core::Snapshot;
/// use hookstate::fields;
///
/// let record = Snapshot::new(fields! { "message" => "first" }).to_record();
/// let json = serde_json::to_value(&record).unwrap();
///
/// assert_eq!(json["message"], "first");
/// assert!(json["time"].is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// When the snapshot became current
    pub time: DateTime<Utc>,
    /// Caller data
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    /// Look up a caller field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a caller field, returning the previous value.
    ///
    /// The reserved `time` key is rejected here; assign [`Record::time`]
    /// directly instead.
    pub fn insert<V: Into<Value>>(&mut self, key: &str, value: V) -> Option<Value> {
        if key == TIME_KEY {
            return None;
        }
        self.fields.insert(key.to_string(), value.into())
    }

    /// Milliseconds since the Unix epoch of [`Record::time`].
    pub fn time_ms(&self) -> i64 {
        self.time.timestamp_millis()
    }

    /// Flat JSON object form, `time` included.
    pub fn to_value(&self) -> Value {
        let mut object = self.fields.clone();
        object.insert(
            TIME_KEY.to_string(),
            Value::String(self.time.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        );
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> Record {
        Record {
            time: Utc::now(),
            fields: json!({ "life": 1 }).as_object().cloned().unwrap(),
        }
    }

    #[test]
    fn insert_rejects_time() {
        let mut record = record();
        let before = record.clone();

        assert!(record.insert(TIME_KEY, 0).is_none());
        assert_eq!(record, before);
    }

    #[test]
    fn insert_returns_previous_value() {
        let mut record = record();

        assert_eq!(record.insert("life", 2), Some(json!(1)));
        assert_eq!(record.get("life"), Some(&json!(2)));
    }

    #[test]
    fn serializes_flat_with_time() {
        let record = record();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["life"], json!(1));
        assert!(json.get(TIME_KEY).is_some());
        assert_eq!(record.to_value()["life"], json!(1));
    }

    #[test]
    fn roundtrips_through_json() {
        let record = record();
        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();

        assert_eq!(back, record);
    }
}
