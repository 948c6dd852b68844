//! Immutable data snapshots.
//!
//! A snapshot is the data a State carries at one point in time: a set of
//! caller fields plus the reserved `time` stamp. Snapshots are values.
//! Every operation returns a new snapshot and leaves the receiver intact,
//! so a snapshot handed out earlier never observes later changes.

use super::record::Record;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

/// Caller data carried by a snapshot.
pub type Fields = Map<String, Value>;

/// Name of the reserved timestamp field.
pub const TIME_KEY: &str = "time";

/// Errors converting loose JSON into [`Fields`].
#[derive(Debug, Error, PartialEq)]
pub enum FieldsError {
    #[error("Expected a JSON object for state data, found {found}")]
    NotAnObject { found: &'static str },
}

/// Convert a JSON value into a data mapping.
///
/// `null` is treated as "no data" and yields an empty mapping.
pub fn fields_from_value(value: Value) -> Result<Fields, FieldsError> {
    match value {
        Value::Object(fields) => Ok(fields),
        Value::Null => Ok(Fields::new()),
        Value::Bool(_) => Err(FieldsError::NotAnObject { found: "boolean" }),
        Value::Number(_) => Err(FieldsError::NotAnObject { found: "number" }),
        Value::String(_) => Err(FieldsError::NotAnObject { found: "string" }),
        Value::Array(_) => Err(FieldsError::NotAnObject { found: "array" }),
    }
}

/// Immutable key/value snapshot stamped with the moment it became current.
///
/// The `time` stamp lives outside [`Fields`]; a `time` entry offered as
/// ordinary data is always dropped.
///
/// # Example
///
/// ```rust
/// use hookstate::core::Snapshot;
/// use hookstate::fields;
/// use serde_json::json;
///
/// let first = Snapshot::new(fields! { "count" => 1 });
/// let second = first.merge(&fields! { "count" => 2, "label" => "two" });
///
/// assert_eq!(first.get("count"), Some(&json!(1)));
/// assert_eq!(second.get("count"), Some(&json!(2)));
/// assert_eq!(second.time(), first.time());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    time: DateTime<Utc>,
    fields: Fields,
}

impl Snapshot {
    /// Create a snapshot stamped with the current wall-clock time.
    pub fn new(fields: Fields) -> Self {
        Self::at(fields, Utc::now())
    }

    /// Create a snapshot stamped with `time`.
    pub fn at(mut fields: Fields, time: DateTime<Utc>) -> Self {
        fields.remove(TIME_KEY);
        Self { time, fields }
    }

    /// Moment this snapshot became current.
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Caller fields, without `time`.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Look up a single caller field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Merge `patch` over this snapshot, returning a new one.
    ///
    /// Keys in `patch` overwrite same-named keys, everything else is carried
    /// over. A `time` entry in `patch` is ignored and the stamp is kept.
    pub fn merge(&self, patch: &Fields) -> Self {
        let mut fields = self.fields.clone();
        for (key, value) in patch {
            if key != TIME_KEY {
                fields.insert(key.clone(), value.clone());
            }
        }
        Self {
            time: self.time,
            fields,
        }
    }

    /// Return a copy with one field replaced. Writing `time` is a no-op.
    pub fn with_field(&self, key: &str, value: Value) -> Self {
        if key == TIME_KEY {
            return self.clone();
        }
        let mut fields = self.fields.clone();
        fields.insert(key.to_string(), value);
        Self {
            time: self.time,
            fields,
        }
    }

    /// Return a copy restamped with `time`.
    pub fn with_time(&self, time: DateTime<Utc>) -> Self {
        Self {
            time,
            fields: self.fields.clone(),
        }
    }

    /// Merge a hook-amended record back into this snapshot.
    ///
    /// Every field present in the record wins. Fields missing from the
    /// record are kept, so a hook cannot delete data. The record's `time`
    /// becomes the new stamp.
    pub fn merge_record(&self, record: &Record) -> Self {
        self.merge(&record.fields).with_time(record.time)
    }

    /// Milliseconds from this snapshot's stamp to `next`'s.
    ///
    /// Negative when the wall clock moved backwards in between.
    pub fn elapsed_ms(&self, next: &Snapshot) -> i64 {
        next.time.signed_duration_since(self.time).num_milliseconds()
    }

    /// Detached plain copy of this snapshot.
    pub fn to_record(&self) -> Record {
        Record {
            time: self.time,
            fields: self.fields.clone(),
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(Fields::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn fields_from_value_accepts_objects_and_null() {
        assert_eq!(
            fields_from_value(json!({ "a": 1 })).unwrap().get("a"),
            Some(&json!(1))
        );
        assert!(fields_from_value(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn fields_from_value_rejects_scalars() {
        assert_eq!(
            fields_from_value(json!([1, 2])),
            Err(FieldsError::NotAnObject { found: "array" })
        );
        assert!(fields_from_value(json!("text")).is_err());
    }

    #[test]
    fn construction_drops_reserved_time_field() {
        let snapshot = Snapshot::new(fields(json!({ "time": 5, "name": "first" })));

        assert!(snapshot.get(TIME_KEY).is_none());
        assert_eq!(snapshot.get("name"), Some(&json!("first")));
    }

    #[test]
    fn merge_overwrites_and_carries_over() {
        let base = Snapshot::new(fields(json!({ "a": 1, "b": 2 })));
        let merged = base.merge(&fields(json!({ "b": 3, "c": 4 })));

        assert_eq!(merged.get("a"), Some(&json!(1)));
        assert_eq!(merged.get("b"), Some(&json!(3)));
        assert_eq!(merged.get("c"), Some(&json!(4)));
    }

    #[test]
    fn merge_is_immutable() {
        let base = Snapshot::new(fields(json!({ "a": 1 })));
        let _merged = base.merge(&fields(json!({ "a": 2 })));

        assert_eq!(base.get("a"), Some(&json!(1)));
    }

    #[test]
    fn merge_keeps_time_stamp() {
        let base = Snapshot::new(Fields::new());
        let merged = base.merge(&fields(json!({ "time": "later" })));

        assert_eq!(merged.time(), base.time());
        assert!(merged.get(TIME_KEY).is_none());
    }

    #[test]
    fn with_field_ignores_time() {
        let base = Snapshot::new(Fields::new());
        let same = base.with_field(TIME_KEY, json!(0));

        assert_eq!(same, base);
    }

    #[test]
    fn elapsed_is_signed_milliseconds() {
        let start = Utc::now();
        let earlier = Snapshot::at(Fields::new(), start);
        let later = earlier.with_time(start + Duration::milliseconds(250));

        assert_eq!(earlier.elapsed_ms(&later), 250);
        assert_eq!(later.elapsed_ms(&earlier), -250);
    }

    #[test]
    fn merge_record_applies_fields_and_time() {
        let start = Utc::now();
        let base = Snapshot::at(fields(json!({ "keep": true, "age": 1 })), start);

        let mut record = base.to_record();
        record.fields.remove("keep");
        record.insert("age", 2);
        record.time = start + Duration::seconds(1);

        let merged = base.merge_record(&record);
        assert_eq!(merged.get("keep"), Some(&json!(true)));
        assert_eq!(merged.get("age"), Some(&json!(2)));
        assert_eq!(merged.time(), start + Duration::seconds(1));
    }
}
