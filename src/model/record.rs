//! Raw backend records.

use serde_json::Value;

/// One record as returned by a log source, before normalization.
///
/// Sum type with exactly three shapes; the normalizer matches on it exhaustively
/// instead of probing fields at display time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRecord {
    /// A plain display string (diagnostic or echo lines, bare JSON strings).
    Text(String),
    /// A structured record whose payload field holds text.
    Payload(String),
    /// A structured record without a text payload. Contributes no line.
    Opaque,
}

impl RawRecord {
    /// Classify one element of the backend's JSON array.
    ///
    /// - a JSON string becomes [`RawRecord::Text`]
    /// - an object whose `payload_field` is a string becomes [`RawRecord::Payload`]
    /// - anything else (objects without the field, non-string payloads, numbers, ...)
    ///   becomes [`RawRecord::Opaque`]
    ///
    /// `payload_field` may be a dotted path (`jsonPayload.message`); each segment
    /// descends one object level.
    pub fn from_json(value: Value, payload_field: &str) -> Self {
        match value {
            Value::String(s) => RawRecord::Text(s),
            Value::Object(_) => match lookup(&value, payload_field) {
                Some(Value::String(s)) => RawRecord::Payload(s.clone()),
                _ => RawRecord::Opaque,
            },
            _ => RawRecord::Opaque,
        }
    }

    /// The text this record contributes, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            RawRecord::Text(s) | RawRecord::Payload(s) => Some(s),
            RawRecord::Opaque => None,
        }
    }
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    // Literal keys win over dotted paths so a field really named "a.b" still resolves.
    if let Some(found) = value.get(path) {
        return Some(found);
    }
    path.split('.')
        .try_fold(value, |current, segment| current.get(segment))
}
