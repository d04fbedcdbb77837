use serde_json::Value;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Read a loosely-typed id from client JSON.
///
/// Accepts a positive integer or its decimal string. Absent, `null`, `0` and
/// `""` mean "no id". Outer `None` means the value is malformed.
pub fn parse_id_value(raw: Option<&Value>) -> Option<Option<DbId>> {
    match raw {
        None | Some(Value::Null) => Some(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Some(None),
            Some(id) if id > 0 => Some(Some(id)),
            _ => None,
        },
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Some(None);
            }
            match s.parse::<DbId>() {
                Ok(0) => Some(None),
                Ok(id) if id > 0 => Some(Some(id)),
                _ => None,
            }
        }
        Some(_) => None,
    }
}
