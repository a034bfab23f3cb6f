pub mod outcome;
pub mod paper;
pub mod saved_item;
pub mod user;

pub use outcome::*;
pub use paper::*;
pub use saved_item::*;
pub use user::*;

use crate::utils::{AppError, AppResult};
use mongodb::bson::oid::ObjectId;
use serde::{Serialize, Serializer};

/// Fields a client submitted that have no dedicated struct field.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// String value of `key`, or `None` when it is absent or not a string.
pub(crate) fn text<'a>(fields: &'a Extra, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(serde_json::Value::as_str)
}

/// Inserts `value` under `key` when present.
pub(crate) fn put(fields: &mut Extra, key: &str, value: Option<String>) {
    if let Some(value) = value {
        fields.insert(key.to_string(), serde_json::Value::String(value));
    }
}

/// Rejects documents BSON cannot hold, such as integers above `i64::MAX`.
pub fn ensure_storable<T: Serialize>(document: &T) -> AppResult<()> {
    mongodb::bson::to_document(document)
        .map(|_| ())
        .map_err(|e| AppError::InvalidRequest(format!("Unstorable value: {}", e)))
}

/// Renders `_id` as a plain hex string in API responses.
///
/// Documents are only ever inserted with `id: None`, so this never writes a
/// string id into the store.
pub(crate) fn serialize_object_id<S>(
    id: &Option<ObjectId>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(oid) => serializer.serialize_str(&oid.to_hex()),
        None => serializer.serialize_none(),
    }
}

/// Parses a path id, mapping a malformed value to a 400.
pub fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_integer_beyond_bson_range() {
        let mut fields = Extra::new();
        fields.insert("views".to_string(), serde_json::json!(u64::MAX));

        let result = ensure_storable(&fields);
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));

        fields.insert("views".to_string(), serde_json::json!(42));
        assert!(ensure_storable(&fields).is_ok());
    }
}
