use super::{serialize_object_id, Extra};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Bookmark in the "saves" collection: the owner's email plus a copy of the
/// paper's data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavedItem {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    pub user_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_id: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of POST /saves. Clients post the paper document as-is with
/// `user_email` added, so its `_id` is the paper's id.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewSavedItem {
    pub user_email: String,
    pub paper_id: Option<String>,
    #[schema(value_type = Object)]
    #[serde(flatten)]
    pub extra: Extra,
}

impl From<NewSavedItem> for SavedItem {
    fn from(new: NewSavedItem) -> Self {
        let mut extra = new.extra;
        let paper_id = match extra.remove("_id") {
            Some(serde_json::Value::String(id)) => Some(id),
            Some(other) => Some(other.to_string()),
            None => None,
        };
        Self {
            id: None,
            user_email: new.user_email,
            paper_id: new.paper_id.or(paper_id),
            extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_id_taken_from_posted_document() {
        let new: NewSavedItem = serde_json::from_value(serde_json::json!({
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "user_email": "a@x.com",
            "title": "Neural Networks in Practice"
        }))
        .unwrap();

        let item = SavedItem::from(new);
        assert_eq!(item.paper_id.as_deref(), Some("65a1f0c2e4b0a1b2c3d4e5f6"));
        assert_eq!(item.extra["title"], "Neural Networks in Practice");
        assert!(!item.extra.contains_key("_id"));
    }

    #[test]
    fn test_owner_is_required() {
        let result: Result<NewSavedItem, _> =
            serde_json::from_value(serde_json::json!({ "title": "orphan" }));
        assert!(result.is_err());
    }
}
