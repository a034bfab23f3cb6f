use super::{put, serialize_object_id, text, Extra};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document in the "users" collection.
///
/// Only `_id` is typed; profile fields keep whatever type and value they were
/// stored with, including explicit nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    #[serde(flatten)]
    pub fields: Extra,
}

impl User {
    pub fn email(&self) -> Option<&str> {
        text(&self.fields, "email")
    }
}

/// Body of POST /users.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewUser {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    #[schema(value_type = Object)]
    #[serde(flatten)]
    pub extra: Extra,
}

impl From<NewUser> for User {
    fn from(new: NewUser) -> Self {
        let mut fields = new.extra;
        fields.remove("_id");
        put(&mut fields, "email", new.email);
        put(&mut fields, "phone", new.phone);
        put(&mut fields, "birthday", new.birthday);
        put(&mut fields, "address1", new.address1);
        put(&mut fields, "address2", new.address2);
        put(&mut fields, "bio", new.bio);
        put(&mut fields, "status", new.status);
        Self { id: None, fields }
    }
}

/// Body of PATCH /user. Absent fields are written as null.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ProfileUpdate {
    pub email: String,
    pub phone: Option<String>,
    pub birthday: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub bio: Option<String>,
}

impl ProfileUpdate {
    /// Field name and value for each of the five profile fields.
    pub fn values(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("phone", self.phone.as_deref()),
            ("birthday", self.birthday.as_deref()),
            ("address1", self.address1.as_deref()),
            ("address2", self.address2.as_deref()),
            ("bio", self.bio.as_deref()),
        ]
    }
}

/// Body of PATCH /users/role.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct RoleChange {
    pub email: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_keeps_extra_fields() {
        let new: NewUser = serde_json::from_value(serde_json::json!({
            "_id": "client-side",
            "email": "a@x.com",
            "name": "Ada",
            "photo": "https://example.com/ada.png"
        }))
        .unwrap();

        let user = User::from(new);
        assert_eq!(user.email(), Some("a@x.com"));
        assert_eq!(user.fields["name"], "Ada");
        assert!(!user.fields.contains_key("_id"));
        assert!(!user.fields.contains_key("phone"));
    }

    #[test]
    fn test_serializes_id_as_hex() {
        let oid = ObjectId::new();
        let mut fields = Extra::new();
        fields.insert("email".to_string(), "a@x.com".into());
        let user = User { id: Some(oid), fields };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["_id"], oid.to_hex());
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn test_stored_nulls_are_rendered() {
        let user: User = serde_json::from_value(serde_json::json!({
            "email": "a@x.com",
            "phone": 5550100,
            "address1": null
        }))
        .unwrap();

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["phone"], 5550100);
        assert!(json["address1"].is_null());
        assert!(json.as_object().unwrap().contains_key("address1"));
    }
}
