use super::{put, serialize_object_id, text, Extra};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaperStatus {
    Published,
    Unpublished,
}

impl PaperStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperStatus::Published => "published",
            PaperStatus::Unpublished => "unpublished",
        }
    }
}

impl fmt::Display for PaperStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document in the "allpapers" collection.
///
/// Only `_id` is typed. Title, category, date, status and whatever else the
/// submission form sent stay as stored, so a document written by another
/// client still reads back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paper {
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

impl Paper {
    pub fn title(&self) -> Option<&str> {
        text(&self.fields, "title")
    }

    pub fn category(&self) -> Option<&str> {
        text(&self.fields, "category")
    }

    pub fn published_date(&self) -> Option<&str> {
        text(&self.fields, "published_date")
    }

    /// Raw status value; anything other than "published"/"unpublished" is
    /// returned as-is.
    pub fn status(&self) -> Option<&str> {
        text(&self.fields, "status")
    }

    pub fn set_status(&mut self, status: PaperStatus) {
        self.fields.insert("status".to_string(), status.as_str().into());
    }
}

/// Body of POST /allpapers.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewPaper {
    pub title: Option<String>,
    pub category: Option<String>,
    pub published_date: Option<String>,
    pub status: Option<PaperStatus>,
    #[schema(value_type = Object)]
    #[serde(flatten)]
    pub extra: Extra,
}

impl From<NewPaper> for Paper {
    fn from(new: NewPaper) -> Self {
        let mut fields = new.extra;
        fields.remove("_id");
        put(&mut fields, "title", new.title);
        put(&mut fields, "category", new.category);
        put(&mut fields, "published_date", new.published_date);

        let mut paper = Self { id: None, fields };
        // New submissions wait for an administrator.
        paper.set_status(new.status.unwrap_or(PaperStatus::Unpublished));
        paper
    }
}
