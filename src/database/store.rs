use crate::models::{
    DeleteOutcome, InsertOutcome, Paper, PaperStatus, ProfileUpdate, SavedItem, UpdateOutcome,
    User,
};
use crate::utils::AppResult;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

/// Every operation the HTTP layer performs against the document store.
///
/// Each method maps to exactly one store call. Upserts insert a new document
/// when the filter matches nothing.
#[async_trait]
pub trait Store: Send + Sync {
    /// Round-trip to the server; used by the health check.
    async fn ping(&self) -> AppResult<()>;

    // ========== Users ==========

    async fn count_users(&self) -> AppResult<u64>;

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn list_users(&self) -> AppResult<Vec<User>>;

    async fn insert_user(&self, user: User) -> AppResult<InsertOutcome>;

    /// Sets the five profile fields on the user with `update.email` (upsert).
    async fn upsert_profile(&self, update: &ProfileUpdate) -> AppResult<UpdateOutcome>;

    /// Sets `status` on the user with `email` (upsert).
    async fn upsert_user_status(&self, email: &str, status: &str) -> AppResult<UpdateOutcome>;

    async fn delete_user(&self, id: ObjectId) -> AppResult<DeleteOutcome>;

    // ========== Papers ==========

    async fn count_papers(&self) -> AppResult<u64>;

    /// Window of the natural-order collection.
    async fn papers_page(&self, skip: u64, limit: i64) -> AppResult<Vec<Paper>>;

    async fn find_paper(&self, id: ObjectId) -> AppResult<Option<Paper>>;

    async fn list_papers(&self) -> AppResult<Vec<Paper>>;

    async fn insert_paper(&self, paper: Paper) -> AppResult<InsertOutcome>;

    /// Sets `status` on the paper with `id` (upsert).
    async fn set_paper_status(&self, id: ObjectId, status: PaperStatus) -> AppResult<UpdateOutcome>;

    async fn papers_with_status(&self, status: PaperStatus) -> AppResult<Vec<Paper>>;

    /// Case-insensitive substring match on `title`.
    async fn search_papers(&self, title_fragment: &str) -> AppResult<Vec<Paper>>;

    /// All papers, newest `published_date` first.
    async fn recent_papers(&self) -> AppResult<Vec<Paper>>;

    /// Exact category match, or every paper when `category` is `None`.
    async fn papers_in_category(&self, category: Option<&str>) -> AppResult<Vec<Paper>>;

    // ========== Saves ==========

    async fn insert_saved(&self, item: SavedItem) -> AppResult<InsertOutcome>;

    async fn saved_for(&self, email: &str) -> AppResult<Vec<SavedItem>>;

    async fn delete_saved(&self, id: ObjectId) -> AppResult<DeleteOutcome>;
}
