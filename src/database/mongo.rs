use super::store::Store;
use crate::models::{
    DeleteOutcome, InsertOutcome, Paper, PaperStatus, ProfileUpdate, SavedItem, UpdateOutcome,
    User,
};
use crate::utils::AppResult;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database};

const USERS: &str = "users";
const PAPERS: &str = "allpapers";
const SAVES: &str = "saves";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    /// Connects and pings the deployment. Fails if the server is unreachable.
    pub async fn connect(uri: &str, db_name: &str) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(uri).await?;
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        client_options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        let mongodb = Self { client, db };
        mongodb.ping().await?;
        log::info!("🏓 Pinged deployment, connected to database {}", db_name);

        Ok(mongodb)
    }

    /// Closes the connection pool. Call after the HTTP server has stopped.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }

    fn users(&self) -> Collection<User> {
        self.db.collection(USERS)
    }

    fn papers(&self) -> Collection<Paper> {
        self.db.collection(PAPERS)
    }

    fn saves(&self) -> Collection<SavedItem> {
        self.db.collection(SAVES)
    }
}

/// `$set` body writing all five profile fields, null when absent.
fn profile_set(update: &ProfileUpdate) -> Document {
    update
        .values()
        .into_iter()
        .map(|(field, value)| (field.to_string(), Bson::from(value)))
        .collect()
}

fn title_filter(fragment: &str) -> Document {
    doc! { "title": { "$regex": regex::escape(fragment), "$options": "i" } }
}

#[async_trait]
impl Store for MongoDB {
    async fn ping(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    async fn count_users(&self) -> AppResult<u64> {
        Ok(self.users().estimated_document_count().await?)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users().find_one(doc! { "email": email }).await?)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let cursor = self.users().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_user(&self, user: User) -> AppResult<InsertOutcome> {
        Ok(self.users().insert_one(user).await?.into())
    }

    async fn upsert_profile(&self, update: &ProfileUpdate) -> AppResult<UpdateOutcome> {
        let result = self
            .users()
            .update_one(
                doc! { "email": &update.email },
                doc! { "$set": profile_set(update) },
            )
            .upsert(true)
            .await?;
        Ok(result.into())
    }

    async fn upsert_user_status(&self, email: &str, status: &str) -> AppResult<UpdateOutcome> {
        let result = self
            .users()
            .update_one(doc! { "email": email }, doc! { "$set": { "status": status } })
            .upsert(true)
            .await?;
        Ok(result.into())
    }

    async fn delete_user(&self, id: ObjectId) -> AppResult<DeleteOutcome> {
        Ok(self.users().delete_one(doc! { "_id": id }).await?.into())
    }

    async fn count_papers(&self) -> AppResult<u64> {
        Ok(self.papers().estimated_document_count().await?)
    }

    async fn papers_page(&self, skip: u64, limit: i64) -> AppResult<Vec<Paper>> {
        let cursor = self.papers().find(doc! {}).skip(skip).limit(limit).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_paper(&self, id: ObjectId) -> AppResult<Option<Paper>> {
        Ok(self.papers().find_one(doc! { "_id": id }).await?)
    }

    async fn list_papers(&self) -> AppResult<Vec<Paper>> {
        let cursor = self.papers().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_paper(&self, paper: Paper) -> AppResult<InsertOutcome> {
        Ok(self.papers().insert_one(paper).await?.into())
    }

    async fn set_paper_status(
        &self,
        id: ObjectId,
        status: PaperStatus,
    ) -> AppResult<UpdateOutcome> {
        let result = self
            .papers()
            .update_one(doc! { "_id": id }, doc! { "$set": { "status": status.as_str() } })
            .upsert(true)
            .await?;
        Ok(result.into())
    }

    async fn papers_with_status(&self, status: PaperStatus) -> AppResult<Vec<Paper>> {
        let cursor = self.papers().find(doc! { "status": status.as_str() }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn search_papers(&self, title_fragment: &str) -> AppResult<Vec<Paper>> {
        let cursor = self.papers().find(title_filter(title_fragment)).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn recent_papers(&self) -> AppResult<Vec<Paper>> {
        let cursor = self
            .papers()
            .find(doc! {})
            .sort(doc! { "published_date": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn papers_in_category(&self, category: Option<&str>) -> AppResult<Vec<Paper>> {
        let filter = match category {
            Some(category) => doc! { "category": category },
            None => doc! {},
        };
        let cursor = self.papers().find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_saved(&self, item: SavedItem) -> AppResult<InsertOutcome> {
        Ok(self.saves().insert_one(item).await?.into())
    }

    async fn saved_for(&self, email: &str) -> AppResult<Vec<SavedItem>> {
        let cursor = self.saves().find(doc! { "user_email": email }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete_saved(&self, id: ObjectId) -> AppResult<DeleteOutcome> {
        Ok(self.saves().delete_one(doc! { "_id": id }).await?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_filter_escapes_metacharacters() {
        let filter = title_filter("C++ (revisited)");
        let title = filter.get_document("title").unwrap();
        assert_eq!(title.get_str("$regex").unwrap(), r"C\+\+ \(revisited\)");
        assert_eq!(title.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_profile_set_writes_nulls() {
        let update = ProfileUpdate {
            email: "a@x.com".to_string(),
            phone: Some("555-0100".to_string()),
            birthday: None,
            address1: None,
            address2: None,
            bio: None,
        };

        let set = profile_set(&update);
        assert_eq!(set.len(), 5);
        assert_eq!(set.get_str("phone").unwrap(), "555-0100");
        assert_eq!(set.get("bio"), Some(&Bson::Null));
    }

    #[test]
    fn test_decodes_documents_from_other_clients() {
        let stored = doc! {
            "_id": ObjectId::new(),
            "title": "Legacy Paper",
            "status": "pending",
            "published_date": mongodb::bson::DateTime::now(),
            "pages": 12,
        };
        let bytes = mongodb::bson::to_vec(&stored).unwrap();

        let paper: Paper = mongodb::bson::from_slice(&bytes).unwrap();
        assert_eq!(paper.title(), Some("Legacy Paper"));
        assert_eq!(paper.status(), Some("pending"));
        assert!(paper.fields.contains_key("published_date"));
        assert_eq!(paper.fields["pages"], 12);

        let user: User = mongodb::bson::from_slice(
            &mongodb::bson::to_vec(&doc! { "email": "a@x.com", "phone": 5550100 }).unwrap(),
        )
        .unwrap();
        assert_eq!(user.email(), Some("a@x.com"));
        assert_eq!(user.fields["phone"], 5550100);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_string());

        let db = MongoDB::connect(&uri, "researchDB_test").await;
        assert!(db.is_ok());
    }
}
