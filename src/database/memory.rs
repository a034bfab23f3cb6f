//! In-memory store for tests. Mirrors the MongoDB filters and upsert rules.

use super::store::Store;
use crate::models::{
    DeleteOutcome, InsertOutcome, Paper, PaperStatus, ProfileUpdate, SavedItem, UpdateOutcome,
    User,
};
use crate::utils::AppResult;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    papers: Mutex<Vec<Paper>>,
    saves: Mutex<Vec<SavedItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn inserted(id: ObjectId) -> InsertOutcome {
    InsertOutcome {
        acknowledged: true,
        inserted_id: id.to_hex(),
    }
}

fn matched(modified: bool) -> UpdateOutcome {
    UpdateOutcome {
        acknowledged: true,
        matched_count: 1,
        modified_count: u64::from(modified),
        upserted_count: 0,
        upserted_id: None,
    }
}

fn upserted(id: ObjectId) -> UpdateOutcome {
    UpdateOutcome {
        acknowledged: true,
        matched_count: 0,
        modified_count: 0,
        upserted_count: 1,
        upserted_id: Some(id.to_hex()),
    }
}

fn removed<T>(
    items: &mut Vec<T>,
    id: ObjectId,
    id_of: impl Fn(&T) -> Option<ObjectId>,
) -> DeleteOutcome {
    let deleted_count = match items.iter().position(|item| id_of(item) == Some(id)) {
        Some(index) => {
            items.remove(index);
            1
        }
        None => 0,
    };
    DeleteOutcome {
        acknowledged: true,
        deleted_count,
    }
}

fn upsert_user(users: &mut Vec<User>, email: &str, apply: impl Fn(&mut User)) -> UpdateOutcome {
    if let Some(user) = users.iter_mut().find(|u| u.email() == Some(email)) {
        let before = user.clone();
        apply(user);
        return matched(before != *user);
    }

    let id = ObjectId::new();
    let mut user = User {
        id: Some(id),
        ..Default::default()
    };
    user.fields.insert("email".to_string(), email.into());
    apply(&mut user);
    users.push(user);
    upserted(id)
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn count_users(&self) -> AppResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email() == Some(email)).cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn insert_user(&self, mut user: User) -> AppResult<InsertOutcome> {
        let id = ObjectId::new();
        user.id = Some(id);
        self.users.lock().unwrap().push(user);
        Ok(inserted(id))
    }

    async fn upsert_profile(&self, update: &ProfileUpdate) -> AppResult<UpdateOutcome> {
        let mut users = self.users.lock().unwrap();
        Ok(upsert_user(&mut users, &update.email, |user| {
            for (field, value) in update.values() {
                user.fields.insert(field.to_string(), value.into());
            }
        }))
    }

    async fn upsert_user_status(&self, email: &str, status: &str) -> AppResult<UpdateOutcome> {
        let mut users = self.users.lock().unwrap();
        Ok(upsert_user(&mut users, email, |user| {
            user.fields.insert("status".to_string(), status.into());
        }))
    }

    async fn delete_user(&self, id: ObjectId) -> AppResult<DeleteOutcome> {
        let mut users = self.users.lock().unwrap();
        Ok(removed(&mut users, id, |u| u.id))
    }

    async fn count_papers(&self) -> AppResult<u64> {
        Ok(self.papers.lock().unwrap().len() as u64)
    }

    async fn papers_page(&self, skip: u64, limit: i64) -> AppResult<Vec<Paper>> {
        let papers = self.papers.lock().unwrap();
        let window = papers.iter().skip(skip as usize);
        Ok(if limit > 0 {
            window.take(limit as usize).cloned().collect()
        } else {
            window.cloned().collect()
        })
    }

    async fn find_paper(&self, id: ObjectId) -> AppResult<Option<Paper>> {
        let papers = self.papers.lock().unwrap();
        Ok(papers.iter().find(|p| p.id == Some(id)).cloned())
    }

    async fn list_papers(&self) -> AppResult<Vec<Paper>> {
        Ok(self.papers.lock().unwrap().clone())
    }

    async fn insert_paper(&self, mut paper: Paper) -> AppResult<InsertOutcome> {
        let id = ObjectId::new();
        paper.id = Some(id);
        self.papers.lock().unwrap().push(paper);
        Ok(inserted(id))
    }

    async fn set_paper_status(
        &self,
        id: ObjectId,
        status: PaperStatus,
    ) -> AppResult<UpdateOutcome> {
        let mut papers = self.papers.lock().unwrap();
        if let Some(paper) = papers.iter_mut().find(|p| p.id == Some(id)) {
            let modified = paper.status() != Some(status.as_str());
            paper.set_status(status);
            return Ok(matched(modified));
        }

        let mut paper = Paper {
            id: Some(id),
            ..Default::default()
        };
        paper.set_status(status);
        papers.push(paper);
        Ok(upserted(id))
    }

    async fn papers_with_status(&self, status: PaperStatus) -> AppResult<Vec<Paper>> {
        let papers = self.papers.lock().unwrap();
        Ok(papers
            .iter()
            .filter(|p| p.status() == Some(status.as_str()))
            .cloned()
            .collect())
    }

    async fn search_papers(&self, title_fragment: &str) -> AppResult<Vec<Paper>> {
        let needle = title_fragment.to_lowercase();
        let papers = self.papers.lock().unwrap();
        Ok(papers
            .iter()
            .filter(|p| {
                p.title()
                    .is_some_and(|t| t.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn recent_papers(&self) -> AppResult<Vec<Paper>> {
        let mut papers = self.papers.lock().unwrap().clone();
        papers.sort_by(|a, b| b.published_date().cmp(&a.published_date()));
        Ok(papers)
    }

    async fn papers_in_category(&self, category: Option<&str>) -> AppResult<Vec<Paper>> {
        let papers = self.papers.lock().unwrap();
        Ok(papers
            .iter()
            .filter(|p| category.map_or(true, |c| p.category() == Some(c)))
            .cloned()
            .collect())
    }

    async fn insert_saved(&self, mut item: SavedItem) -> AppResult<InsertOutcome> {
        let id = ObjectId::new();
        item.id = Some(id);
        self.saves.lock().unwrap().push(item);
        Ok(inserted(id))
    }

    async fn saved_for(&self, email: &str) -> AppResult<Vec<SavedItem>> {
        let saves = self.saves.lock().unwrap();
        Ok(saves.iter().filter(|s| s.user_email == email).cloned().collect())
    }

    async fn delete_saved(&self, id: ObjectId) -> AppResult<DeleteOutcome> {
        let mut saves = self.saves.lock().unwrap();
        Ok(removed(&mut saves, id, |s| s.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(email: &str, bio: &str) -> ProfileUpdate {
        ProfileUpdate {
            email: email.to_string(),
            phone: Some("555-0100".to_string()),
            birthday: None,
            address1: None,
            address2: None,
            bio: Some(bio.to_string()),
        }
    }

    #[tokio::test]
    async fn test_profile_upsert_is_idempotent() {
        let store = MemoryStore::new();

        let first = store.upsert_profile(&profile("a@x.com", "hello")).await.unwrap();
        assert_eq!(first.upserted_count, 1);

        let second = store.upsert_profile(&profile("a@x.com", "hello")).await.unwrap();
        assert_eq!(second.matched_count, 1);
        assert_eq!(second.modified_count, 0);

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].fields["bio"], "hello");
        assert!(users[0].fields["birthday"].is_null());
    }

    #[tokio::test]
    async fn test_delete_missing_id_reports_zero() {
        let store = MemoryStore::new();
        let outcome = store.delete_saved(ObjectId::new()).await.unwrap();
        assert_eq!(outcome.deleted_count, 0);
    }
}
