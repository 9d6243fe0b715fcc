use async_trait::async_trait;
use chrono::Utc;
use models::{NewResult, SavedResult, User};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ApiError, Result};

const USERS_FILE: &str = "users.json";
const RESULTS_FILE: &str = "results.json";

/// Storage for users and their saved analyses.
/// This abstraction allows swapping between file-based and database-backed implementations
#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn create_user(&self, name: &str, email: &str) -> Result<User>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list_users(&self) -> Result<Vec<User>>;
    /// Removes the user and every result saved for them.
    async fn delete_user(&self, user_id: &str) -> Result<()>;

    async fn save_result(&self, result: NewResult) -> Result<SavedResult>;
    /// All results, newest first.
    async fn list_results(&self) -> Result<Vec<SavedResult>>;
    /// Results for one user, newest first.
    async fn results_for_user(&self, user_id: &str) -> Result<Vec<SavedResult>>;
    async fn get_result(&self, result_id: &str) -> Result<Option<SavedResult>>;
    async fn delete_result(&self, result_id: &str) -> Result<()>;
}

/// File-based implementation storing `users.json` and `results.json`
pub struct FileResultRepository {
    users_path: PathBuf,
    results_path: PathBuf,
    lock: RwLock<()>,
}

impl FileResultRepository {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            users_path: data_dir.join(USERS_FILE),
            results_path: data_dir.join(RESULTS_FILE),
            lock: RwLock::new(()),
        }
    }

    async fn load_users(&self) -> Vec<User> {
        read_list(&self.users_path).await
    }

    async fn load_results(&self) -> Vec<SavedResult> {
        read_list(&self.results_path).await
    }
}

/// A missing, unreadable or corrupt file reads as an empty list.
async fn read_list<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read data file, treating as empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Corrupt data file, treating as empty");
            Vec::new()
        }
    }
}

async fn write_list<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_string_pretty(items)?;
    tokio::fs::write(path, content).await?;
    Ok(())
}

fn newest_first(mut results: Vec<SavedResult>) -> Vec<SavedResult> {
    results.reverse();
    results.sort_by(|a, b| b.date.cmp(&a.date));
    results
}

#[async_trait]
impl ResultRepository for FileResultRepository {
    async fn create_user(&self, name: &str, email: &str) -> Result<User> {
        let _guard = self.lock.write().await;
        let mut users = self.load_users().await;

        if users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(ApiError::Conflict(format!("A user with email {email} already exists")));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        write_list(&self.users_path, &users).await?;

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let _guard = self.lock.read().await;
        Ok(self
            .load_users()
            .await
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let _guard = self.lock.read().await;
        Ok(self.load_users().await)
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        let _guard = self.lock.write().await;
        let mut users = self.load_users().await;
        let before = users.len();
        users.retain(|u| u.id != user_id);
        if users.len() == before {
            return Err(ApiError::NotFound(format!("User {user_id} not found")));
        }

        let mut results = self.load_results().await;
        let results_before = results.len();
        results.retain(|r| r.user_id != user_id);

        write_list(&self.users_path, &users).await?;
        write_list(&self.results_path, &results).await?;

        tracing::info!(
            user_id,
            removed_results = results_before - results.len(),
            "Deleted user"
        );
        Ok(())
    }

    async fn save_result(&self, result: NewResult) -> Result<SavedResult> {
        let _guard = self.lock.write().await;
        let mut results = self.load_results().await;

        let saved = SavedResult {
            id: Uuid::new_v4().to_string(),
            user_id: result.user_id,
            user_name: result.user_name,
            date: Utc::now(),
            income: result.income,
            expenses: result.expenses,
            goals: result.goals,
            metrics: result.metrics,
            ai_advice: result.ai_advice,
            health_score: result.health_score,
        };
        results.push(saved.clone());
        write_list(&self.results_path, &results).await?;

        tracing::info!(result_id = %saved.id, user_id = %saved.user_id, "Saved analysis result");
        Ok(saved)
    }

    async fn list_results(&self) -> Result<Vec<SavedResult>> {
        let _guard = self.lock.read().await;
        Ok(newest_first(self.load_results().await))
    }

    async fn results_for_user(&self, user_id: &str) -> Result<Vec<SavedResult>> {
        let _guard = self.lock.read().await;
        let results = self
            .load_results()
            .await
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect();
        Ok(newest_first(results))
    }

    async fn get_result(&self, result_id: &str) -> Result<Option<SavedResult>> {
        let _guard = self.lock.read().await;
        Ok(self.load_results().await.into_iter().find(|r| r.id == result_id))
    }

    async fn delete_result(&self, result_id: &str) -> Result<()> {
        let _guard = self.lock.write().await;
        let mut results = self.load_results().await;
        let before = results.len();
        results.retain(|r| r.id != result_id);
        if results.len() == before {
            return Err(ApiError::NotFound(format!("Result {result_id} not found")));
        }
        write_list(&self.results_path, &results).await?;
        Ok(())
    }
}
