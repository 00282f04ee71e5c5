use async_trait::async_trait;
use uuid::Uuid;

use super::mapping::{user_to_domain, user_to_persistence, UserRow};
use super::{ProfileStore, USERS_TABLE};
use crate::clients::{Query, SupabaseRestClient};
use crate::models::User;
use crate::utils::errors::{AppError, AppResult};

pub struct UserRepository {
    client: SupabaseRestClient,
}

impl UserRepository {
    pub fn new(client: SupabaseRestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileStore for UserRepository {
    async fn find_by_id(&self, id: Uuid, access_token: &str) -> AppResult<Option<User>> {
        let row: Option<UserRow> = self
            .client
            .select_one(USERS_TABLE, &Query::new().eq("id", id), access_token)
            .await?;

        Ok(row.map(user_to_domain))
    }

    async fn create(&self, user: &User, access_token: &str) -> AppResult<User> {
        let rows: Vec<UserRow> = self
            .client
            .insert(USERS_TABLE, &user_to_persistence(user), access_token)
            .await?;

        rows.into_iter()
            .next()
            .map(user_to_domain)
            .ok_or_else(|| AppError::ExternalApi("Profile insert returned no rows".to_string()))
    }
}
