//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::info;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Role, User, UserAccount, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert `accounts` whose usernames are not yet taken.
    ///
    /// Existing rows are left untouched, so seeding is safe to repeat.
    pub async fn seed(&self, accounts: &[UserAccount]) -> Result<usize, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NewUserRow<'_>> = accounts
            .iter()
            .map(|account| {
                let user = account.user();
                NewUserRow {
                    id: *user.id().as_uuid(),
                    username: user.username(),
                    password_hash: account.password_hash(),
                    email: user.email(),
                    role: user.role().as_str(),
                }
            })
            .collect();

        let inserted = diesel::insert_into(users::table)
            .values(&rows)
            .on_conflict(users::username)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        info!(inserted, "seeded user accounts");
        Ok(inserted)
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn row_to_account(row: UserRow) -> UserAccount {
    let UserRow {
        id,
        username,
        password_hash,
        email,
        role,
    } = row;
    UserAccount::new(
        User::new(UserId::from_uuid(id), username, email, Role::from(role)),
        password_hash,
    )
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_account))
    }
}
