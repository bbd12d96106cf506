//! Registration data repository for database operations.
//!
//! This module provides the `RegistrationRepository` over the `registrations` table. The
//! table is owned by the registration site; the bot only reads rows and writes the three
//! Discord link columns. Entity models are converted to domain models at this boundary.

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait, Func},
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    SqlErr,
};

use crate::server::{
    error::{registration::RegistrationError, AppError},
    model::registration::Registration,
};

use entity::registration::Column;

/// Repository providing database operations for registrations.
pub struct RegistrationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RegistrationRepository<'a> {
    /// Creates a new RegistrationRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `RegistrationRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the registration linked to a Discord user.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID as u64
    ///
    /// # Returns
    /// - `Ok(Some(Registration))` - Registration linked to the user
    /// - `Ok(None)` - The user has not linked a registration
    /// - `Err(DbErr)` - Database error during query or conversion
    pub async fn find_by_discord_id(&self, user_id: u64) -> Result<Option<Registration>, DbErr> {
        let entity = entity::prelude::Registration::find()
            .filter(Column::DiscordUserId.eq(user_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(Registration::from_entity).transpose()
    }

    /// Finds a registration by email, ignoring case.
    ///
    /// The caller is expected to pass an already trimmed and lowercased email. At most two
    /// rows are fetched; a second match means the registration data is inconsistent.
    ///
    /// # Arguments
    /// - `email` - Normalized email address
    ///
    /// # Returns
    /// - `Ok(Some(Registration))` - Exactly one registration matched
    /// - `Ok(None)` - No registration matched
    /// - `Err(AppError::RegistrationErr)` - More than one registration matched
    /// - `Err(AppError::DbErr)` - Database error during query or conversion
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Registration>, AppError> {
        let mut entities = entity::prelude::Registration::find()
            .filter(Expr::expr(Func::lower(Expr::col(Column::Email))).eq(email))
            .limit(2)
            .all(self.db)
            .await?;

        if entities.len() > 1 {
            return Err(RegistrationError::AmbiguousEmail(email.to_string()).into());
        }

        Ok(entities
            .pop()
            .map(Registration::from_entity)
            .transpose()?)
    }

    /// Checks whether a Discord user is linked to a registration other than `email`.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID as u64
    /// - `email` - Stored email of the registration being linked
    ///
    /// # Returns
    /// - `Ok(true)` - Another registration already carries the Discord ID
    /// - `Ok(false)` - The Discord ID is free or only linked to `email`
    /// - `Err(DbErr)` - Database error during query
    pub async fn discord_linked_elsewhere(&self, user_id: u64, email: &str) -> Result<bool, DbErr> {
        let other = entity::prelude::Registration::find()
            .filter(Column::DiscordUserId.eq(user_id.to_string()))
            .filter(Column::Email.ne(email))
            .one(self.db)
            .await?;

        Ok(other.is_some())
    }

    /// Links a registration to a Discord account.
    ///
    /// Sets the Discord user ID, username and verification timestamp on the registration
    /// with the given stored email. Relinking the same Discord ID refreshes the username
    /// and timestamp.
    ///
    /// # Arguments
    /// - `email` - Stored email of the registration
    /// - `user_id` - Discord user ID as u64
    /// - `username` - Discord username, when the interaction carried one
    ///
    /// # Returns
    /// - `Ok(())` - Registration updated (or no row had that email)
    /// - `Err(AppError::RegistrationErr)` - The unique constraint on the Discord ID rejected
    ///   the update because another registration holds it
    /// - `Err(AppError::DbErr)` - Any other database error
    pub async fn link_discord_account(
        &self,
        email: &str,
        user_id: u64,
        username: Option<&str>,
    ) -> Result<(), AppError> {
        let result = entity::prelude::Registration::update_many()
            .filter(Column::Email.eq(email))
            .col_expr(Column::DiscordUserId, Expr::value(user_id.to_string()))
            .col_expr(
                Column::DiscordUsername,
                Expr::value(username.map(str::to_string)),
            )
            .col_expr(Column::DiscordVerifiedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(RegistrationError::DiscordAlreadyLinked(user_id).into())
                }
                _ => Err(err.into()),
            },
        }
    }

    /// Gets every registration linked to a Discord account, except one user's.
    ///
    /// Used as the teammate candidate pool; eligibility filtering happens in the matcher.
    ///
    /// # Arguments
    /// - `excluding_user_id` - Discord user ID to leave out, usually the requester
    ///
    /// # Returns
    /// - `Ok(Vec<Registration>)` - Linked registrations ordered by email
    /// - `Err(DbErr)` - Database error during query or conversion
    pub async fn get_linked_registrations(
        &self,
        excluding_user_id: u64,
    ) -> Result<Vec<Registration>, DbErr> {
        let entities = entity::prelude::Registration::find()
            .filter(Column::DiscordUserId.is_not_null())
            .filter(Column::DiscordUserId.ne(excluding_user_id.to_string()))
            .order_by_asc(Column::Email)
            .all(self.db)
            .await?;

        entities.into_iter().map(Registration::from_entity).collect()
    }
}
