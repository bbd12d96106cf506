//! Registration factory for creating test registration rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::Value;

/// Factory for creating test registrations with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::registration::RegistrationFactory;
///
/// let registration = RegistrationFactory::new(&db)
///     .email("ada@example.com")
///     .name("Ada", "Lovelace")
///     .discord_user_id("123456789")
///     .build()
///     .await?;
/// ```
pub struct RegistrationFactory<'a> {
    db: &'a DatabaseConnection,
    model: entity::registration::Model,
}

impl<'a> RegistrationFactory<'a> {
    /// Creates a new RegistrationFactory with default values.
    ///
    /// Defaults:
    /// - email: `"participant{id}@example.com"` where id is auto-incremented
    /// - first_name / last_name: `"Participant"` / `"{id}"`
    /// - no Discord link and every optional column NULL
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the row
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            model: entity::registration::Model {
                email: format!("participant{}@example.com", id),
                first_name: "Participant".to_string(),
                last_name: id.to_string(),
                discord_user_id: None,
                discord_username: None,
                discord_verified_at: None,
                fields_of_study: None,
                interests: None,
                level_of_study: None,
                school: None,
                school_other: None,
                team_mode: None,
                team_name: None,
            },
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.model.email = email.into();
        self
    }

    pub fn name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.model.first_name = first_name.into();
        self.model.last_name = last_name.into();
        self
    }

    /// Links the registration to a Discord account verified now.
    ///
    /// # Arguments
    /// - `discord_user_id` - Discord user ID as string
    pub fn discord_user_id(mut self, discord_user_id: impl Into<String>) -> Self {
        let discord_user_id = discord_user_id.into();
        self.model.discord_username = Some(format!("user{}", discord_user_id));
        self.model.discord_user_id = Some(discord_user_id);
        self.model.discord_verified_at = Some(Utc::now());
        self
    }

    /// Sets the interests column to any JSON shape the registration site has produced.
    pub fn interests(mut self, interests: Value) -> Self {
        self.model.interests = Some(interests);
        self
    }

    /// Sets the fields-of-study column to any JSON shape the registration site has produced.
    pub fn fields_of_study(mut self, fields_of_study: Value) -> Self {
        self.model.fields_of_study = Some(fields_of_study);
        self
    }

    pub fn level_of_study(mut self, level_of_study: impl Into<String>) -> Self {
        self.model.level_of_study = Some(level_of_study.into());
        self
    }

    /// Sets the school and, for `"Other"`, the free-text school name.
    pub fn school(mut self, school: impl Into<String>, school_other: Option<&str>) -> Self {
        self.model.school = Some(school.into());
        self.model.school_other = school_other.map(str::to_string);
        self
    }

    pub fn team_mode(mut self, team_mode: impl Into<String>) -> Self {
        self.model.team_mode = Some(team_mode.into());
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.model.team_name = Some(team_name.into());
        self
    }

    /// Builds and inserts the registration row into the database.
    ///
    /// # Returns
    /// - `Ok(entity::registration::Model)` - Created registration row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::registration::Model, DbErr> {
        let model = self.model;
        entity::registration::ActiveModel {
            email: ActiveValue::Set(model.email),
            first_name: ActiveValue::Set(model.first_name),
            last_name: ActiveValue::Set(model.last_name),
            discord_user_id: ActiveValue::Set(model.discord_user_id),
            discord_username: ActiveValue::Set(model.discord_username),
            discord_verified_at: ActiveValue::Set(model.discord_verified_at),
            fields_of_study: ActiveValue::Set(model.fields_of_study),
            interests: ActiveValue::Set(model.interests),
            level_of_study: ActiveValue::Set(model.level_of_study),
            school: ActiveValue::Set(model.school),
            school_other: ActiveValue::Set(model.school_other),
            team_mode: ActiveValue::Set(model.team_mode),
            team_name: ActiveValue::Set(model.team_name),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unlinked registration with default values.
///
/// Shorthand for `RegistrationFactory::new(db).build().await`.
pub async fn create_registration(
    db: &DatabaseConnection,
) -> Result<entity::registration::Model, DbErr> {
    RegistrationFactory::new(db).build().await
}

/// Creates a registration linked to the given Discord user ID.
///
/// Shorthand for `RegistrationFactory::new(db).discord_user_id(id).build().await`.
pub async fn create_linked_registration(
    db: &DatabaseConnection,
    discord_user_id: impl Into<String>,
) -> Result<entity::registration::Model, DbErr> {
    RegistrationFactory::new(db)
        .discord_user_id(discord_user_id)
        .build()
        .await
}
