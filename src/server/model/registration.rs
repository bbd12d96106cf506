//! Registration domain models.
//!
//! Converts `registrations` rows into the typed shape consumed by role mapping and
//! teammate matching. List columns go through [`parse_list_field`] so every storage
//! format yields the same `Vec<String>`.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::server::util::list::parse_list_field;

/// Registration team status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamMode {
    /// Participating without a team and not seeking one.
    None,
    /// Not yet on a team, seeking one.
    FreeAgent,
    /// Registered with a named team.
    Team,
}

impl TeamMode {
    /// Parses the stored team mode.
    ///
    /// Accepts the canonical values `none`, `free_agent` and `team`, plus the spellings
    /// older registration forms produced. Unknown values yield `None` and are treated as
    /// if the column were NULL.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "none" | "solo" => Some(Self::None),
            "free_agent" | "looking_for_team" | "looking" => Some(Self::FreeAgent),
            "team" | "has_team" => Some(Self::Team),
            _ => None,
        }
    }

    pub fn is_looking_for_team(self) -> bool {
        self == Self::FreeAgent
    }

    /// Short human-readable label for command replies.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Not looking for a team",
            Self::FreeAgent => "Free agent (looking for a team)",
            Self::Team => "On a team",
        }
    }
}

/// Registration attributes that determine which Discord roles a participant receives.
///
/// A read-only snapshot; role computation never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRoleFields {
    pub fields_of_study: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub level_of_study: Option<String>,
    pub school: Option<String>,
    pub school_other: Option<String>,
    pub team_mode: Option<TeamMode>,
    pub team_name: Option<String>,
}

/// A hackathon registration with its Discord link state.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Linked Discord user ID, `None` until the participant verifies.
    pub discord_user_id: Option<u64>,
    pub discord_username: Option<String>,
    pub discord_verified_at: Option<DateTime<Utc>>,
    pub role_fields: RegistrationRoleFields,
}

impl Registration {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The database entity model to convert
    ///
    /// # Returns
    /// - `Ok(Registration)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored discord_user_id is not a valid u64
    pub fn from_entity(entity: entity::registration::Model) -> Result<Self, DbErr> {
        let discord_user_id = entity
            .discord_user_id
            .as_deref()
            .map(|id| {
                id.parse::<u64>()
                    .map_err(|e| DbErr::Custom(format!("Failed to parse discord_user_id: {}", e)))
            })
            .transpose()?;

        let fields_of_study = entity
            .fields_of_study
            .as_ref()
            .map(|value| parse_list_field(Some(value)));
        let interests = entity
            .interests
            .as_ref()
            .map(|value| parse_list_field(Some(value)));

        Ok(Self {
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            discord_user_id,
            discord_username: entity.discord_username,
            discord_verified_at: entity.discord_verified_at,
            role_fields: RegistrationRoleFields {
                fields_of_study,
                interests,
                level_of_study: entity.level_of_study,
                school: entity.school,
                school_other: entity.school_other,
                team_mode: entity.team_mode.as_deref().and_then(TeamMode::parse),
                team_name: entity.team_name,
            },
        })
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}
