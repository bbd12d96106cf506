use sea_orm::entity::prelude::*;

/// A hackathon registration row.
///
/// `fields_of_study` and `interests` are JSON because the registration site has stored
/// them as native arrays, JSON-encoded strings and comma-separated strings over time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "registrations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub discord_user_id: Option<String>,
    pub discord_username: Option<String>,
    pub discord_verified_at: Option<DateTimeUtc>,
    pub fields_of_study: Option<Json>,
    pub interests: Option<Json>,
    pub level_of_study: Option<String>,
    pub school: Option<String>,
    pub school_other: Option<String>,
    pub team_mode: Option<String>,
    pub team_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
