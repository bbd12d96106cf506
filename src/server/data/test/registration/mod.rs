use crate::server::{
    data::registration::RegistrationRepository,
    error::{registration::RegistrationError, AppError},
};
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{self, registration::RegistrationFactory},
};

mod discord_linked_elsewhere;
mod find_by_discord_id;
mod find_by_email;
mod get_linked_registrations;
mod link_discord_account;
