//! `/status`: show the caller's registration link and the roles it maps to.

use dioxus_logger::tracing;

use crate::{
    model::interaction::InteractionResponseDto,
    server::{
        bot::command::{Invoker, INTERNAL_ERROR_MESSAGE},
        data::registration::RegistrationRepository,
        model::registration::{Registration, TeamMode},
        service::role_sync::mapper::build_desired_role_names,
        state::AppState,
    },
};

pub const COMMAND_NAME: &str = "status";

pub const NOT_LINKED_MESSAGE: &str = "You haven't linked a registration yet. Run /verify email:<your registration email> to get started.";

pub async fn handle(state: &AppState, invoker: Invoker) -> InteractionResponseDto {
    let repo = RegistrationRepository::new(&state.db);

    match repo.find_by_discord_id(invoker.user_id).await {
        Ok(registration) => InteractionResponseDto::ephemeral(status_reply(registration.as_ref())),
        Err(e) => {
            tracing::error!("Failed to load status for user {}: {}", invoker.user_id, e);
            InteractionResponseDto::ephemeral(INTERNAL_ERROR_MESSAGE)
        }
    }
}

/// Builds the `/status` reply for a possibly missing registration.
pub fn status_reply(registration: Option<&Registration>) -> String {
    let Some(registration) = registration else {
        return NOT_LINKED_MESSAGE.to_string();
    };

    let fields = &registration.role_fields;
    let team_status = match fields.team_mode {
        Some(TeamMode::Team) => match fields.team_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("{} ({})", TeamMode::Team.label(), name),
            _ => TeamMode::Team.label().to_string(),
        },
        Some(mode) => mode.label().to_string(),
        None => "Not specified".to_string(),
    };

    let role_names = build_desired_role_names(fields);
    let roles = if role_names.is_empty() {
        "none".to_string()
    } else {
        role_names.into_iter().collect::<Vec<_>>().join(", ")
    };

    format!(
        "✅ Linked to registration: {}\nTeam status: {}\nRoles from your registration: {}",
        registration.display_name(),
        team_status,
        roles
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::registration::RegistrationRoleFields;

    fn registration(role_fields: RegistrationRoleFields) -> Registration {
        Registration {
            email: "grace@example.com".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            discord_user_id: Some(7),
            discord_username: Some("grace".to_string()),
            discord_verified_at: None,
            role_fields,
        }
    }

    #[test]
    fn unlinked_user_is_told_to_verify() {
        assert_eq!(status_reply(None), NOT_LINKED_MESSAGE);
    }

    #[test]
    fn lists_team_and_mapped_roles() {
        let registration = registration(RegistrationRoleFields {
            interests: Some(vec!["AI".to_string()]),
            team_mode: Some(TeamMode::Team),
            team_name: Some("Apollo".to_string()),
            ..Default::default()
        });

        assert_eq!(
            status_reply(Some(&registration)),
            "✅ Linked to registration: Grace Hopper\nTeam status: On a team (Apollo)\nRoles from your registration: Interest: AI, Team: Apollo"
        );
    }

    #[test]
    fn empty_registration_has_no_roles() {
        let registration = registration(RegistrationRoleFields::default());

        let reply = status_reply(Some(&registration));

        assert!(reply.contains("Team status: Not specified"));
        assert!(reply.ends_with("Roles from your registration: none"));
    }
}
