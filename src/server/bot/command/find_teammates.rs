//! `/find_teammates [interest]`: list free agents with overlapping interests.

use dioxus_logger::tracing;

use crate::{
    model::interaction::{InteractionDto, InteractionResponseDto},
    server::{
        bot::command::{Invoker, INTERNAL_ERROR_MESSAGE},
        data::registration::RegistrationRepository,
        error::AppError,
        model::teammate::{TeammateCandidate, TeammateMatch},
        service::teammate::TeammateMatcher,
        state::AppState,
    },
};

pub const COMMAND_NAME: &str = "find_teammates";
pub const INTEREST_OPTION: &str = "interest";

/// Discord caps messages at 2000 characters; the rest is headroom for the footer.
pub const REPLY_CHAR_BUDGET: usize = 1900;

pub const NOT_LINKED_MESSAGE: &str =
    "Link your registration with /verify before searching for teammates.";

pub async fn handle(
    state: &AppState,
    interaction: &InteractionDto,
    invoker: Invoker,
) -> InteractionResponseDto {
    let filter = interaction.string_option(INTEREST_OPTION);

    match find(state, invoker.user_id, filter).await {
        Ok(content) => InteractionResponseDto::ephemeral(content),
        Err(e) => {
            tracing::error!(
                "Failed to find teammates for user {}: {}",
                invoker.user_id,
                e
            );
            InteractionResponseDto::ephemeral(INTERNAL_ERROR_MESSAGE)
        }
    }
}

async fn find(state: &AppState, user_id: u64, filter: Option<&str>) -> Result<String, AppError> {
    let repo = RegistrationRepository::new(&state.db);

    let Some(requester) = repo.find_by_discord_id(user_id).await? else {
        return Ok(NOT_LINKED_MESSAGE.to_string());
    };

    let candidates = repo
        .get_linked_registrations(user_id)
        .await?
        .iter()
        .map(TeammateCandidate::from_registration)
        .collect();

    let fields = &requester.role_fields;
    let matches = TeammateMatcher::default().match_teammates(
        fields.interests.as_deref().unwrap_or_default(),
        fields.fields_of_study.as_deref().unwrap_or_default(),
        candidates,
        filter,
    );

    Ok(render_matches(&matches, filter, REPLY_CHAR_BUDGET))
}

/// Renders ranked matches as a message no longer than `budget` characters.
///
/// Entries are added in rank order until the next one would exceed the budget; a
/// footer then notes how many were left out.
pub fn render_matches(matches: &[TeammateMatch], filter: Option<&str>, budget: usize) -> String {
    let filter = filter.map(str::trim).filter(|text| !text.is_empty());

    if matches.is_empty() {
        return match filter {
            Some(text) => format!("No free agents matching \"{}\" right now. Check back later!", text),
            None => "No free agents found right now. Check back later!".to_string(),
        };
    }

    let mut content = match filter {
        Some(text) => format!("**Free agents matching \"{}\"**\n", text),
        None => "**Free agents you might team up with**\n".to_string(),
    };
    let mut length = content.chars().count();

    for (index, teammate) in matches.iter().enumerate() {
        let entry = render_entry(index + 1, teammate);
        let entry_length = entry.chars().count();
        let remaining = matches.len() - index;

        let footer = omitted_footer(remaining);
        let reserve = if remaining > 1 { footer.chars().count() } else { 0 };

        if length + entry_length + reserve > budget {
            if length + footer.chars().count() <= budget {
                content.push_str(&footer);
            }
            break;
        }

        content.push_str(&entry);
        length += entry_length;
    }

    content.trim_end().to_string()
}

fn render_entry(rank: usize, teammate: &TeammateMatch) -> String {
    let candidate = &teammate.candidate;
    let mention = candidate
        .discord_user_id
        .map(|id| format!(" (<@{}>)", id))
        .unwrap_or_default();

    let mut entry = format!(
        "{}. **{}**{} · score {}\n",
        rank,
        candidate.display_name(),
        mention,
        teammate.score
    );

    let details: Vec<&str> = [candidate.school.as_deref(), candidate.level_of_study.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !details.is_empty() {
        entry.push_str(&format!("   {}\n", details.join(" · ")));
    }

    if !teammate.matched_interests.is_empty() {
        entry.push_str(&format!(
            "   Shared interests: {}\n",
            teammate.matched_interests.join(", ")
        ));
    }
    if !teammate.matched_fields.is_empty() {
        entry.push_str(&format!(
            "   Shared fields: {}\n",
            teammate.matched_fields.join(", ")
        ));
    }

    entry
}

fn omitted_footer(count: usize) -> String {
    format!("…and {} more not shown.", count)
}
