use crate::model::interaction::InteractionResponseDto;

pub const COMMAND_NAME: &str = "help";

pub const HELP_MESSAGE: &str = "**Hackathon bot commands**
• `/verify email:<registration email>`: link your Discord account to your registration and receive your roles. Run `/verify` without an email to re-check an existing link.
• `/status`: show your registration link, team status and the roles your registration maps to.
• `/find_teammates [interest]`: list free agents with interests or fields of study in common. Add an interest to narrow the search.
• `/help`: show this message.";

pub fn handle() -> InteractionResponseDto {
    InteractionResponseDto::ephemeral(HELP_MESSAGE)
}
