//! Linking Discord accounts to hackathon registrations.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::registration::RegistrationRepository,
    error::{registration::RegistrationError, AppError},
    model::registration::Registration,
    util::normalize::normalize_email,
};

/// Result of a `/verify` attempt, before any role synchronisation.
#[derive(Debug, Clone, PartialEq)]
pub enum VerifyOutcome {
    /// The Discord account is linked to this registration.
    Verified {
        registration: Registration,
        /// False when the account was already linked before this attempt.
        newly_linked: bool,
    },
    /// No email was given and the account is not linked yet.
    NeedsEmail,
    /// No registration matches the given email.
    NotFound,
    /// The Discord account is already linked to a different registration.
    DiscordLinkedElsewhere,
    /// The registration is already linked to a different Discord account.
    RegistrationLinkedToOther,
}

pub struct VerificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VerificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Verifies a Discord user, optionally by registration email.
    ///
    /// Without an email the user is verified only if already linked. With an email the
    /// matching registration is linked to the user unless either side is already linked
    /// elsewhere. A unique-constraint race on the link is reported the same way as the
    /// up-front linked-elsewhere check.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID of the invoking user
    /// - `username` - Discord username, stored with the link
    /// - `email` - Email option as typed by the user, if any
    ///
    /// # Returns
    /// - `Ok(VerifyOutcome)` - Outcome to report to the user
    /// - `Err(AppError)` - Database error or ambiguous registration data
    pub async fn verify(
        &self,
        user_id: u64,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<VerifyOutcome, AppError> {
        let repo = RegistrationRepository::new(self.db);

        let email = email.map(normalize_email).filter(|email| !email.is_empty());
        let Some(email) = email else {
            return Ok(match repo.find_by_discord_id(user_id).await? {
                Some(registration) => VerifyOutcome::Verified {
                    registration,
                    newly_linked: false,
                },
                None => VerifyOutcome::NeedsEmail,
            });
        };

        let Some(registration) = repo.find_by_email(&email).await? else {
            tracing::info!("No registration found for verification attempt by {}", user_id);
            return Ok(VerifyOutcome::NotFound);
        };

        if repo
            .discord_linked_elsewhere(user_id, &registration.email)
            .await?
        {
            return Ok(VerifyOutcome::DiscordLinkedElsewhere);
        }

        let newly_linked = match registration.discord_user_id {
            Some(linked) if linked != user_id => {
                return Ok(VerifyOutcome::RegistrationLinkedToOther);
            }
            Some(_) => false,
            None => true,
        };

        // Re-verifying the same account refreshes the stored username and timestamp.
        match repo
            .link_discord_account(&registration.email, user_id, username)
            .await
        {
            Ok(()) => {}
            Err(AppError::RegistrationErr(RegistrationError::DiscordAlreadyLinked(_))) => {
                return Ok(VerifyOutcome::DiscordLinkedElsewhere);
            }
            Err(e) => return Err(e),
        }

        if newly_linked {
            tracing::info!(
                "Linked Discord user {} to registration {}",
                user_id,
                registration.email
            );
        }

        let registration = Registration {
            discord_user_id: Some(user_id),
            discord_username: username.map(str::to_string),
            ..registration
        };

        Ok(VerifyOutcome::Verified {
            registration,
            newly_linked,
        })
    }
}
