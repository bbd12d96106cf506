//! Teammate discovery models.

use super::registration::{Registration, TeamMode};

/// A registration considered for teammate matching.
#[derive(Debug, Clone, PartialEq)]
pub struct TeammateCandidate {
    pub first_name: String,
    pub last_name: String,
    pub school: Option<String>,
    pub level_of_study: Option<String>,
    pub interests: Vec<String>,
    pub fields_of_study: Vec<String>,
    pub discord_user_id: Option<u64>,
    pub team_mode: Option<TeamMode>,
}

impl TeammateCandidate {
    pub fn from_registration(registration: &Registration) -> Self {
        let fields = &registration.role_fields;
        let school = match fields.school.as_deref() {
            Some("Other") => fields.school_other.clone(),
            other => other.map(str::to_string),
        };

        Self {
            first_name: registration.first_name.clone(),
            last_name: registration.last_name.clone(),
            school,
            level_of_study: fields.level_of_study.clone(),
            interests: fields.interests.clone().unwrap_or_default(),
            fields_of_study: fields.fields_of_study.clone().unwrap_or_default(),
            discord_user_id: registration.discord_user_id,
            team_mode: fields.team_mode,
        }
    }

    /// Eligible candidates have a linked Discord account and are looking for a team.
    pub fn is_eligible(&self) -> bool {
        self.discord_user_id.is_some()
            && self
                .team_mode
                .is_some_and(|mode| mode.is_looking_for_team())
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// A scored candidate, computed fresh per query.
#[derive(Debug, Clone, PartialEq)]
pub struct TeammateMatch {
    pub score: u32,
    pub candidate: TeammateCandidate,
    pub matched_interests: Vec<String>,
    pub matched_fields: Vec<String>,
}
