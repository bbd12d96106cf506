//! Teammate discovery over linked free-agent registrations.

use std::collections::HashSet;

use crate::server::{
    model::teammate::{TeammateCandidate, TeammateMatch},
    util::normalize::normalize_role_name,
};

/// Default number of matches returned per query.
pub const MAX_TEAMMATE_RESULTS: usize = 10;

const INTEREST_WEIGHT: u32 = 2;
const FIELD_WEIGHT: u32 = 3;

/// Ranks candidate teammates by shared interests and fields of study.
pub struct TeammateMatcher {
    max_results: usize,
}

impl Default for TeammateMatcher {
    fn default() -> Self {
        Self::new(MAX_TEAMMATE_RESULTS)
    }
}

impl TeammateMatcher {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    /// Scores and ranks candidates against the requester's interests and fields.
    ///
    /// Ineligible candidates (no linked Discord account, or not looking for a team) are
    /// dropped first. With a filter, candidates whose interests and fields do not contain
    /// the filter text case-insensitively are dropped too. Each shared interest is worth 2
    /// and each shared field of study 3; candidates sharing nothing stay in the ranking
    /// with a score of 0.
    ///
    /// # Arguments
    /// - `user_interests` - Requester's interests as parsed from their registration
    /// - `user_fields` - Requester's fields of study
    /// - `candidates` - Candidate pool, usually every linked registration except the requester
    /// - `filter` - Optional free-text filter; blank filters are ignored
    ///
    /// # Returns
    /// - `Vec<TeammateMatch>` - Matches by descending score, then display name, at most
    ///   `max_results` long
    pub fn match_teammates(
        &self,
        user_interests: &[String],
        user_fields: &[String],
        candidates: Vec<TeammateCandidate>,
        filter: Option<&str>,
    ) -> Vec<TeammateMatch> {
        let interest_keys = normalized_keys(user_interests);
        let field_keys = normalized_keys(user_fields);
        let filter = filter
            .map(|text| normalize_role_name(text).to_lowercase())
            .filter(|text| !text.is_empty());

        let mut matches: Vec<TeammateMatch> = candidates
            .into_iter()
            .filter(TeammateCandidate::is_eligible)
            .filter(|candidate| match &filter {
                Some(text) => searchable_text(candidate).contains(text.as_str()),
                None => true,
            })
            .map(|candidate| {
                let matched_interests = shared_entries(&candidate.interests, &interest_keys);
                let matched_fields = shared_entries(&candidate.fields_of_study, &field_keys);
                let score = INTEREST_WEIGHT * matched_interests.len() as u32
                    + FIELD_WEIGHT * matched_fields.len() as u32;

                TeammateMatch {
                    score,
                    candidate,
                    matched_interests,
                    matched_fields,
                }
            })
            .collect();

        matches.sort_by_cached_key(|m| {
            (
                std::cmp::Reverse(m.score),
                m.candidate.display_name().to_lowercase(),
            )
        });
        matches.truncate(self.max_results);

        matches
    }
}

fn normalized_keys(entries: &[String]) -> HashSet<String> {
    entries
        .iter()
        .map(|entry| normalize_role_name(entry).to_lowercase())
        .filter(|key| !key.is_empty())
        .collect()
}

/// Candidate entries present in `keys`, in the candidate's order, without duplicates.
fn shared_entries(entries: &[String], keys: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|entry| normalize_role_name(entry))
        .filter(|entry| {
            let key = entry.to_lowercase();
            keys.contains(&key) && seen.insert(key)
        })
        .collect()
}

fn searchable_text(candidate: &TeammateCandidate) -> String {
    candidate
        .interests
        .iter()
        .chain(candidate.fields_of_study.iter())
        .map(|entry| normalize_role_name(entry))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::registration::TeamMode;

    fn candidate(first: &str, interests: &[&str], fields: &[&str]) -> TeammateCandidate {
        TeammateCandidate {
            first_name: first.to_string(),
            last_name: "Tester".to_string(),
            school: None,
            level_of_study: None,
            interests: interests.iter().map(|s| s.to_string()).collect(),
            fields_of_study: fields.iter().map(|s| s.to_string()).collect(),
            discord_user_id: Some(1),
            team_mode: Some(TeamMode::FreeAgent),
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn ranked_names(matches: &[TeammateMatch]) -> Vec<String> {
        matches.iter().map(|m| m.candidate.first_name.clone()).collect()
    }

    #[test]
    fn ranks_by_weighted_overlap() {
        let candidates = vec![
            candidate("A", &["AI"], &[]),
            candidate("B", &["ai", "Robotics"], &["Physics"]),
            candidate("C", &["Web"], &[]),
        ];

        let matches = TeammateMatcher::default().match_teammates(
            &strings(&["ai", "robotics"]),
            &strings(&["physics"]),
            candidates,
            None,
        );

        assert_eq!(ranked_names(&matches), vec!["B", "A", "C"]);
        assert_eq!(matches[0].score, 7);
        assert_eq!(matches[0].matched_interests, strings(&["ai", "Robotics"]));
        assert_eq!(matches[0].matched_fields, strings(&["Physics"]));
        assert_eq!(matches[1].score, 2);
        assert_eq!(matches[2].score, 0);
    }

    #[test]
    fn one_interest_and_one_field_outranks_one_interest() {
        let candidates = vec![
            candidate("A", &["ai"], &[]),
            candidate("B", &["ai"], &["Aerospace Engineering"]),
            candidate("C", &[], &[]),
        ];

        let matches = TeammateMatcher::default().match_teammates(
            &strings(&["ai", "robotics"]),
            &strings(&["aerospace   engineering"]),
            candidates,
            None,
        );

        assert_eq!(ranked_names(&matches), vec!["B", "A", "C"]);
        assert_eq!(matches[0].score, 5);
    }

    #[test]
    fn ties_break_by_display_name() {
        let candidates = vec![
            candidate("zoe", &["AI"], &[]),
            candidate("Adam", &["AI"], &[]),
            candidate("mia", &["AI"], &[]),
        ];

        let matches =
            TeammateMatcher::default().match_teammates(&strings(&["AI"]), &[], candidates, None);

        assert_eq!(ranked_names(&matches), vec!["Adam", "mia", "zoe"]);
    }

    #[test]
    fn filter_drops_candidates_without_text() {
        let candidates = vec![
            candidate("A", &["Machine Learning"], &[]),
            candidate("B", &["Robotics"], &["Mechanical Engineering"]),
            candidate("C", &["Web"], &[]),
        ];

        let matches = TeammateMatcher::default().match_teammates(
            &[],
            &[],
            candidates,
            Some("  MECHANICAL "),
        );

        assert_eq!(ranked_names(&matches), vec!["B"]);
    }

    #[test]
    fn blank_filter_is_ignored() {
        let candidates = vec![candidate("A", &[], &[]), candidate("B", &[], &[])];

        let matches =
            TeammateMatcher::default().match_teammates(&[], &[], candidates, Some("   "));

        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn ineligible_candidates_are_dropped() {
        let mut unlinked = candidate("Unlinked", &["AI"], &[]);
        unlinked.discord_user_id = None;
        let mut on_team = candidate("OnTeam", &["AI"], &[]);
        on_team.team_mode = Some(TeamMode::Team);
        let mut unknown_mode = candidate("Unknown", &["AI"], &[]);
        unknown_mode.team_mode = None;

        let matches = TeammateMatcher::default().match_teammates(
            &strings(&["AI"]),
            &[],
            vec![unlinked, on_team, unknown_mode, candidate("Eligible", &[], &[])],
            None,
        );

        assert_eq!(ranked_names(&matches), vec!["Eligible"]);
    }

    #[test]
    fn caps_result_count() {
        let candidates = (0..15)
            .map(|i| candidate(&format!("Candidate {:02}", i), &["AI"], &[]))
            .collect();

        let matches =
            TeammateMatcher::new(10).match_teammates(&strings(&["AI"]), &[], candidates, None);

        assert_eq!(matches.len(), 10);
        assert_eq!(matches[0].candidate.first_name, "Candidate 00");
    }

    #[test]
    fn duplicate_candidate_entries_count_once() {
        let matches = TeammateMatcher::default().match_teammates(
            &strings(&["AI"]),
            &[],
            vec![candidate("A", &["AI", " ai "], &[])],
            None,
        );

        assert_eq!(matches[0].score, 2);
        assert_eq!(matches[0].matched_interests, strings(&["AI"]));
    }
}
