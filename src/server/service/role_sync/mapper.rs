//! Registration fields to Discord role names.
//!
//! Each registration category has a static table of known values and their curated role
//! names. Lookups are case-insensitive on the normalized value; a value missing from the
//! table falls through to the category's `"<Prefix>: <value>"` form.

use std::collections::BTreeSet;

use crate::server::{
    model::registration::{RegistrationRoleFields, TeamMode},
    util::normalize::normalize_role_name,
};

/// Role granted to registrations that are looking for a team.
pub const FREE_AGENT_ROLE_NAME: &str = "Free Agent";

/// Registration categories that map to roles through a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCategory {
    FieldOfStudy,
    Interest,
    LevelOfStudy,
    School,
}

impl RoleCategory {
    /// Prefix of the fallback role name for values without a curated mapping.
    pub fn fallback_prefix(self) -> &'static str {
        match self {
            Self::FieldOfStudy => "Field",
            Self::Interest => "Interest",
            Self::LevelOfStudy => "Level",
            Self::School => "School",
        }
    }

    /// Curated role name for a normalized value, if one exists.
    pub fn mapped_name(self, value: &str) -> Option<&'static str> {
        let key = value.to_lowercase();
        match self {
            Self::FieldOfStudy => field_of_study_role(&key),
            Self::Interest => interest_role(&key),
            Self::LevelOfStudy => level_of_study_role(&key),
            Self::School => school_role(&key),
        }
    }

    /// Role name for a normalized, non-empty value.
    pub fn role_name(self, value: &str) -> String {
        match self.mapped_name(value) {
            Some(mapped) => normalize_role_name(mapped),
            None => normalize_role_name(&format!("{}: {}", self.fallback_prefix(), value)),
        }
    }
}

fn field_of_study_role(key: &str) -> Option<&'static str> {
    let name = match key {
        "aerospace engineering" | "aerospace_engineering" => "Field: Aerospace Engineering",
        "mechanical engineering" | "mechanical_engineering" => "Field: Mechanical Engineering",
        "electrical engineering" | "electrical_engineering" => "Field: Electrical Engineering",
        "computer engineering" | "computer_engineering" => "Field: Computer Engineering",
        "software engineering" | "software_engineering" => "Field: Software Engineering",
        "computer science" | "computer_science" | "cs" => "Field: Computer Science",
        "physics" => "Field: Physics",
        "mathematics" | "math" | "maths" => "Field: Mathematics",
        "business" | "management" => "Field: Business",
        "design" => "Field: Design",
        _ => return None,
    };
    Some(name)
}

fn interest_role(key: &str) -> Option<&'static str> {
    let name = match key {
        "ai" | "artificial intelligence" | "ai/ml" => "Interest: AI",
        "ml" | "machine learning" => "Interest: Machine Learning",
        "robotics" => "Interest: Robotics",
        "drones" | "uav" | "uavs" => "Interest: Drones & UAVs",
        "space" | "space systems" | "satellites" => "Interest: Space Systems",
        "propulsion" => "Interest: Propulsion",
        "avionics" => "Interest: Avionics",
        "embedded" | "embedded systems" => "Interest: Embedded Systems",
        "web" | "web development" | "web dev" => "Interest: Web Development",
        "data science" | "data" => "Interest: Data Science",
        "cad" | "3d modeling" => "Interest: CAD",
        "hardware" => "Interest: Hardware",
        _ => return None,
    };
    Some(name)
}

fn level_of_study_role(key: &str) -> Option<&'static str> {
    let name = match key {
        "high school" | "high_school" | "secondary" => "Level: High School",
        "cegep" | "college" => "Level: CEGEP",
        "undergraduate" | "undergrad" | "bachelor's" | "bachelors" => "Level: Undergraduate",
        "graduate" | "masters" | "master's" | "phd" | "doctorate" => "Level: Graduate",
        "recent graduate" | "alumni" => "Level: Recent Graduate",
        _ => return None,
    };
    Some(name)
}

fn school_role(key: &str) -> Option<&'static str> {
    let name = match key {
        "mcgill university" | "mcgill" => "School: McGill",
        "concordia university" | "concordia" => "School: Concordia",
        "polytechnique montréal" | "polytechnique montreal" => "School: Polytechnique Montréal",
        "école de technologie supérieure" | "ets" | "éts" => "School: ÉTS",
        "université de montréal" | "universite de montreal" | "udem" => "School: UdeM",
        "université de sherbrooke" | "universite de sherbrooke" => "School: Sherbrooke",
        "university of toronto" | "uoft" => "School: UofT",
        "university of waterloo" | "waterloo" => "School: Waterloo",
        _ => return None,
    };
    Some(name)
}

/// Computes the normalized, deduplicated set of role names for a registration.
///
/// Deterministic and side-effect free. An empty registration yields an empty set, in
/// which case callers must not touch the guild at all.
///
/// # Arguments
/// - `registration` - Registration attributes relevant to roles
///
/// # Returns
/// - `BTreeSet<String>` - Desired role names, each non-empty and at most 100 characters
pub fn build_desired_role_names(registration: &RegistrationRoleFields) -> BTreeSet<String> {
    let mut role_names = BTreeSet::new();

    let mut add = |category: RoleCategory, raw: &str| {
        let normalized = normalize_role_name(raw);
        if normalized.is_empty() {
            return;
        }
        let role_name = category.role_name(&normalized);
        if !role_name.is_empty() {
            role_names.insert(role_name);
        }
    };

    for field in registration.fields_of_study.iter().flatten() {
        add(RoleCategory::FieldOfStudy, field);
    }

    for interest in registration.interests.iter().flatten() {
        add(RoleCategory::Interest, interest);
    }

    if let Some(level) = registration.level_of_study.as_deref() {
        add(RoleCategory::LevelOfStudy, level);
    }

    let school = match registration.school.as_deref() {
        Some("Other") => registration.school_other.as_deref(),
        school => school,
    };
    if let Some(school) = school {
        add(RoleCategory::School, school);
    }

    match registration.team_mode {
        Some(TeamMode::FreeAgent) => {
            role_names.insert(FREE_AGENT_ROLE_NAME.to_string());
        }
        Some(TeamMode::Team) => {
            let team_name = normalize_role_name(registration.team_name.as_deref().unwrap_or(""));
            if !team_name.is_empty() {
                role_names.insert(normalize_role_name(&format!("Team: {}", team_name)));
            }
        }
        Some(TeamMode::None) | None => {}
    }

    role_names
}
