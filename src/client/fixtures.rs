//! Test fixtures and builders for API model types
//!
//! Import via `use crate::client::fixtures::*` in test modules.

use chrono::{DateTime, Duration, FixedOffset, Utc};

use super::models::{
    ApiCredentials, Application, ApplicationProfile, ApplicationTeam, TeamId, Workspace,
};

/// Builder for test `Application` instances.
///
/// # Example
/// ```ignore
/// let app = ApplicationBuilder::new("guid-1", "Payments API")
///     .team("101", "Payments")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ApplicationBuilder {
    guid: String,
    name: String,
    teams: Vec<ApplicationTeam>,
}

impl ApplicationBuilder {
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
            teams: Vec::new(),
        }
    }

    /// Append a team membership.
    pub fn team(mut self, team_id: impl Into<String>, team_name: impl Into<String>) -> Self {
        self.teams.push(ApplicationTeam {
            team_id: TeamId::new(team_id),
            team_name: team_name.into(),
        });
        self
    }

    pub fn build(self) -> Application {
        Application {
            guid: self.guid,
            profile: ApplicationProfile {
                name: self.name,
                teams: self.teams,
            },
        }
    }
}

/// Workspace with the given id, name and project count
pub fn workspace(id: impl Into<String>, name: impl Into<String>, projects_count: u64) -> Workspace {
    Workspace {
        id: id.into(),
        name: name.into(),
        projects_count,
        teams: Vec::new(),
    }
}

/// Credentials expiring `remaining` after `now`
pub fn credentials_expiring(now: DateTime<Utc>, remaining: Duration) -> ApiCredentials {
    let utc = FixedOffset::east_opt(0).expect("zero offset is valid");
    ApiCredentials {
        api_id: "3f2a1b".to_string(),
        expiration_ts: (now + remaining).with_timezone(&utc),
    }
}
