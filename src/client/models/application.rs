//! Application profile models

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::null_as_default;

/// Application profile resource
#[derive(Debug, Clone, Deserialize)]
pub struct Application {
    /// Application GUID
    pub guid: String,

    /// Profile settings
    pub profile: ApplicationProfile,
}

/// Profile section of an application
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationProfile {
    /// Display name
    pub name: String,

    /// Teams with access to the application, in the order the API lists them
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams: Vec<ApplicationTeam>,
}

/// Team membership on an application profile
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationTeam {
    pub team_id: TeamId,

    #[serde(default)]
    pub team_name: String,
}

/// Team identifier.
///
/// The application API reports team ids as numbers on some endpoints and
/// strings on others; both are kept as their decimal/string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TeamId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TeamIdVisitor;

        impl Visitor<'_> for TeamIdVisitor {
            type Value = TeamId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a team id as a string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TeamId, E> {
                Ok(TeamId::new(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TeamId, E> {
                Ok(TeamId::new(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TeamId, E> {
                Ok(TeamId::new(v.to_string()))
            }
        }

        deserializer.deserialize_any(TeamIdVisitor)
    }
}
