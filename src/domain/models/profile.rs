//! Candidate profiles returned by Find and the selection policy over them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identification status of a candidate profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum ProfileStatus {
    /// Matched to a known identity
    Identified,
    /// Anonymous profile, possibly just created by Find
    Unknown,
    /// Any other status the platform reports
    Other(String),
    /// No status field present, or `null`
    #[default]
    Missing,
}

impl From<String> for ProfileStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "identified" => Self::Identified,
            "unknown" => Self::Unknown,
            _ => Self::Other(value),
        }
    }
}

impl From<Option<String>> for ProfileStatus {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Missing, Self::from)
    }
}

impl From<ProfileStatus> for String {
    fn from(status: ProfileStatus) -> Self {
        match status {
            ProfileStatus::Identified => "identified".to_string(),
            ProfileStatus::Unknown => "unknown".to_string(),
            ProfileStatus::Other(value) => value,
            ProfileStatus::Missing => Self::new(),
        }
    }
}

impl fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identified => f.write_str("identified"),
            Self::Unknown => f.write_str("unknown"),
            Self::Other(value) => f.write_str(value),
            Self::Missing => f.write_str("<none>"),
        }
    }
}

/// One possible identity match. Platform fields other than `sid` and
/// `status` are kept as-is and handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    /// Profile SID
    pub sid: String,

    #[serde(default, skip_serializing_if = "is_missing")]
    pub status: ProfileStatus,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

fn is_missing(status: &ProfileStatus) -> bool {
    *status == ProfileStatus::Missing
}

impl CandidateProfile {
    pub fn new(sid: impl Into<String>, status: ProfileStatus) -> Self {
        Self {
            sid: sid.into(),
            status,
            fields: Map::new(),
        }
    }
}

/// Body of a `Profiles/Find` response
///
/// Entries stay raw until [`into_candidates`](Self::into_candidates) so one
/// malformed candidate cannot fail the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FindProfilesResponse {
    #[serde(default)]
    pub profiles: Option<Vec<Value>>,
}

/// Wrapper the platform puts around each candidate
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileMatch {
    pub profile: CandidateProfile,
}

impl FindProfilesResponse {
    /// Candidates in server order; a missing `profiles` array yields none.
    /// Entries that do not decode are skipped.
    pub fn into_candidates(self) -> Vec<CandidateProfile> {
        self.profiles
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<ProfileMatch>(entry) {
                Ok(m) => Some(m.profile),
                Err(err) => {
                    tracing::debug!(index, error = %err, "skipping undecodable profile candidate");
                    None
                }
            })
            .collect()
    }
}

/// First `identified` candidate, else first `unknown` one, else none.
///
/// Server ordering decides ties; nothing is ranked locally.
pub fn select_profile(candidates: Vec<CandidateProfile>) -> Option<CandidateProfile> {
    let mut fallback = None;
    for candidate in candidates {
        match candidate.status {
            ProfileStatus::Identified => return Some(candidate),
            ProfileStatus::Unknown if fallback.is_none() => fallback = Some(candidate),
            ProfileStatus::Unknown | ProfileStatus::Other(_) | ProfileStatus::Missing => {}
        }
    }
    fallback
}
