//! Domain types for a sync run.
//!
//! A run is described by one or more [`SyncRequest`]s. Each request expands
//! into [`SyncTarget`]s, the unit of work handed to a backend client.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A code-forge platform identifier, e.g. `gitee` or `github`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Platform(pub String);

impl Platform {
    /// Parse a platform identifier, rejecting empty input.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyPlatform);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Platform {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// An organization (owner namespace) on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrgName(pub String);

impl OrgName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for OrgName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrgName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// Scope of a sync inside one organization.
///
/// An empty `repositories` set selects every repository of the organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgRepoSelector {
    pub organization: OrgName,
    pub repositories: BTreeSet<String>,
}

impl OrgRepoSelector {
    /// Selector covering every repository of `organization`.
    pub fn whole_org(organization: impl Into<OrgName>) -> Self {
        Self {
            organization: organization.into(),
            repositories: BTreeSet::new(),
        }
    }

    pub fn is_whole_org(&self) -> bool {
        self.repositories.is_empty()
    }
}

/// One unit of work description for a single platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRequest {
    pub platform: Platform,
    pub file_names: Vec<String>,
    pub targets: Vec<OrgRepoSelector>,
}

impl SyncRequest {
    /// Expand the request into one [`SyncTarget`] per repository, or one
    /// whole-organization target for selectors without explicit repositories.
    pub fn units(&self) -> Vec<SyncTarget> {
        let mut units = Vec::new();
        for selector in &self.targets {
            if selector.is_whole_org() {
                units.push(self.target(&selector.organization, None));
                continue;
            }
            for repo in &selector.repositories {
                units.push(self.target(&selector.organization, Some(repo.clone())));
            }
        }
        units
    }

    /// True when the request has nothing to schedule.
    pub fn is_noop(&self) -> bool {
        self.targets.is_empty() || self.file_names.is_empty()
    }

    fn target(&self, organization: &OrgName, repository: Option<String>) -> SyncTarget {
        SyncTarget {
            platform: self.platform.clone(),
            organization: organization.clone(),
            repository,
            file_names: self.file_names.clone(),
        }
    }
}

/// A single scheduled sync: one organization, optionally narrowed to one
/// repository, carrying the full file list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncTarget {
    pub platform: Platform,
    pub organization: OrgName,
    /// `None` means every repository of the organization.
    pub repository: Option<String>,
    pub file_names: Vec<String>,
}

impl SyncTarget {
    /// Repository label for logs; `*` stands for the whole organization.
    pub fn repo_label(&self) -> &str {
        self.repository.as_deref().unwrap_or("*")
    }
}

impl fmt::Display for SyncTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}/{}",
            self.platform,
            self.organization,
            self.repo_label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(targets: Vec<OrgRepoSelector>) -> SyncRequest {
        SyncRequest {
            platform: Platform::from("gitee"),
            file_names: vec!["OWNERS".to_string()],
            targets,
        }
    }

    #[test]
    fn platform_parse_trims_and_rejects_blank() {
        assert_eq!(Platform::parse(" gitee ").unwrap(), Platform::from("gitee"));
        assert_eq!(Platform::parse("   "), Err(CoreError::EmptyPlatform));
    }

    #[test]
    fn whole_org_selector_expands_to_single_unit() {
        let units = request(vec![OrgRepoSelector::whole_org("openeuler")]).units();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].repository, None);
        assert_eq!(units[0].to_string(), "gitee:openeuler/*");
    }

    #[test]
    fn explicit_repositories_expand_one_unit_each() {
        let selector = OrgRepoSelector {
            organization: OrgName::from("openeuler"),
            repositories: ["kernel", "infra"].iter().map(|s| s.to_string()).collect(),
        };
        let units = request(vec![selector]).units();
        let labels: Vec<_> = units.iter().map(|u| u.repo_label().to_string()).collect();
        assert_eq!(labels, vec!["infra", "kernel"]);
        assert!(units.iter().all(|u| u.file_names == vec!["OWNERS"]));
    }

    #[test]
    fn empty_request_is_noop() {
        assert!(request(vec![]).is_noop());
        assert!(request(vec![]).units().is_empty());
    }
}
