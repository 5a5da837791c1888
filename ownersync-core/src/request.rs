//! Sync request construction from resolved targets.

use crate::error::CoreError;
use crate::targets::{split_list, ResolvedTargets};
use crate::types::{OrgRepoSelector, Platform, SyncRequest};

/// Parse a comma-separated file list into distinct names, first occurrence wins.
pub fn parse_file_names(raw: &str) -> Result<Vec<String>, CoreError> {
    let mut names: Vec<String> = Vec::new();
    for name in split_list(raw) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    if names.is_empty() {
        return Err(CoreError::NoFileNames {
            raw: raw.to_owned(),
        });
    }
    Ok(names)
}

/// Build the requests for one run.
///
/// A run targets a single platform, so this always yields exactly one
/// request. Empty inputs produce a request with nothing to schedule.
pub fn build(
    platform: Platform,
    file_names: Vec<String>,
    resolved: ResolvedTargets,
) -> Vec<SyncRequest> {
    let targets = resolved
        .into_iter()
        .map(|(organization, repositories)| OrgRepoSelector {
            organization,
            repositories,
        })
        .collect();

    vec![SyncRequest {
        platform,
        file_names,
        targets,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::resolve;

    #[test]
    fn parse_file_names_dedupes_in_order() {
        let names = parse_file_names("OWNERS, MAINTAINERS,OWNERS").unwrap();
        assert_eq!(names, vec!["OWNERS", "MAINTAINERS"]);
    }

    #[test]
    fn parse_file_names_rejects_empty_list() {
        let err = parse_file_names(" , ").unwrap_err();
        assert_eq!(
            err,
            CoreError::NoFileNames {
                raw: " , ".to_string()
            }
        );
    }

    #[test]
    fn build_with_no_targets_yields_noop_request() {
        let requests = build(
            Platform::from("gitee"),
            vec!["OWNERS".into()],
            resolve(Vec::<&str>::new()),
        );
        assert_eq!(requests.len(), 1);
        assert!(requests[0].is_noop());
    }
}
