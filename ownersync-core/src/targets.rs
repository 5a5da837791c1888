//! Resolution of `org` / `org/repo` tokens into per-organization scopes.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::OrgName;

/// Separator between organization and repository inside a token.
pub const ORG_REPO_SEPARATOR: char = '/';

/// Separator between tokens in a flat option value.
pub const LIST_SEPARATOR: char = ',';

/// Organization → explicit repositories. An empty set means "all repositories".
///
/// Callers must not rely on iteration order.
pub type ResolvedTargets = BTreeMap<OrgName, BTreeSet<String>>;

/// Split a comma-separated option value into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Resolve tokens in input order.
///
/// - empty tokens, and tokens whose organization part is empty, are skipped
/// - `org` registers the organization with no explicit repositories
/// - `org/repo` adds `repo` to the organization's set
/// - segments after the second separator are ignored (`a/b/c` is `a/b`)
///
/// Sets only ever grow: a bare `org` after `org/repo` leaves the explicit
/// repositories in place rather than widening the scope to the whole org.
pub fn resolve<I, S>(tokens: I) -> ResolvedTargets
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut resolved = ResolvedTargets::new();

    for token in tokens {
        let mut parts = token.as_ref().split(ORG_REPO_SEPARATOR).map(str::trim);
        let org = parts.next().unwrap_or_default();
        if org.is_empty() {
            continue;
        }
        let repo = parts.next().filter(|repo| !repo.is_empty());

        let repos = resolved.entry(OrgName::from(org)).or_default();
        if let Some(repo) = repo {
            repos.insert(repo.to_owned());
        }
    }

    resolved
}
