//! Decides which identifiers each source is queried with.
//!
//! Resolution happens in three steps around the directory lookup:
//! [`select`] builds empty targets, [`ResolvedTargets::apply_directory`] seeds
//! them from a confirmed member and [`ResolvedTargets::finalize`] fills the
//! remaining slots from the raw query. Every step is pure.

use insight_core::{is_email_shaped, local_part, Query, SearchMode};
use insight_sources::{DirectoryMember, MemberQuery};

/// Identifiers resolved for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTargets {
    /// Email to check for breaches
    pub email: Option<String>,
    /// Username to scrape
    pub username: Option<String>,
    /// Member confirmed by the directory
    pub member: Option<DirectoryMember>,
    mode: SearchMode,
}

/// Whether the directory lookup runs for this query.
#[must_use]
pub fn directory_eligible(query: &Query) -> bool {
    query.mode().allows_directory() && query.scope().is_some()
}

/// How to ask the directory about this query.
#[must_use]
pub fn member_query(query: &Query) -> MemberQuery {
    if query.is_member_id() {
        MemberQuery::Ids(vec![query.raw().to_string()])
    } else {
        MemberQuery::Text(query.raw().to_string())
    }
}

/// Empty targets carrying the query's mode.
#[must_use]
pub fn select(query: &Query) -> ResolvedTargets {
    ResolvedTargets {
        mode: query.mode(),
        ..ResolvedTargets::default()
    }
}

/// Run the full resolution for a known directory result.
#[must_use]
pub fn resolve(query: &Query, member: Option<DirectoryMember>) -> ResolvedTargets {
    let mut targets = select(query);
    targets.apply_directory(member);
    targets.finalize(query);
    targets
}

fn filled(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ResolvedTargets {
    /// Seed slots from a confirmed member. Member data wins over the raw query.
    pub fn apply_directory(&mut self, member: Option<DirectoryMember>) {
        let Some(member) = member else {
            return;
        };
        if let Some(email) = member.email.as_deref().and_then(filled) {
            self.email = Some(email);
        }
        if let Some(username) = filled(&member.username) {
            self.username = Some(username);
        }
        self.member = Some(member);
    }

    /// Fill slots still empty from the raw query, as far as the mode permits.
    pub fn finalize(&mut self, query: &Query) {
        if self.username.is_none()
            && self.mode.allows_username_sources()
            && !query.is_email_shaped()
        {
            self.username = filled(query.raw());
        }
        if self.email.is_none() && self.mode.allows_email_sources() && query.is_email_shaped() {
            self.email = filled(query.raw());
        }
    }

    /// Search mode the targets were resolved under.
    #[must_use]
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Account to look up in the breach source, if any.
    #[must_use]
    pub fn breach_account(&self) -> Option<&str> {
        self.email
            .as_deref()
            .filter(|email| self.mode.allows_email_sources() && is_email_shaped(email))
    }

    /// Handle to scrape, with any email domain stripped.
    #[must_use]
    pub fn scrape_handle(&self) -> Option<&str> {
        if !self.mode.allows_username_sources() {
            return None;
        }
        self.username
            .as_deref()
            .map(local_part)
            .filter(|handle| !handle.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::ScopeId;

    fn query(raw: &str, mode: SearchMode) -> Query {
        Query::new(raw).expect("valid query").with_mode(mode)
    }

    fn member(username: &str, email: Option<&str>) -> DirectoryMember {
        DirectoryMember {
            id: "mber_1".to_string(),
            username: username.to_string(),
            full_name: None,
            email: email.map(str::to_string),
            joined_at: None,
        }
    }

    #[test]
    fn test_directory_eligibility() {
        let scope = ScopeId::new("biz_123").expect("valid scope");
        let scoped = |mode| query("ada", mode).with_scope(scope.clone());

        assert!(directory_eligible(&scoped(SearchMode::Auto)));
        assert!(directory_eligible(&scoped(SearchMode::Directory)));
        assert!(!directory_eligible(&scoped(SearchMode::UsernameSource)));
        assert!(!directory_eligible(&scoped(SearchMode::EmailOnly)));
        assert!(!directory_eligible(&query("ada", SearchMode::Auto)));
    }

    #[test]
    fn test_member_query_shape() {
        assert_eq!(
            member_query(&query("user_abc", SearchMode::Auto)),
            MemberQuery::Ids(vec!["user_abc".to_string()])
        );
        assert_eq!(
            member_query(&query("ada", SearchMode::Auto)),
            MemberQuery::Text("ada".to_string())
        );
    }

    #[test]
    fn test_username_query() {
        let targets = resolve(&query("octocat", SearchMode::Auto), None);
        assert_eq!(targets.username.as_deref(), Some("octocat"));
        assert_eq!(targets.email, None);
        assert_eq!(targets.scrape_handle(), Some("octocat"));
        assert_eq!(targets.breach_account(), None);
    }

    #[test]
    fn test_email_query() {
        let targets = resolve(&query("a@b.com", SearchMode::Auto), None);
        assert_eq!(targets.email.as_deref(), Some("a@b.com"));
        assert_eq!(targets.username, None);
        assert_eq!(targets.breach_account(), Some("a@b.com"));
        assert_eq!(targets.scrape_handle(), None);
    }

    #[test]
    fn test_member_takes_priority() {
        let targets = resolve(
            &query("user_abc", SearchMode::Auto),
            Some(member("ada", Some("ada@example.com"))),
        );
        assert_eq!(targets.username.as_deref(), Some("ada"));
        assert_eq!(targets.email.as_deref(), Some("ada@example.com"));
        assert!(targets.member.is_some());
    }

    #[test]
    fn test_member_without_email_leaves_slot_for_query() {
        let targets = resolve(
            &query("ada@example.com", SearchMode::Auto),
            Some(member("ada_l", Some("  "))),
        );
        assert_eq!(targets.username.as_deref(), Some("ada_l"));
        assert_eq!(targets.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_mode_restrictions() {
        let targets = resolve(&query("a@b.com", SearchMode::UsernameSource), None);
        assert_eq!(targets.email, None);
        assert_eq!(targets.username, None);

        let targets = resolve(&query("octocat", SearchMode::EmailOnly), None);
        assert_eq!(targets.username, None);
        assert_eq!(targets.scrape_handle(), None);
    }

    #[test]
    fn test_scrape_handle_strips_domain() {
        let targets = resolve(
            &query("user_abc", SearchMode::Auto),
            Some(member("ada@example.com", None)),
        );
        assert_eq!(targets.scrape_handle(), Some("ada"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let q = query("octocat", SearchMode::Auto);
        assert_eq!(resolve(&q, None), resolve(&q, None));
    }
}
