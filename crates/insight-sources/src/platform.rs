//! Social platform detection from profile links.

use url::Url;

/// Known platforms, keyed by registrable domain.
const PLATFORM_DOMAINS: &[(&str, &str)] = &[
    ("twitter.com", "Twitter"),
    ("x.com", "Twitter"),
    ("linkedin.com", "LinkedIn"),
    ("instagram.com", "Instagram"),
    ("facebook.com", "Facebook"),
    ("youtube.com", "YouTube"),
    ("medium.com", "Medium"),
    ("dev.to", "Dev.to"),
    ("twitch.tv", "Twitch"),
    ("discord.gg", "Discord"),
    ("bsky.app", "Bluesky"),
];

/// Hosts that show up in profile links but are never a personal website.
const IGNORED_HOSTS: &[&str] = &["github.com", "opensource.org", "shields.io"];

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

fn host_of(link: &str) -> Option<String> {
    Url::parse(link)
        .ok()?
        .host_str()
        .map(str::to_ascii_lowercase)
}

/// Identify the social platform a link points to.
#[must_use]
pub fn detect_platform(link: &str) -> Option<&'static str> {
    let host = host_of(link)?;
    PLATFORM_DOMAINS
        .iter()
        .find(|(domain, _)| host_matches(&host, domain))
        .map(|(_, name)| *name)
}

/// Last non-empty path segment of a link, used as the platform username.
#[must_use]
pub fn extract_username(link: &str) -> String {
    Url::parse(link)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.rfind(|s| !s.is_empty()).map(str::to_string))
        })
        .unwrap_or_default()
}

/// Host name of a link, used as the username of a website account.
#[must_use]
pub fn website_label(link: &str) -> String {
    host_of(link).unwrap_or_else(|| link.to_string())
}

/// Whether an external link could be a personal website.
#[must_use]
pub fn is_candidate_website(link: &str) -> bool {
    if !(link.starts_with("http://") || link.starts_with("https://")) {
        return false;
    }
    match host_of(link) {
        Some(host) => !IGNORED_HOSTS.iter().any(|d| host_matches(&host, d)),
        None => false,
    }
}
