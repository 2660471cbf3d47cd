//! HTML extraction for scraped profile pages and linked websites.

use crate::model::{non_empty, LinkedAccount, ScrapedProfile};
use crate::platform::{detect_platform, extract_username, is_candidate_website, website_label};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

static NAME: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.p-name, h1.vcard-names span").expect("valid name selector"));
static BIO: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.p-note, div.user-profile-bio").expect("valid bio selector")
});
static LOCATION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"li[itemprop="homeLocation"] span, .p-label"#)
        .expect("valid location selector")
});
static EMPLOYER: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"li[itemprop="worksFor"] span, .p-org"#).expect("valid employer selector")
});
static AVATAR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img.avatar").expect("valid avatar selector"));
static CARD_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".h-card a[href]").expect("valid card link selector"));
static LEGACY_LINKS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".js-profile-editable-area a[href]").expect("valid legacy link selector")
});
static ANY_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid link selector"));

/// Profile page contents before the optional website deep scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProfilePage {
    /// Extracted profile; already includes the profile's own account
    pub profile: ScrapedProfile,
    /// Personal website worth following, if any
    pub website: Option<String>,
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    non_empty(
        document
            .select(selector)
            .next()
            .map(|el| el.text().collect::<String>()),
    )
}

/// Parse a profile page.
///
/// `platform`, `username` and `profile_url` describe the page itself and become
/// its first linked account.
#[must_use]
pub fn parse_profile_page(
    html: &str,
    platform: &str,
    username: &str,
    profile_url: &str,
) -> ParsedProfilePage {
    let document = Html::parse_document(html);

    let mut profile = ScrapedProfile {
        full_name: first_text(&document, &NAME),
        location: first_text(&document, &LOCATION),
        employer: first_text(&document, &EMPLOYER),
        avatar_url: non_empty(
            document
                .select(&AVATAR)
                .next()
                .and_then(|el| el.value().attr("src"))
                .map(str::to_string),
        ),
        bio: first_text(&document, &BIO),
        website: None,
        linked_accounts: vec![LinkedAccount {
            platform: platform.to_string(),
            username: username.to_string(),
            url: profile_url.to_string(),
        }],
    };

    let mut links: Vec<&str> = document
        .select(&CARD_LINKS)
        .filter_map(|el| el.value().attr("href"))
        .collect();
    if links.is_empty() {
        links = document
            .select(&LEGACY_LINKS)
            .filter_map(|el| el.value().attr("href"))
            .collect();
    }

    let mut website = None;
    for link in links.into_iter().filter(|l| l.starts_with("http")) {
        if let Some(platform) = detect_platform(link) {
            profile.linked_accounts.push(LinkedAccount {
                platform: platform.to_string(),
                username: extract_username(link),
                url: link.to_string(),
            });
        } else if is_candidate_website(link) {
            website = Some(link.to_string());
        }
    }

    if let Some(site) = &website {
        profile.website = Some(site.clone());
        profile.linked_accounts.push(LinkedAccount {
            platform: "Website".to_string(),
            username: website_label(site),
            url: site.clone(),
        });
    }

    profile.dedup_accounts();
    ParsedProfilePage { profile, website }
}

/// Collect social accounts linked from an arbitrary web page.
///
/// Relative links are resolved against `page_url`.
#[must_use]
pub fn parse_website_accounts(html: &str, page_url: &str) -> Vec<LinkedAccount> {
    let Ok(base) = Url::parse(page_url) else {
        return Vec::new();
    };
    let document = Html::parse_document(html);

    document
        .select(&ANY_LINK)
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .filter_map(|url| {
            let link = url.to_string();
            detect_platform(&link).map(|platform| LinkedAccount {
                platform: platform.to_string(),
                username: extract_username(&link),
                url: link,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_HTML: &str = r#"
        <html><body>
        <div class="h-card">
            <img class="avatar" src="https://avatars.example.com/u/1?v=4" />
            <h1 class="vcard-names">
                <span class="p-name">  The Octocat </span>
                <span class="p-nickname">octocat</span>
            </h1>
            <div class="p-note user-profile-bio">Mascot</div>
            <ul>
                <li itemprop="worksFor"><span class="p-org">@github</span></li>
                <li itemprop="homeLocation"><span class="p-label">San Francisco</span></li>
                <li><a href="https://twitter.com/octocat">@octocat</a></li>
                <li><a href="https://www.linkedin.com/in/octocat/">LinkedIn</a></li>
                <li><a href="https://github.com/octocat/Hello-World">repo</a></li>
                <li><a href="https://img.shields.io/badge/x">badge</a></li>
                <li><a href="https://octocat.dev">site</a></li>
                <li><a href="/octocat?tab=followers">followers</a></li>
                <li><a href="https://twitter.com/octocat/">dup</a></li>
            </ul>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_profile_page() {
        let page = parse_profile_page(
            PROFILE_HTML,
            "GitHub",
            "octocat",
            "https://github.com/octocat",
        );
        let profile = &page.profile;

        assert_eq!(profile.full_name.as_deref(), Some("The Octocat"));
        assert_eq!(profile.location.as_deref(), Some("San Francisco"));
        assert_eq!(profile.employer.as_deref(), Some("@github"));
        assert_eq!(profile.bio.as_deref(), Some("Mascot"));
        assert_eq!(
            profile.avatar_url.as_deref(),
            Some("https://avatars.example.com/u/1?v=4")
        );
        assert_eq!(page.website.as_deref(), Some("https://octocat.dev"));

        let platforms: Vec<_> = profile
            .linked_accounts
            .iter()
            .map(|a| a.platform.as_str())
            .collect();
        assert_eq!(platforms, vec!["GitHub", "Twitter", "LinkedIn", "Website"]);
        assert_eq!(profile.linked_accounts[1].username, "octocat");
        assert_eq!(profile.linked_accounts[3].username, "octocat.dev");
    }

    #[test]
    fn test_parse_legacy_layout() {
        let html = r#"
            <div class="js-profile-editable-area">
                <a href="https://medium.com/@octo">Medium</a>
            </div>
        "#;
        let page = parse_profile_page(html, "GitHub", "octo", "https://github.com/octo");
        assert!(page.profile.full_name.is_none());
        assert!(page.website.is_none());
        assert!(page.profile.has_account_on("Medium"));
        assert!(page.profile.has_content(), "own account counts as content");
    }

    #[test]
    fn test_parse_website_accounts() {
        let html = r#"
            <footer>
                <a href="https://bsky.app/profile/octocat.dev">Bluesky</a>
                <a href="/blog">Blog</a>
                <a href="https://www.youtube.com/@octocat">YouTube</a>
            </footer>
        "#;
        let accounts = parse_website_accounts(html, "https://octocat.dev");
        let platforms: Vec<_> = accounts.iter().map(|a| a.platform.as_str()).collect();
        assert_eq!(platforms, vec!["Bluesky", "YouTube"]);
        assert_eq!(accounts[1].username, "@octocat");
    }

    #[test]
    fn test_parse_website_accounts_bad_base() {
        assert!(parse_website_accounts("<a href='x'>x</a>", "not a url").is_empty());
    }
}
