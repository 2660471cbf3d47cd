//! Plain-text report rendering.

use insight_scanner::IdentityReport;
use std::fmt::Write;

/// Render a report as a terminal-friendly summary.
#[must_use]
pub fn render_report(report: &IdentityReport) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &IdentityReport) -> std::fmt::Result {
    let identity = &report.identity;

    writeln!(out, "Identity report for {}", report.query)?;
    writeln!(out, "  Report ID:   {}", report.id)?;
    writeln!(out, "  Generated:   {}", report.timestamp)?;
    writeln!(out, "  Risk score:  {}/99", report.risk_score)?;
    writeln!(out)?;

    writeln!(out, "Identity")?;
    writeln!(out, "  Name:        {}", identity.full_name)?;
    writeln!(out, "  Age range:   {}", identity.age_range)?;
    writeln!(out, "  Location:    {}", identity.location)?;
    writeln!(out, "  Job title:   {}", identity.job_title)?;
    writeln!(out, "  Avatar:      {}", identity.avatar)?;
    writeln!(out)?;

    writeln!(out, "Social profiles")?;
    for profile in &report.social {
        let mark = if profile.exists { "x" } else { " " };
        writeln!(
            out,
            "  [{mark}] {:<10} {:<20} {}",
            profile.platform, profile.username, profile.url
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Breaches ({})", report.breaches.len())?;
    for breach in &report.breaches {
        writeln!(out, "  - {} ({}): {}", breach.name, breach.date, breach.description)?;
    }
    writeln!(out)?;

    writeln!(out, "Flags")?;
    for flag in &report.flags {
        writeln!(out, "  [{}] {}: {}", flag.severity, flag.category, flag.description)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::{RequestId, Timestamp};
    use insight_scanner::{Flag, IdentitySummary, ReportStatus, Severity, SocialProfile};

    #[test]
    fn test_render_report() {
        let report = IdentityReport {
            id: RequestId::generate(),
            query: "octocat".to_string(),
            timestamp: Timestamp::now(),
            status: ReportStatus::Complete,
            risk_score: 10,
            identity: IdentitySummary {
                full_name: "The Octocat".to_string(),
                age_range: "Unknown".to_string(),
                location: "San Francisco".to_string(),
                job_title: "@github".to_string(),
                avatar: "https://avatars.example.com/u/1".to_string(),
            },
            social: vec![
                SocialProfile::new("GitHub", "octocat", "https://github.com/octocat", true),
                SocialProfile::new("LinkedIn", "Check manually", "#", false),
            ],
            breaches: vec![],
            flags: vec![Flag::new(Severity::Low, "Info", "Clean breach history.")],
        };

        let text = render_report(&report);
        assert!(text.starts_with("Identity report for octocat\n"));
        assert!(text.contains("Risk score:  10/99"));
        assert!(text.contains("[x] GitHub"));
        assert!(text.contains("[ ] LinkedIn"));
        assert!(text.contains("Breaches (0)"));
        assert!(text.contains("[low] Info: Clean breach history."));
    }
}
