//! `neko version`: build information and the latest published release.

use chrono::{DateTime, Local};
use neko_adapters::GithubClient;
use neko_core::application::services::latest_release;
use tracing::warn;

use crate::{commands::Context, error::CliResult, output::OutputManager};

/// Commit the binary was built from, stamped by the release pipeline.
pub const BUILD_COMMIT: &str = match option_env!("NEKO_BUILD_COMMIT") {
    Some(commit) => commit,
    None => "none",
};

pub const BUILD_DATE: &str = match option_env!("NEKO_BUILD_DATE") {
    Some(date) => date,
    None => "unknown",
};

pub fn execute(ctx: &Context, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("neko {}", env!("CARGO_PKG_VERSION")))?;
    output.field("Commit", BUILD_COMMIT)?;
    output.field("Built", BUILD_DATE)?;

    let client = GithubClient::new(&ctx.config.github.api_url, ctx.config.github_token())?;
    let Some(found) = latest_release(&ctx.repository(), &client)? else {
        return Ok(());
    };

    output.print("")?;
    output.header(&format!("Latest release of {}", found.repo.slug()))?;
    match found.release {
        None => output.info("No releases published yet")?,
        Some(release) => {
            output.field("Release", release.title())?;
            output.field("Tag", &release.tag_name)?;
            if let Some(published) = release.published_at.as_deref() {
                output.field("Published", &render_date(published))?;
            }
            if let Some(author) = release.author_login() {
                output.field("Author", author)?;
            }
            if release.prerelease {
                output.field("Pre-release", "yes")?;
            }
            output.field("URL", &release.html_url)?;
        }
    }
    Ok(())
}

/// RFC 3339 timestamp in local time; unparsable input is shown as-is.
fn render_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M %Z")
            .to_string(),
        Err(err) => {
            warn!(raw, error = %err, "Unrecognised release date");
            raw.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_info_has_fallbacks() {
        assert!(!BUILD_COMMIT.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn renders_rfc3339_dates() {
        let shown = render_date("2025-12-20T14:03:00Z");
        assert!(shown.starts_with("2025-12-"), "{shown}");
    }

    #[test]
    fn keeps_unparsable_dates() {
        assert_eq!(render_date("last tuesday"), "last tuesday");
    }
}
