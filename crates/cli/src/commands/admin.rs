//! Admin surface commands
//!
//! Each command opens a session with the shared secret, does its work and
//! closes the session again.

use chrono::NaiveDate;
use clap::Args;
use colored::Colorize;
use kiosk_api_rest::DashboardQuery;
use kiosk_types::{parse_day, ViewMode};
use processor::ExportFormat;
use std::path::PathBuf;
use tracing::warn;

use crate::{client::RestClient, output::Formatter, write_export, CliResult};

/// Shared secret, falling back to the configured one
#[derive(Args, Debug, Clone, Default)]
pub struct Credentials {
    /// Admin password
    #[arg(long, env = "KIOSK_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl Credentials {
    fn resolve<'a>(&'a self, configured: &'a str) -> &'a str {
        self.password.as_deref().unwrap_or(configured)
    }
}

async fn close_session(client: &RestClient, token: &str) {
    if let Err(e) = client.logout(token).await {
        warn!(error = %e, "Failed to close admin session");
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct DashboardArgs {
    /// today, day or compare
    #[arg(long)]
    pub mode: Option<ViewMode>,

    /// Selected day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub day_a: Option<NaiveDate>,

    /// Second day for compare mode (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub day_b: Option<NaiveDate>,

    /// History page, 1-based
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub page: Option<u64>,

    #[command(flatten)]
    pub credentials: Credentials,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    parse_day(value).map_err(|e| e.to_string())
}

impl DashboardArgs {
    pub fn query(&self) -> DashboardQuery {
        DashboardQuery {
            mode: self.mode.map(|mode| mode.as_str().to_string()),
            day_a: self.day_a.map(|day| day.to_string()),
            day_b: self.day_b.map(|day| day.to_string()),
            page: self.page.map(|page| page as usize),
        }
    }

    pub async fn execute(
        &self,
        client: &RestClient,
        formatter: &dyn Formatter,
        configured_secret: &str,
    ) -> CliResult<()> {
        let token = client
            .login(self.credentials.resolve(configured_secret))
            .await?;
        let report = client.dashboard(&token, &self.query()).await;
        close_session(client, &token).await;

        println!("{}", formatter.dashboard(&report?)?);
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// csv or txt
    #[arg(long, short, default_value = "csv")]
    pub format: ExportFormat,

    /// Directory to write the file into
    #[arg(long, short, default_value = ".")]
    pub out: PathBuf,

    #[command(flatten)]
    pub credentials: Credentials,
}

impl ExportArgs {
    pub async fn execute(&self, client: &RestClient, configured_secret: &str) -> CliResult<()> {
        let token = client
            .login(self.credentials.resolve(configured_secret))
            .await?;
        let download = client.export(&token, self.format).await;
        close_session(client, &token).await;

        let download = download?;
        let path = write_export(&self.out, &download.filename, &download.body)?;
        println!("{} {}", "Exported".green().bold(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_from_args() {
        let args = DashboardArgs {
            mode: Some(ViewMode::Compare),
            day_a: NaiveDate::from_ymd_opt(2026, 2, 3),
            day_b: None,
            page: Some(2),
            credentials: Credentials::default(),
        };
        let query = args.query();
        assert_eq!(query.mode.as_deref(), Some("compare"));
        assert_eq!(query.day_a.as_deref(), Some("2026-02-03"));
        assert_eq!(query.day_b, None);
        assert_eq!(query.page, Some(2));
    }

    #[test]
    fn test_credentials_fallback() {
        assert_eq!(Credentials::default().resolve("1234"), "1234");
        let explicit = Credentials {
            password: Some("4321".to_string()),
        };
        assert_eq!(explicit.resolve("1234"), "4321");
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2026-02-30").is_err());
        assert_eq!(parse_date("2026-02-28"), Ok(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()));
    }
}
