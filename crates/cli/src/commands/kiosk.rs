//! Kiosk surface commands

use clap::Args;
use kiosk_types::Satisfaction;
use tracing::info;

use crate::{client::RestClient, output::Formatter, CliResult};

/// Record one answer, as a press on the kiosk would
#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    /// muito_satisfeito, satisfeito or insatisfeito
    #[arg(value_parser = parse_level)]
    pub level: Satisfaction,
}

fn parse_level(value: &str) -> Result<Satisfaction, String> {
    value.parse().map_err(|e: kiosk_types::KioskError| e.to_string())
}

impl SubmitArgs {
    pub async fn execute(&self, client: &RestClient, formatter: &dyn Formatter) -> CliResult<()> {
        let record = client.submit(self.level).await?;
        info!(id = %record.id(), satisfaction = %record.satisfaction(), "Feedback recorded");
        println!("{}", formatter.record(&record)?);
        Ok(())
    }
}

/// Show the kiosk header counters
#[derive(Debug, Clone, Copy)]
pub struct SummaryCommand;

impl SummaryCommand {
    pub async fn execute(&self, client: &RestClient, formatter: &dyn Formatter) -> CliResult<()> {
        let summary = client.summary().await?;
        println!("{}", formatter.summary(&summary)?);
        Ok(())
    }
}

/// Check that the server answers
#[derive(Debug, Clone, Copy)]
pub struct HealthCommand;

impl HealthCommand {
    pub async fn execute(&self, client: &RestClient, formatter: &dyn Formatter) -> CliResult<()> {
        let health = client.health().await?;
        println!("{}", formatter.health(&health)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("satisfeito"), Ok(Satisfaction::Satisfied));
        assert!(parse_level("happy").is_err());
    }
}
