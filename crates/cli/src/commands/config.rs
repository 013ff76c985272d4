//! Configuration commands

use clap::Subcommand;
use colored::Colorize;
use kiosk_config::KioskConfig;
use serde_json::Value;

use crate::{output::OutputFormat, CliResult};

const REDACTED: &str = "********";

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Print the effective configuration, with the admin secret hidden
    Show,

    /// Check the effective configuration
    Validate,
}

impl ConfigCommand {
    pub fn execute(&self, config: &KioskConfig, format: OutputFormat) -> CliResult<()> {
        match self {
            ConfigCommand::Show => {
                println!("{}", render(config, format)?);
                Ok(())
            }
            ConfigCommand::Validate => {
                config.validate()?;
                println!("{} configuration is valid", "✓".green());
                Ok(())
            }
        }
    }
}

/// Effective configuration as shown to the operator
pub fn render(config: &KioskConfig, format: OutputFormat) -> CliResult<String> {
    let mut value = serde_json::to_value(config)?;
    if let Some(secret) = value.pointer_mut("/admin/secret") {
        *secret = Value::String(REDACTED.to_string());
    }

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&value)?),
        OutputFormat::Table => {
            let mut lines = Vec::new();
            if let Value::Object(sections) = &value {
                for (section, fields) in sections {
                    lines.push(format!("[{}]", section.bold().cyan()));
                    if let Value::Object(fields) = fields {
                        for (key, field) in fields {
                            lines.push(format!("  {key} = {field}"));
                        }
                    }
                }
            }
            Ok(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_is_hidden() {
        let mut config = KioskConfig::default();
        config.admin.secret = "s3cret".to_string();

        let json = render(&config, OutputFormat::Json).unwrap();
        assert!(!json.contains("s3cret"));
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["admin"]["secret"], REDACTED);
        assert_eq!(value["service"]["port"], 8080);

        colored::control::set_override(false);
        let table = render(&config, OutputFormat::Table).unwrap();
        assert!(!table.contains("s3cret"));
        assert!(table.contains("[kiosk]"));
        assert!(table.contains("  lock_window_ms = 2000"));
    }
}
