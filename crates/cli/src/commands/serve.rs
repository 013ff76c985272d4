//! Run the kiosk server in-process

use clap::Args;
use kiosk_api_rest::AppState;
use kiosk_config::KioskConfig;
use tracing::info;

use crate::CliResult;

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Interface to bind (overrides the configured host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides the configured port)
    #[arg(long, short)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Apply the overrides to `config`
    pub fn apply(&self, config: &mut KioskConfig) {
        if let Some(host) = &self.host {
            config.service.host = host.clone();
        }
        if let Some(port) = self.port {
            config.service.port = port;
        }
    }

    pub async fn execute(&self, mut config: KioskConfig) -> CliResult<()> {
        self.apply(&mut config);
        config.validate()?;

        info!(
            address = %config.service.bind_address(),
            lock_window_ms = config.kiosk.lock_window_ms,
            page_size = config.admin.page_size,
            "Starting kiosk server"
        );

        let state = AppState::from_config(config)?;
        kiosk_api_rest::serve(state).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let mut config = KioskConfig::default();
        ServeArgs {
            host: Some("127.0.0.1".to_string()),
            port: Some(9090),
        }
        .apply(&mut config);
        assert_eq!(config.service.bind_address(), "127.0.0.1:9090");

        let mut untouched = KioskConfig::default();
        ServeArgs::default().apply(&mut untouched);
        assert_eq!(untouched, KioskConfig::default());
    }
}
