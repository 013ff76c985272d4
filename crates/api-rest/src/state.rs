//! Shared application state

use collector::{KioskCollector, KioskCollectorBuilder, RecordStore};
use kiosk_config::KioskConfig;
use kiosk_types::{Clock, SystemClock};
use processor::{Exporter, ReportBuilder};
use std::sync::Arc;

use crate::auth::{Authenticator, SessionStore, SharedSecretAuthenticator};
use crate::error::ServerError;

/// State handed to every handler
///
/// The kiosk and admin surfaces read and write the same record store.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<KioskConfig>,
    pub collector: Arc<KioskCollector>,
    pub reports: Arc<ReportBuilder>,
    pub exporter: Arc<Exporter>,
    pub authenticator: Arc<dyn Authenticator>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Build state from configuration with an explicit clock
    pub fn new(config: KioskConfig, clock: Arc<dyn Clock>) -> Result<Self, ServerError> {
        config
            .validate()
            .map_err(|e| ServerError::Configuration(e.to_string()))?;

        let store = Arc::new(RecordStore::new(config.kiosk.broadcast_capacity));
        let sessions = SessionStore::new(config.admin.session_ttl(), clock.clone());
        let collector = KioskCollectorBuilder::new()
            .clock(clock)
            .zone(config.locale.zone())
            .lock_window(config.kiosk.lock_window())
            .notice_duration(config.kiosk.notice_duration())
            .store(store)
            .build()?;

        let reports = ReportBuilder::for_factory(collector.factory(), config.admin.page_size)?;
        let exporter = Exporter::new(config.export.file_prefix.clone());
        let authenticator = SharedSecretAuthenticator::new(config.admin.secret.clone());

        Ok(Self {
            config: Arc::new(config),
            collector: Arc::new(collector),
            reports: Arc::new(reports),
            exporter: Arc::new(exporter),
            authenticator: Arc::new(authenticator),
            sessions: Arc::new(sessions),
        })
    }

    /// Build state reading the wall clock
    pub fn from_config(config: KioskConfig) -> Result<Self, ServerError> {
        Self::new(config, Arc::new(SystemClock))
    }

    /// Replace the admin gate
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        self.collector.store()
    }
}
