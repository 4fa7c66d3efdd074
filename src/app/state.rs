//! Notification settings, cached store snapshots, and view model computation.
//!
//! [`AppState`] holds copies of the error log records and the connection state,
//! refreshed from store subscriptions. View models are computed on demand from
//! those copies, so rendering never locks a store.

use super::modes::DetailLevel;
use crate::domain::{ConnectionState, ErrorRecord, Severity};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{AlertItem, NotificationsViewModel, ShellViewModel, StatusViewModel};
use crate::Config;

#[derive(Debug, Clone)]
pub struct AppState {
    /// Error log records in arrival order.
    pub records: Vec<ErrorRecord>,
    pub connection: ConnectionState,

    /// Upper bound on alerts shown at once.
    pub max_visible: usize,
    pub detail_level: DetailLevel,
    /// Severities to show; `None` shows all.
    pub severity_filter: Option<Vec<Severity>>,

    /// Name shown in the status line.
    pub service_name: String,
    pub theme: Theme,
}

impl AppState {
    #[must_use]
    pub fn new(config: &Config, theme: Theme) -> Self {
        Self {
            records: Vec::new(),
            connection: ConnectionState::default(),
            max_visible: config.max_visible,
            detail_level: DetailLevel::from_show_details(config.show_details),
            severity_filter: config.severity_filter.clone(),
            service_name: config.service_name.clone(),
            theme,
        }
    }

    fn passes_filter(&self, record: &ErrorRecord) -> bool {
        self.severity_filter
            .as_ref()
            .map_or(true, |allowed| allowed.contains(&record.severity()))
    }

    /// Records eligible for display: filtered, newest first.
    ///
    /// Records created in the same instant keep reverse arrival order.
    #[must_use]
    pub fn visible_records(&self) -> Vec<&ErrorRecord> {
        let mut eligible: Vec<&ErrorRecord> = self
            .records
            .iter()
            .rev()
            .filter(|record| self.passes_filter(record))
            .collect();
        eligible.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        eligible
    }

    /// Id of the alert in 1-based stack `position`, if one is shown there.
    #[must_use]
    pub fn alert_id_at(&self, position: usize) -> Option<String> {
        let index = position.checked_sub(1)?;
        if index >= self.max_visible {
            return None;
        }
        self.visible_records()
            .get(index)
            .map(|record| record.id().to_string())
    }

    #[must_use]
    pub fn compute_notifications(&self) -> NotificationsViewModel {
        let eligible = self.visible_records();
        let show_details = self.detail_level.shows_details();

        let alerts: Vec<AlertItem> = eligible
            .iter()
            .take(self.max_visible)
            .map(|record| AlertItem::from_record(record, show_details))
            .collect();

        NotificationsViewModel {
            hidden_count: eligible.len() - alerts.len(),
            alerts,
        }
    }

    #[must_use]
    pub fn compute_status(&self) -> StatusViewModel {
        StatusViewModel::new(&self.service_name, &self.connection)
    }

    #[must_use]
    pub fn compute_viewmodel(&self) -> ShellViewModel {
        ShellViewModel {
            notifications: self.compute_notifications(),
            status: self.compute_status(),
        }
    }
}
