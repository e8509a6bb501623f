//! Loading helpers and chart data for vitals views.

use tracing::warn;

use crate::{
    client::ApiError,
    models::{User, VitalKind, Vitals, VitalsQuery},
    services::VitalsService,
};

pub const LIST_FORBIDDEN: &str = "You do not have permission to access these vitals";
pub const LIST_FAILED: &str = "Failed to fetch vitals data";
pub const DETAIL_FORBIDDEN: &str = "You do not have permission to view this vital data";
pub const DETAIL_NOT_FOUND: &str = "Vital data not found";
pub const DETAIL_FAILED: &str = "Failed to fetch vital data";

/// Readings shown on a chart.
pub const CHART_WINDOW: usize = 10;

/// How a vitals listing is scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitalsScope {
    /// Restrict to the signed-in user's readings when one is known.
    pub current_user_only: bool,
    /// Keep at most this many readings.
    pub limit: Option<usize>,
}

impl Default for VitalsScope {
    fn default() -> Self {
        Self {
            current_user_only: true,
            limit: None,
        }
    }
}

impl VitalsScope {
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The query this scope sends for `user`.
    #[must_use]
    pub fn query(&self, user: Option<&User>) -> VitalsQuery {
        match user {
            Some(user) if self.current_user_only => VitalsQuery::for_user(user.id),
            _ => VitalsQuery::default(),
        }
    }
}

pub fn list_error_message(err: &ApiError) -> &'static str {
    if err.is_forbidden() {
        LIST_FORBIDDEN
    } else {
        LIST_FAILED
    }
}

pub fn detail_error_message(err: &ApiError) -> &'static str {
    if err.is_forbidden() {
        DETAIL_FORBIDDEN
    } else if err.is_not_found() {
        DETAIL_NOT_FOUND
    } else {
        DETAIL_FAILED
    }
}

/// Fetch the readings for a listing view.
///
/// # Errors
/// Returns the message to display; the underlying error is logged.
pub async fn load_vitals(
    service: &VitalsService,
    user: Option<&User>,
    scope: VitalsScope,
) -> Result<Vec<Vitals>, String> {
    match service.list(&scope.query(user)).await {
        Ok(mut readings) => {
            if let Some(limit) = scope.limit {
                readings.truncate(limit);
            }
            Ok(readings)
        }
        Err(err) => {
            warn!(error = %err, "failed to fetch vitals");
            Err(list_error_message(&err).to_string())
        }
    }
}

/// Fetch one reading for the detail view.
///
/// # Errors
/// Returns the message to display; the underlying error is logged.
pub async fn load_vital(service: &VitalsService, id: u64) -> Result<Vitals, String> {
    service.get(id).await.map_err(|err| {
        warn!(error = %err, vitals_id = id, "failed to fetch vital");
        detail_error_message(&err).to_string()
    })
}

/// One metric plotted over time.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub kind: VitalKind,
    pub label: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest and largest plotted value.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.values.iter().copied().fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((low, high)) => Some((low.min(value), high.max(value))),
        })
    }
}

/// Chart data for `kind` from readings listed newest first.
///
/// Takes the newest [`CHART_WINDOW`] readings and orders them oldest to
/// newest. Readings without a creation time are labelled `Invalid`.
pub fn chart_series(readings: &[Vitals], kind: VitalKind) -> ChartSeries {
    let window: Vec<&Vitals> = readings.iter().take(CHART_WINDOW).rev().collect();
    ChartSeries {
        kind,
        label: kind.label(),
        labels: window
            .iter()
            .map(|reading| {
                reading
                    .created_at
                    .map_or_else(|| "Invalid".to_string(), |ts| ts.chart_label())
            })
            .collect(),
        values: window.iter().map(|reading| reading.value(kind)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Timestamp, UserRole},
        session::tests::user,
        testing::MockApi,
    };
    use chrono::{TimeZone, Utc};

    fn reading(id: u64, hour: u32, minute: u32) -> Vitals {
        Vitals {
            id,
            temperature: 36.0 + id as f64 / 10.0,
            humidity: 40.0,
            pulse_rate: 60.0 + id as f64,
            light_intensity: 250.0,
            user_id: 1,
            created_at: Some(Timestamp(
                Utc.with_ymd_and_hms(2024, 3, 1, hour, minute, 0).unwrap(),
            )),
            updated_at: None,
        }
    }

    #[test]
    fn chart_uses_newest_ten_in_chronological_order() {
        // Server order is newest first.
        let readings: Vec<Vitals> = (1..=12).rev().map(|id| reading(id, 9, id as u32)).collect();

        let series = chart_series(&readings, VitalKind::PulseRate);

        assert_eq!(series.label, "PulseRate");
        assert_eq!(series.values.len(), CHART_WINDOW);
        assert_eq!(series.values.first().copied(), Some(63.0));
        assert_eq!(series.values.last().copied(), Some(72.0));
        assert_eq!(series.labels.first().map(String::as_str), Some("9:03"));
        assert_eq!(series.labels.last().map(String::as_str), Some("9:12"));
        assert_eq!(series.bounds(), Some((63.0, 72.0)));
    }

    #[test]
    fn empty_readings_give_empty_labelled_series() {
        let series = chart_series(&[], VitalKind::LightIntensity);
        assert!(series.is_empty());
        assert!(series.labels.is_empty());
        assert_eq!(series.label, "LightIntensity");
        assert_eq!(series.bounds(), None);
    }

    #[test]
    fn missing_timestamp_is_labelled_invalid() {
        let mut undated = reading(1, 8, 0);
        undated.created_at = None;
        let series = chart_series(&[undated], VitalKind::Temperature);
        assert_eq!(series.labels, vec!["Invalid".to_string()]);
    }

    #[test]
    fn scope_filters_by_user_only_when_known() {
        let admin = user(4, UserRole::Admin);
        let mine = VitalsScope::default();
        assert_eq!(mine.query(Some(&admin)).user_id, Some(4));
        assert_eq!(mine.query(None), VitalsQuery::default());

        let everyone = VitalsScope {
            current_user_only: false,
            limit: None,
        };
        assert_eq!(everyone.query(Some(&admin)), VitalsQuery::default());
    }

    #[test]
    fn error_messages_follow_status() {
        assert_eq!(list_error_message(&ApiError::from_status(403, "")), LIST_FORBIDDEN);
        assert_eq!(list_error_message(&ApiError::from_status(500, "")), LIST_FAILED);
        assert_eq!(detail_error_message(&ApiError::from_status(403, "")), DETAIL_FORBIDDEN);
        assert_eq!(detail_error_message(&ApiError::from_status(404, "")), DETAIL_NOT_FOUND);
        assert_eq!(
            detail_error_message(&ApiError::Validation("Invalid vitals ID".into())),
            DETAIL_FAILED
        );
    }

    #[tokio::test]
    async fn load_applies_limit_and_maps_errors() {
        let api = MockApi::spawn().await;
        let service = VitalsService::new(api.signed_in_client(1));
        let me = user(1, UserRole::User);

        let readings = load_vitals(&service, Some(&me), VitalsScope::default().with_limit(2))
            .await
            .unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].id, 3);

        assert_eq!(load_vital(&service, 13).await.unwrap_err(), DETAIL_FORBIDDEN);
        assert_eq!(load_vital(&service, 77).await.unwrap_err(), DETAIL_NOT_FOUND);
    }
}
