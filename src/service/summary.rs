use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AttendanceError;
use crate::store::AttendanceStore;

/// Hours worked keyed by employee name, then by period key
/// (`YYYY-MM-DD` for days, `YYYY-MM` for months).
pub type PeriodTotals = BTreeMap<String, BTreeMap<String, f64>>;

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct AttendanceSummary {
    #[schema(value_type = Object, example = json!({"Kim": {"2024-01-10": 8.5}}))]
    pub daily: PeriodTotals,

    #[schema(value_type = Object, example = json!({"Kim": {"2024-01": 8.5}}))]
    pub monthly: PeriodTotals,
}

/// Derives per-employee time-worked totals from the closed sessions.
/// Recomputes from the full record set on every call; nothing is cached
/// or persisted.
#[derive(Clone)]
pub struct SummaryAggregator {
    store: AttendanceStore,
}

impl SummaryAggregator {
    pub fn new(store: AttendanceStore) -> Self {
        Self { store }
    }

    /// The whole duration of a session is attributed to the calendar day
    /// and month of its check-in, even when it crosses midnight or a month
    /// boundary. Known approximation, kept for compatibility with the
    /// historical reports.
    pub async fn summarize(&self) -> Result<AttendanceSummary, AttendanceError> {
        let records = self.store.closed().await?;

        let mut summary = AttendanceSummary::default();
        for record in records {
            let Some(check_out) = record.check_out else {
                continue;
            };

            // microsecond precision; real sessions are nowhere near the
            // i64 microsecond overflow range
            let micros = (check_out - record.check_in)
                .num_microseconds()
                .unwrap_or(i64::MAX);
            let hours = micros as f64 / 3_600_000_000.0;
            let day_key = record.check_in.date_naive().to_string();
            let month_key = record.check_in.format("%Y-%m").to_string();

            *summary
                .daily
                .entry(record.employee_name.clone())
                .or_default()
                .entry(day_key)
                .or_insert(0.0) += hours;
            *summary
                .monthly
                .entry(record.employee_name)
                .or_default()
                .entry(month_key)
                .or_insert(0.0) += hours;
        }

        Ok(summary)
    }
}
