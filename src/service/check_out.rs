use chrono::Utc;
use tracing::info;

use crate::error::AttendanceError;
use crate::model::attendance::AttendanceRecord;
use crate::store::AttendanceStore;

/// Closes work sessions, either by record id or by employee name. Closing
/// by name targets the most recently opened session for that employee.
#[derive(Clone)]
pub struct CheckOutService {
    store: AttendanceStore,
}

impl CheckOutService {
    pub fn new(store: AttendanceStore) -> Self {
        Self { store }
    }

    /// Re-closing an already closed record is rejected rather than
    /// silently overwriting its check-out time.
    pub async fn close_by_id(&self, id: i64) -> Result<AttendanceRecord, AttendanceError> {
        if let Some(record) = self.store.close_open(id, Utc::now()).await? {
            info!(id = record.id, employee = %record.employee_name, "session closed by id");
            return Ok(record);
        }

        match self.store.get(id).await? {
            Some(_) => Err(AttendanceError::AlreadyClosed { id }),
            None => Err(AttendanceError::RecordNotFound { id }),
        }
    }

    pub async fn close_by_name(
        &self,
        employee_name: &str,
    ) -> Result<AttendanceRecord, AttendanceError> {
        let record = self
            .store
            .close_latest_open(employee_name, Utc::now())
            .await?
            .ok_or_else(|| AttendanceError::NoOpenSession {
                employee_name: employee_name.to_owned(),
            })?;

        info!(id = record.id, employee = %record.employee_name, "session closed by name");
        Ok(record)
    }
}
