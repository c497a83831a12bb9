use chrono::Utc;
use tracing::info;

use crate::error::AttendanceError;
use crate::model::attendance::AttendanceRecord;
use crate::store::AttendanceStore;

/// Opens work sessions. By default an employee may hold several open
/// sessions at once (the original multi-shift behavior); the
/// `single_open_session` switch turns a second concurrent check-in into a
/// conflict instead.
#[derive(Clone)]
pub struct CheckInService {
    store: AttendanceStore,
    single_open_session: bool,
}

impl CheckInService {
    pub fn new(store: AttendanceStore, single_open_session: bool) -> Self {
        Self {
            store,
            single_open_session,
        }
    }

    pub async fn open(&self, employee_name: &str) -> Result<AttendanceRecord, AttendanceError> {
        if employee_name.is_empty() {
            return Err(AttendanceError::EmptyEmployeeName);
        }

        let record = if self.single_open_session {
            // guard and insert are a single statement, so two concurrent
            // check-ins cannot both slip past the open-session check
            self.store
                .insert_if_no_open(employee_name, Utc::now())
                .await?
                .ok_or_else(|| AttendanceError::AlreadyCheckedIn {
                    employee_name: employee_name.to_owned(),
                })?
        } else {
            self.store.insert(employee_name, Utc::now()).await?
        };
        debug_assert!(record.is_open());
        info!(id = record.id, employee = %record.employee_name, "session opened");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::attendance::tests::test_store;

    #[actix_web::test]
    async fn open_creates_an_open_record_stamped_now() {
        let before = Utc::now();
        let service = CheckInService::new(test_store().await, false);

        let record = service.open("Kim").await.unwrap();
        let after = Utc::now();

        assert!(record.is_open());
        assert!(record.check_in >= before && record.check_in <= after);
    }

    #[actix_web::test]
    async fn open_rejects_empty_name() {
        let service = CheckInService::new(test_store().await, false);
        assert!(matches!(
            service.open("").await,
            Err(AttendanceError::EmptyEmployeeName)
        ));
    }

    #[actix_web::test]
    async fn multiple_open_sessions_allowed_by_default() {
        let service = CheckInService::new(test_store().await, false);
        let a = service.open("Park").await.unwrap();
        let b = service.open("Park").await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[actix_web::test]
    async fn single_open_session_mode_rejects_second_check_in() {
        let store = test_store().await;
        let service = CheckInService::new(store.clone(), true);

        let first = service.open("Park").await.unwrap();
        assert!(matches!(
            service.open("Park").await,
            Err(AttendanceError::AlreadyCheckedIn { .. })
        ));
        // The rejected check-in must not have inserted anything
        assert_eq!(store.list(0, 10).await.unwrap().len(), 1);

        // Closing the session frees the employee to check in again
        store.close_open(first.id, Utc::now()).await.unwrap();
        service.open("Park").await.unwrap();
    }
}
