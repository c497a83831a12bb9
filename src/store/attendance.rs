use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::AttendanceError;
use crate::model::attendance::AttendanceRecord;

/// Owns the attendance rows. All mutations go through here; callers never
/// see a writable handle to the underlying pool. Records are append-only
/// except for the single open -> closed transition, which is applied with a
/// guarded UPDATE so concurrent closers cannot both claim the same record.
#[derive(Clone)]
pub struct AttendanceStore {
    pool: SqlitePool,
}

impl AttendanceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        employee_name: &str,
        check_in: DateTime<Utc>,
    ) -> Result<AttendanceRecord, AttendanceError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance (employee_name, check_in)
            VALUES (?, ?)
            RETURNING id, employee_name, check_in, check_out
            "#,
        )
        .bind(employee_name)
        .bind(check_in)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    pub async fn get(&self, id: i64) -> Result<Option<AttendanceRecord>, AttendanceError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT id, employee_name, check_in, check_out FROM attendance WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    /// All records in insertion order, windowed by offset/limit.
    pub async fn list(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT id, employee_name, check_in, check_out
            FROM attendance
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// All closed records, in insertion order.
    pub async fn closed(&self) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT id, employee_name, check_in, check_out
            FROM attendance
            WHERE check_out IS NOT NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// Inserts an open session only if the employee has no other open
    /// session. Guard and insert are one statement, so two concurrent
    /// check-ins cannot both pass the guard. Returns `None` when an open
    /// session already exists.
    pub async fn insert_if_no_open(
        &self,
        employee_name: &str,
        check_in: DateTime<Utc>,
    ) -> Result<Option<AttendanceRecord>, AttendanceError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance (employee_name, check_in)
            SELECT ?, ?
            WHERE NOT EXISTS (
                SELECT 1 FROM attendance
                WHERE employee_name = ? AND check_out IS NULL
            )
            RETURNING id, employee_name, check_in, check_out
            "#,
        )
        .bind(employee_name)
        .bind(check_in)
        .bind(employee_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    /// Sets `check_out` on the record only if it is still open. Returns
    /// `None` when the id does not exist or the record is already closed;
    /// the caller distinguishes the two with `get`.
    pub async fn close_open(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<AttendanceRecord>, AttendanceError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            UPDATE attendance SET check_out = ?
            WHERE id = ? AND check_out IS NULL
            RETURNING id, employee_name, check_in, check_out
            "#,
        )
        .bind(at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    /// Closes the most recently opened session for the employee, ties on
    /// `check_in` going to the highest id. The select-and-close is a single
    /// statement, so two concurrent callers can never close the same record.
    pub async fn close_latest_open(
        &self,
        employee_name: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<AttendanceRecord>, AttendanceError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            UPDATE attendance SET check_out = ?
            WHERE id = (
                SELECT id FROM attendance
                WHERE employee_name = ? AND check_out IS NULL
                ORDER BY check_in DESC, id DESC
                LIMIT 1
            )
            RETURNING id, employee_name, check_in, check_out
            "#,
        )
        .bind(at)
        .bind(employee_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::init_db;

    /// Fresh store on a uniquely named in-memory database per test.
    pub(crate) async fn test_store() -> AttendanceStore {
        let url = format!(
            "file:memdb_{}?mode=memory&cache=shared",
            uuid::Uuid::new_v4().simple()
        );
        let pool = init_db(&url).await.unwrap();
        AttendanceStore::new(pool)
    }

    pub(crate) fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[actix_web::test]
    async fn insert_assigns_ids_and_leaves_record_open() {
        let store = test_store().await;
        let a = store.insert("Kim", at("2024-01-10T09:00:00Z")).await.unwrap();
        let b = store.insert("Kim", at("2024-01-10T10:00:00Z")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(a.is_open());
        assert_eq!(a.employee_name, "Kim");
        assert_eq!(a.check_in, at("2024-01-10T09:00:00Z"));
    }

    #[actix_web::test]
    async fn get_round_trips_timestamps() {
        let store = test_store().await;
        let created = store.insert("Lee", at("2024-02-01T08:00:00Z")).await.unwrap();

        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.check_in, created.check_in);
        assert_eq!(fetched.check_out, None);

        assert!(store.get(created.id + 100).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn list_returns_insertion_order_window() {
        let store = test_store().await;
        for i in 0..5 {
            store
                .insert(&format!("emp{i}"), at("2024-01-01T09:00:00Z"))
                .await
                .unwrap();
        }

        let page = store.list(1, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].employee_name, "emp1");
        assert_eq!(page[1].employee_name, "emp2");
    }

    #[actix_web::test]
    async fn close_open_refuses_second_close() {
        let store = test_store().await;
        let r = store.insert("Kim", at("2024-01-10T09:00:00Z")).await.unwrap();

        let closed = store
            .close_open(r.id, at("2024-01-10T17:30:00Z"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.check_out, Some(at("2024-01-10T17:30:00Z")));

        // Already closed, the guarded update matches nothing
        assert!(
            store
                .close_open(r.id, at("2024-01-10T18:00:00Z"))
                .await
                .unwrap()
                .is_none()
        );
        let kept = store.get(r.id).await.unwrap().unwrap();
        assert_eq!(kept.check_out, Some(at("2024-01-10T17:30:00Z")));
    }

    #[actix_web::test]
    async fn close_latest_open_picks_newest_check_in() {
        let store = test_store().await;
        let older = store.insert("Park", at("2024-03-05T10:00:00Z")).await.unwrap();
        let newer = store.insert("Park", at("2024-03-05T11:00:00Z")).await.unwrap();

        let closed = store
            .close_latest_open("Park", at("2024-03-05T12:00:00Z"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.id, newer.id);

        // The older session is untouched and still open
        assert!(store.get(older.id).await.unwrap().unwrap().is_open());
    }

    #[actix_web::test]
    async fn close_latest_open_breaks_check_in_ties_by_highest_id() {
        let store = test_store().await;
        let first = store.insert("Park", at("2024-03-05T10:00:00Z")).await.unwrap();
        let second = store.insert("Park", at("2024-03-05T10:00:00Z")).await.unwrap();

        let closed = store
            .close_latest_open("Park", at("2024-03-05T12:00:00Z"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.id, second.id);
        assert!(store.get(first.id).await.unwrap().unwrap().is_open());
    }

    #[actix_web::test]
    async fn guarded_insert_refuses_while_a_session_is_open() {
        let store = test_store().await;
        let first = store
            .insert_if_no_open("Kim", at("2024-01-10T09:00:00Z"))
            .await
            .unwrap()
            .unwrap();

        // Kim already has an open session, the guarded insert adds nothing
        assert!(
            store
                .insert_if_no_open("Kim", at("2024-01-10T09:05:00Z"))
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(store.list(0, 10).await.unwrap().len(), 1);

        // Other employees are unaffected by Kim's open session
        assert!(
            store
                .insert_if_no_open("Lee", at("2024-01-10T09:10:00Z"))
                .await
                .unwrap()
                .is_some()
        );

        store
            .close_open(first.id, at("2024-01-10T17:00:00Z"))
            .await
            .unwrap();
        assert!(
            store
                .insert_if_no_open("Kim", at("2024-01-11T09:00:00Z"))
                .await
                .unwrap()
                .is_some()
        );
    }
}
