//! Attendance marking.
//!
//! At most one attendance record exists per (student, calendar date). Marking
//! a day that already has a record overwrites its status and marker instead
//! of creating a second one. The storage layer carries a unique constraint on
//! the pair as a backstop; losing a race against it degrades to an overwrite.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::macros::text_enum;
use crate::types::{CalendarDate, DbId};

text_enum! {
    pub enum AttendanceStatus ("attendance status") {
        Present => "present",
        Absent => "absent",
        Late => "late",
    }
}

/// A new attendance mark for a resolved student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMark {
    pub student_id: DbId,
    pub date: CalendarDate,
    pub status: AttendanceStatus,
    /// User who took the attendance.
    pub marked_by: Option<DbId>,
}

/// Storage port for attendance records.
#[async_trait]
pub trait AttendanceBook: Send + Sync {
    /// The stored record handed back to callers.
    type Record: Send;

    /// Resolve an external student id to the internal id.
    async fn resolve_student(&self, student_code: &str) -> Result<Option<DbId>, CoreError>;

    /// Id of the record for the given student and day, if any.
    async fn find_mark(
        &self,
        student_id: DbId,
        date: CalendarDate,
    ) -> Result<Option<DbId>, CoreError>;

    /// Insert a record. Must fail with [`CoreError::Conflict`] when one
    /// already exists for the same student and day.
    async fn insert_mark(&self, mark: &NewMark) -> Result<Self::Record, CoreError>;

    /// Replace the status and marker of an existing record.
    async fn overwrite_mark(
        &self,
        id: DbId,
        status: AttendanceStatus,
        marked_by: Option<DbId>,
    ) -> Result<Self::Record, CoreError>;
}

/// Whether marking created a record or overwrote the existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marked<R> {
    Created(R),
    Updated(R),
}

impl<R> Marked<R> {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn into_record(self) -> R {
        match self {
            Self::Created(r) | Self::Updated(r) => r,
        }
    }
}

/// Mark one student, addressed by external id, for one day.
pub async fn mark_attendance<B>(
    book: &B,
    student_code: &str,
    date: CalendarDate,
    status: AttendanceStatus,
    marked_by: Option<DbId>,
) -> Result<Marked<B::Record>, CoreError>
where
    B: AttendanceBook + ?Sized,
{
    let student_id = book
        .resolve_student(student_code)
        .await?
        .ok_or_else(|| CoreError::NotFoundByKey {
            entity: "Student",
            key: student_code.to_string(),
        })?;

    let mark = NewMark {
        student_id,
        date,
        status,
        marked_by,
    };
    upsert(book, &mark).await
}

async fn upsert<B>(book: &B, mark: &NewMark) -> Result<Marked<B::Record>, CoreError>
where
    B: AttendanceBook + ?Sized,
{
    if let Some(id) = book.find_mark(mark.student_id, mark.date).await? {
        let record = book.overwrite_mark(id, mark.status, mark.marked_by).await?;
        return Ok(Marked::Updated(record));
    }

    match book.insert_mark(mark).await {
        Ok(record) => Ok(Marked::Created(record)),
        Err(CoreError::Conflict(_)) => {
            tracing::debug!(
                student_id = mark.student_id,
                date = %mark.date,
                "Concurrent attendance insert; overwriting instead"
            );
            let id = book
                .find_mark(mark.student_id, mark.date)
                .await?
                .ok_or_else(|| {
                    CoreError::Internal("attendance conflict without a stored record".into())
                })?;
            let record = book.overwrite_mark(id, mark.status, mark.marked_by).await?;
            Ok(Marked::Updated(record))
        }
        Err(e) => Err(e),
    }
}

/// Outcome for one student in a bulk marking request.
#[derive(Debug, Clone, Serialize)]
pub struct BulkMarkResult<R> {
    /// The external student id as submitted.
    pub student_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Mark many students for the same day.
///
/// Unknown student ids are reported per item and do not stop the batch;
/// storage errors do.
pub async fn mark_bulk<B>(
    book: &B,
    student_codes: &[String],
    date: CalendarDate,
    status: AttendanceStatus,
    marked_by: Option<DbId>,
) -> Result<Vec<BulkMarkResult<B::Record>>, CoreError>
where
    B: AttendanceBook + ?Sized,
{
    if student_codes.is_empty() {
        return Err(CoreError::Validation(
            "Student IDs array is required".to_string(),
        ));
    }

    let mut results = Vec::with_capacity(student_codes.len());
    for code in student_codes {
        let result = match mark_attendance(book, code, date, status, marked_by).await {
            Ok(marked) => BulkMarkResult {
                student_id: code.clone(),
                attendance: Some(marked.into_record()),
                error: None,
            },
            Err(CoreError::NotFoundByKey { .. }) => BulkMarkResult {
                student_id: code.clone(),
                attendance: None,
                error: Some("Student not found".to_string()),
            },
            Err(e) => return Err(e),
        };
        results.push(result);
    }
    Ok(results)
}

/// Attendance totals for one student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceStats {
    pub total: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    /// Share of `present` days, in percent, rounded to one decimal.
    pub rate: f64,
}

pub fn summarize<I>(statuses: I) -> AttendanceStats
where
    I: IntoIterator<Item = AttendanceStatus>,
{
    let (mut present, mut absent, mut late) = (0_i64, 0_i64, 0_i64);
    for status in statuses {
        match status {
            AttendanceStatus::Present => present += 1,
            AttendanceStatus::Absent => absent += 1,
            AttendanceStatus::Late => late += 1,
        }
    }
    let total = present + absent + late;
    let rate = if total > 0 {
        (present as f64 / total as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    };
    AttendanceStats {
        total,
        present,
        absent,
        late,
        rate,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        id: DbId,
        student_id: DbId,
        date: CalendarDate,
        status: AttendanceStatus,
        marked_by: Option<DbId>,
    }

    #[derive(Default)]
    struct MemoryBook {
        students: HashMap<String, DbId>,
        rows: Mutex<Vec<Row>>,
        /// Hide the next `find_mark` hit to simulate a concurrent insert.
        race_once: AtomicBool,
    }

    impl MemoryBook {
        fn with_students(codes: &[(&str, DbId)]) -> Self {
            Self {
                students: codes.iter().map(|(c, id)| (c.to_string(), *id)).collect(),
                ..Self::default()
            }
        }

        fn rows(&self) -> Vec<Row> {
            self.rows.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AttendanceBook for MemoryBook {
        type Record = Row;

        async fn resolve_student(&self, code: &str) -> Result<Option<DbId>, CoreError> {
            Ok(self.students.get(code).copied())
        }

        async fn find_mark(
            &self,
            student_id: DbId,
            date: CalendarDate,
        ) -> Result<Option<DbId>, CoreError> {
            if self.race_once.swap(false, Ordering::SeqCst) {
                return Ok(None);
            }
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.student_id == student_id && r.date == date)
                .map(|r| r.id))
        }

        async fn insert_mark(&self, mark: &NewMark) -> Result<Row, CoreError> {
            let mut rows = self.rows.lock().unwrap();
            if rows
                .iter()
                .any(|r| r.student_id == mark.student_id && r.date == mark.date)
            {
                return Err(CoreError::Conflict("uq_attendance_student_date".into()));
            }
            let row = Row {
                id: rows.len() as DbId + 1,
                student_id: mark.student_id,
                date: mark.date,
                status: mark.status,
                marked_by: mark.marked_by,
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn overwrite_mark(
            &self,
            id: DbId,
            status: AttendanceStatus,
            marked_by: Option<DbId>,
        ) -> Result<Row, CoreError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(CoreError::NotFound {
                    entity: "Attendance",
                    id,
                })?;
            row.status = status;
            row.marked_by = marked_by;
            Ok(row.clone())
        }
    }

    fn day(d: u32) -> CalendarDate {
        NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
    }

    #[tokio::test]
    async fn first_mark_creates_a_record() {
        let book = MemoryBook::with_students(&[("STU001", 1)]);

        let marked = mark_attendance(&book, "STU001", day(1), AttendanceStatus::Present, Some(9))
            .await
            .unwrap();

        assert!(marked.is_created());
        assert_eq!(book.rows().len(), 1);
    }

    #[tokio::test]
    async fn second_mark_for_same_day_overwrites() {
        let book = MemoryBook::with_students(&[("STU001", 1)]);

        mark_attendance(&book, "STU001", day(1), AttendanceStatus::Present, Some(9))
            .await
            .unwrap();
        let marked = mark_attendance(&book, "STU001", day(1), AttendanceStatus::Late, Some(10))
            .await
            .unwrap();

        assert_matches!(marked, Marked::Updated(_));
        let rows = book.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, AttendanceStatus::Late);
        assert_eq!(rows[0].marked_by, Some(10));
    }

    #[tokio::test]
    async fn different_days_are_separate_records() {
        let book = MemoryBook::with_students(&[("STU001", 1)]);

        mark_attendance(&book, "STU001", day(1), AttendanceStatus::Present, None)
            .await
            .unwrap();
        mark_attendance(&book, "STU001", day(2), AttendanceStatus::Absent, None)
            .await
            .unwrap();

        assert_eq!(book.rows().len(), 2);
    }

    #[tokio::test]
    async fn unknown_student_is_not_found() {
        let book = MemoryBook::default();

        let result =
            mark_attendance(&book, "GHOST", day(1), AttendanceStatus::Present, None).await;

        assert_matches!(
            result,
            Err(CoreError::NotFoundByKey { entity: "Student", ref key }) if key == "GHOST"
        );
    }

    #[tokio::test]
    async fn lost_insert_race_becomes_overwrite() {
        let book = MemoryBook::with_students(&[("STU001", 1)]);
        mark_attendance(&book, "STU001", day(1), AttendanceStatus::Present, None)
            .await
            .unwrap();
        book.race_once.store(true, Ordering::SeqCst);

        let marked = mark_attendance(&book, "STU001", day(1), AttendanceStatus::Absent, None)
            .await
            .unwrap();

        assert_matches!(marked, Marked::Updated(_));
        let rows = book.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, AttendanceStatus::Absent);
    }

    #[tokio::test]
    async fn bulk_continues_past_unknown_students() {
        let book = MemoryBook::with_students(&[("STU001", 1), ("STU002", 2)]);
        let codes = vec![
            "STU001".to_string(),
            "NOPE".to_string(),
            "STU002".to_string(),
        ];

        let results = mark_bulk(&book, &codes, day(3), AttendanceStatus::Present, Some(9))
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].attendance.is_some());
        assert_eq!(results[1].error.as_deref(), Some("Student not found"));
        assert!(results[1].attendance.is_none());
        assert!(results[2].attendance.is_some());
        assert_eq!(book.rows().len(), 2);
    }

    #[tokio::test]
    async fn bulk_requires_students() {
        let book = MemoryBook::default();
        let result = mark_bulk(&book, &[], day(3), AttendanceStatus::Present, None).await;
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn summary_rounds_rate_to_one_decimal() {
        let stats = summarize([
            AttendanceStatus::Present,
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
        ]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.present, 2);
        assert_eq!(stats.absent, 1);
        assert_eq!(stats.late, 0);
        assert_eq!(stats.rate, 66.7);
    }

    #[test]
    fn empty_summary_has_zero_rate() {
        let stats = summarize(std::iter::empty());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.rate, 0.0);
    }
}
