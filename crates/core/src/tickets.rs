//! Status vocabularies and lifecycles for the ticket collections
//! (leaves, complaints, maintenance requests, fees).

use crate::error::CoreError;
use crate::lifecycle::StatusLifecycle;
use crate::macros::text_enum;
use crate::types::CalendarDate;

// ---------------------------------------------------------------------------
// Leaves
// ---------------------------------------------------------------------------

text_enum! {
    /// Review state of a leave application.
    pub enum LeaveStatus ("leave status") {
        Pending => "Pending",
        Approved => "Approved",
        Rejected => "Rejected",
    }
}

impl StatusLifecycle for LeaveStatus {
    const ENTITY: &'static str = "Leave";

    fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }

    fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Number of calendar days covered by a leave, both ends inclusive.
///
/// Rejects ranges that end before they start.
pub fn leave_days(start: CalendarDate, end: CalendarDate) -> Result<i32, CoreError> {
    if end < start {
        return Err(CoreError::Validation(format!(
            "Leave end date {end} is before start date {start}"
        )));
    }
    let days = (end - start).num_days() + 1;
    i32::try_from(days)
        .map_err(|_| CoreError::Validation(format!("Leave of {days} days is too long")))
}

// ---------------------------------------------------------------------------
// Complaints
// ---------------------------------------------------------------------------

text_enum! {
    pub enum ComplaintCategory ("complaint category") {
        RoomMaintenance => "room-maintenance",
        FoodQuality => "food-quality",
        StaffBehavior => "staff-behavior",
        WifiElectricity => "wifi-electricity",
        Other => "other",
    }
}

text_enum! {
    pub enum ComplaintStatus ("complaint status") {
        Pending => "pending",
        InProgress => "in-progress",
        Resolved => "resolved",
    }
}

impl StatusLifecycle for ComplaintStatus {
    const ENTITY: &'static str = "Complaint";

    fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::InProgress)
                | (Self::Pending, Self::Resolved)
                | (Self::InProgress, Self::Resolved)
        )
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved)
    }
}

// ---------------------------------------------------------------------------
// Maintenance requests
// ---------------------------------------------------------------------------

text_enum! {
    pub enum ProblemType ("problem type") {
        Electrical => "electrical",
        Plumbing => "plumbing",
        Furniture => "furniture",
        Other => "other",
    }
}

text_enum! {
    pub enum MaintenanceStatus ("maintenance status") {
        Open => "open",
        InProgress => "in-progress",
        Resolved => "resolved",
    }
}

impl StatusLifecycle for MaintenanceStatus {
    const ENTITY: &'static str = "Maintenance request";

    fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::InProgress)
                | (Self::Open, Self::Resolved)
                | (Self::InProgress, Self::Resolved)
        )
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved)
    }
}

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

text_enum! {
    pub enum FeeStatus ("fee status") {
        Pending => "pending",
        Paid => "paid",
        Overdue => "overdue",
    }
}

impl StatusLifecycle for FeeStatus {
    const ENTITY: &'static str = "Fee";

    fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Paid)
                | (Self::Pending, Self::Overdue)
                | (Self::Overdue, Self::Pending)
                | (Self::Overdue, Self::Paid)
        )
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Paid)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    use super::*;
    use crate::lifecycle::check_transition;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn leave_days_counts_both_ends() {
        assert_eq!(leave_days(date(2026, 3, 1), date(2026, 3, 1)).unwrap(), 1);
        assert_eq!(leave_days(date(2026, 2, 27), date(2026, 3, 2)).unwrap(), 4);
    }

    #[test]
    fn leave_days_rejects_reversed_range() {
        assert_matches!(
            leave_days(date(2026, 3, 2), date(2026, 3, 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn leave_review_is_final() {
        assert!(check_transition(LeaveStatus::Pending, LeaveStatus::Approved).is_ok());
        assert!(check_transition(LeaveStatus::Pending, LeaveStatus::Rejected).is_ok());
        assert!(check_transition(LeaveStatus::Approved, LeaveStatus::Rejected).is_err());
        assert!(check_transition(LeaveStatus::Rejected, LeaveStatus::Pending).is_err());
        assert!(LeaveStatus::Approved.is_terminal());
    }

    #[test]
    fn repeating_current_status_is_allowed() {
        assert!(check_transition(ComplaintStatus::Resolved, ComplaintStatus::Resolved).is_ok());
        assert!(check_transition(FeeStatus::Paid, FeeStatus::Paid).is_ok());
    }

    #[test]
    fn complaint_moves_forward_only() {
        assert!(check_transition(ComplaintStatus::Pending, ComplaintStatus::InProgress).is_ok());
        assert!(check_transition(ComplaintStatus::InProgress, ComplaintStatus::Resolved).is_ok());
        assert!(check_transition(ComplaintStatus::Pending, ComplaintStatus::Resolved).is_ok());
        let err = check_transition(ComplaintStatus::Resolved, ComplaintStatus::Pending)
            .unwrap_err()
            .to_string();
        assert!(err.contains("'resolved' to 'pending'"), "got: {err}");
    }

    #[test]
    fn maintenance_cannot_reopen() {
        assert!(
            check_transition(MaintenanceStatus::Open, MaintenanceStatus::InProgress).is_ok()
        );
        assert!(
            check_transition(MaintenanceStatus::InProgress, MaintenanceStatus::Open).is_err()
        );
    }

    #[test]
    fn fee_can_fall_overdue_and_recover() {
        assert!(check_transition(FeeStatus::Pending, FeeStatus::Overdue).is_ok());
        assert!(check_transition(FeeStatus::Overdue, FeeStatus::Pending).is_ok());
        assert!(check_transition(FeeStatus::Overdue, FeeStatus::Paid).is_ok());
        assert!(check_transition(FeeStatus::Paid, FeeStatus::Pending).is_err());
    }

    #[test]
    fn wire_names_match_stored_values() {
        assert_eq!(ComplaintStatus::InProgress.as_str(), "in-progress");
        assert_eq!(LeaveStatus::Pending.as_str(), "Pending");
        assert_eq!(
            ComplaintCategory::from_str("wifi-electricity").unwrap(),
            ComplaintCategory::WifiElectricity
        );
        assert!(ProblemType::from_str("roof").is_err());
    }
}
