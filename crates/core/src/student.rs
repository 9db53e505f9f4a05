//! Student profile vocabulary.

use crate::macros::text_enum;

text_enum! {
    /// Academic year of a student.
    pub enum AcademicYear ("academic year") {
        First => "1st Year",
        Second => "2nd Year",
        Third => "3rd Year",
        Fourth => "4th Year",
        Other => "Other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_labels_round_trip() {
        for year in AcademicYear::ALL {
            assert_eq!(AcademicYear::from_str(year.as_str()).unwrap(), *year);
        }
    }

    #[test]
    fn unknown_year_is_rejected() {
        let err = AcademicYear::from_str("5th Year").unwrap_err().to_string();
        assert!(err.contains("academic year"));
    }
}
