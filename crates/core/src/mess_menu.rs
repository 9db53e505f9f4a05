//! Weekly mess menu keys.

use crate::error::CoreError;
use crate::macros::text_enum;

text_enum! {
    /// Day of the week a menu entry applies to.
    pub enum Weekday ("day") {
        Monday => "monday",
        Tuesday => "tuesday",
        Wednesday => "wednesday",
        Thursday => "thursday",
        Friday => "friday",
        Saturday => "saturday",
        Sunday => "sunday",
    }
}

impl Weekday {
    /// Parse a day name case-insensitively (`"Monday"`, `" SUNDAY"`).
    pub fn parse_loose(s: &str) -> Result<Self, CoreError> {
        Self::from_str(&s.trim().to_lowercase())
    }

    /// Position in the week, Monday first.
    pub fn ordinal(&self) -> usize {
        Self::ALL.iter().position(|d| d == self).unwrap_or(Self::ALL.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Weekday::parse_loose("Monday").unwrap(), Weekday::Monday);
        assert_eq!(Weekday::parse_loose(" SUNDAY ").unwrap(), Weekday::Sunday);
        assert!(Weekday::parse_loose("funday").is_err());
    }

    #[test]
    fn week_starts_on_monday() {
        assert_eq!(Weekday::Monday.ordinal(), 0);
        assert_eq!(Weekday::Sunday.ordinal(), 6);
    }
}
