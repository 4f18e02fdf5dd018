use chrono::{Datelike, Month, NaiveDate};
use num_traits::FromPrimitive;
use std::fmt;

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1).unwrap();
    let next = if month.number_from_month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(year, month.number_from_month() + 1, 1).unwrap()
    };
    next.signed_duration_since(first).num_days() as u32
}

/// A (month, year) pair addressing one page of the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex {
    pub month: Month,
    pub year: i32,
}

impl MonthIndex {
    pub fn new(month: Month, year: i32) -> Self {
        MonthIndex { month, year }
    }

    /// Calendar-add `delta` months. Overflowing months normalize into
    /// adjacent years, so arbitrarily large deltas are fine.
    pub fn shift(self, delta: i32) -> Self {
        let month0 = self.month.number_from_month() as i32 - 1 + delta;
        MonthIndex {
            month: Month::from_i32(month0.rem_euclid(12) + 1).unwrap(),
            year: self.year + month0.div_euclid(12),
        }
    }

    pub fn days(&self) -> u32 {
        days_of_month(&self.month, self.year)
    }

    pub fn first_of_month(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month.number_from_month(), 1).unwrap()
    }

    /// Weekday column (Monday = 0) of the first day, for grid alignment.
    pub fn first_weekday_offset(&self) -> u32 {
        self.first_of_month().weekday().num_days_from_monday()
    }

    /// The full date of `day` inside this month, `None` if out of range.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        if (1..=self.days()).contains(&day) {
            NaiveDate::from_ymd_opt(self.year, self.month.number_from_month(), day)
        } else {
            None
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month.number_from_month()
    }
}

impl<T: Datelike> From<T> for MonthIndex {
    fn from(d: T) -> Self {
        MonthIndex::new(Month::from_u32(d.month()).unwrap(), d.year())
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month.name(), self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_round_trips() {
        let idx = MonthIndex::new(Month::September, 2026);
        assert_eq!(idx.shift(1).shift(-1), idx);
        assert_eq!(idx.shift(-25).shift(25), idx);
    }

    #[test]
    fn shift_normalizes_across_years() {
        let idx = MonthIndex::new(Month::November, 2026);
        assert_eq!(idx.shift(3), MonthIndex::new(Month::February, 2027));
        assert_eq!(idx.shift(-11), MonthIndex::new(Month::December, 2025));
        assert_eq!(idx.shift(26), MonthIndex::new(Month::January, 2029));
    }

    #[test]
    fn day_counts_respect_leap_years() {
        assert_eq!(days_of_month(&Month::February, 2024), 29);
        assert_eq!(days_of_month(&Month::February, 2026), 28);
        assert_eq!(days_of_month(&Month::December, 2026), 31);
    }

    #[test]
    fn date_bounds_follow_month_length() {
        let feb = MonthIndex::new(Month::February, 2026);
        assert_eq!(
            feb.date(28),
            Some(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap())
        );
        assert_eq!(feb.date(29), None);
        assert_eq!(feb.date(0), None);
    }

    #[test]
    fn contains_checks_month_and_year() {
        let idx = MonthIndex::new(Month::March, 2026);
        assert!(idx.contains(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));
        assert!(!idx.contains(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()));
        assert!(!idx.contains(NaiveDate::from_ymd_opt(2026, 4, 15).unwrap()));
    }
}
