//! Named date adjustment policies.
//!
//! Each adjuster takes a date and returns the adjusted date. Adjusters that
//! can never leave the month are infallible; the rest report range errors at
//! the supported-date boundaries.

use crate::components::{DayOfWeek, LocalDate};
use crate::fields::TemporalField;
use crate::{CivilError, CivilResult};

/// The first day of the date's month.
pub fn first_day_of_month(date: LocalDate) -> LocalDate {
    LocalDate::new_unchecked(date.year(), date.month(), 1)
}

/// The last day of the date's month.
pub fn last_day_of_month(date: LocalDate) -> LocalDate {
    LocalDate::new_unchecked(date.year(), date.month(), date.length_of_month())
}

/// The first day of the month after the date's month.
pub fn first_day_of_next_month(date: LocalDate) -> CivilResult<LocalDate> {
    first_day_of_month(date).plus_months(1)
}

/// January 1st of the date's year.
pub fn first_day_of_year(date: LocalDate) -> LocalDate {
    LocalDate::new_unchecked(date.year(), 1, 1)
}

/// December 31st of the date's year.
pub fn last_day_of_year(date: LocalDate) -> LocalDate {
    LocalDate::new_unchecked(date.year(), 12, 31)
}

/// January 1st of the year after the date's year.
pub fn first_day_of_next_year(date: LocalDate) -> CivilResult<LocalDate> {
    first_day_of_year(date).plus_years(1)
}

/// The first occurrence of the day-of-week within the date's month.
pub fn first_in_month(date: LocalDate, day_of_week: DayOfWeek) -> CivilResult<LocalDate> {
    next_or_same(first_day_of_month(date), day_of_week)
}

/// The last occurrence of the day-of-week within the date's month.
pub fn last_in_month(date: LocalDate, day_of_week: DayOfWeek) -> CivilResult<LocalDate> {
    previous_or_same(last_day_of_month(date), day_of_week)
}

/// The `ordinal`-th occurrence of the day-of-week counted from the start of
/// the date's month, with `ordinal` in `1..=5`.
///
/// An ordinal of 5 may land in the following month when the month holds only
/// four occurrences of the day.
pub fn day_of_week_in_month(
    date: LocalDate,
    ordinal: u8,
    day_of_week: DayOfWeek,
) -> CivilResult<LocalDate> {
    if !(1..=5).contains(&ordinal) {
        return Err(CivilError::ValueOutOfRange {
            field: TemporalField::DayOfMonth,
            value: i64::from(ordinal),
            min: 1,
            max: 5,
        });
    }
    first_in_month(date, day_of_week)?.plus_weeks(i64::from(ordinal) - 1)
}

/// The next occurrence of the day-of-week, strictly after the date.
pub fn next(date: LocalDate, day_of_week: DayOfWeek) -> CivilResult<LocalDate> {
    let days_diff =
        i64::from(date.day_of_week().value()) - i64::from(day_of_week.value());
    date.plus_days(if days_diff >= 0 { 7 - days_diff } else { -days_diff })
}

/// The next occurrence of the day-of-week, or the date itself when it
/// already falls on it.
pub fn next_or_same(date: LocalDate, day_of_week: DayOfWeek) -> CivilResult<LocalDate> {
    if date.day_of_week() == day_of_week {
        Ok(date)
    } else {
        next(date, day_of_week)
    }
}

/// The previous occurrence of the day-of-week, strictly before the date.
pub fn previous(date: LocalDate, day_of_week: DayOfWeek) -> CivilResult<LocalDate> {
    let days_diff =
        i64::from(day_of_week.value()) - i64::from(date.day_of_week().value());
    date.minus_days(if days_diff >= 0 { 7 - days_diff } else { -days_diff })
}

/// The previous occurrence of the day-of-week, or the date itself when it
/// already falls on it.
pub fn previous_or_same(date: LocalDate, day_of_week: DayOfWeek) -> CivilResult<LocalDate> {
    if date.day_of_week() == day_of_week {
        Ok(date)
    } else {
        previous(date, day_of_week)
    }
}

/// The next day that is not a Saturday or Sunday.
pub fn next_non_weekend_day(date: LocalDate) -> CivilResult<LocalDate> {
    match date.day_of_week() {
        DayOfWeek::Friday => date.plus_days(3),
        DayOfWeek::Saturday => date.plus_days(2),
        _ => date.plus_days(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u8, day: u8) -> LocalDate {
        LocalDate::of(year, month, day).unwrap()
    }

    #[test]
    fn month_and_year_bounds() {
        let d = date(2008, 2, 15);
        assert_eq!(first_day_of_month(d), date(2008, 2, 1));
        assert_eq!(last_day_of_month(d), date(2008, 2, 29));
        assert_eq!(first_day_of_next_month(d).unwrap(), date(2008, 3, 1));
        assert_eq!(first_day_of_year(d), date(2008, 1, 1));
        assert_eq!(last_day_of_year(d), date(2008, 12, 31));
        assert_eq!(first_day_of_next_year(d).unwrap(), date(2009, 1, 1));
    }

    #[test]
    fn last_day_of_month_is_idempotent() {
        let d = last_day_of_month(date(2008, 6, 3));
        assert_eq!(last_day_of_month(d), d);
    }

    #[test]
    fn occurrences_in_month() {
        // June 2008: Sundays fall on 1, 8, 15, 22, 29.
        let d = date(2008, 6, 11);
        assert_eq!(first_in_month(d, DayOfWeek::Sunday).unwrap(), date(2008, 6, 1));
        assert_eq!(last_in_month(d, DayOfWeek::Sunday).unwrap(), date(2008, 6, 29));
        assert_eq!(
            day_of_week_in_month(d, 3, DayOfWeek::Sunday).unwrap(),
            date(2008, 6, 15)
        );
        // A fifth Wednesday does not exist in June 2008; the adjuster rolls
        // into July.
        assert_eq!(
            day_of_week_in_month(d, 5, DayOfWeek::Wednesday).unwrap(),
            date(2008, 7, 2)
        );
        assert!(day_of_week_in_month(d, 6, DayOfWeek::Monday).is_err());
    }

    #[test]
    fn relative_day_of_week() {
        // 2008-06-30 is a Monday.
        let monday = date(2008, 6, 30);
        assert_eq!(next(monday, DayOfWeek::Monday).unwrap(), date(2008, 7, 7));
        assert_eq!(next(monday, DayOfWeek::Tuesday).unwrap(), date(2008, 7, 1));
        assert_eq!(next_or_same(monday, DayOfWeek::Monday).unwrap(), monday);
        assert_eq!(previous(monday, DayOfWeek::Monday).unwrap(), date(2008, 6, 23));
        assert_eq!(previous(monday, DayOfWeek::Sunday).unwrap(), date(2008, 6, 29));
        assert_eq!(previous_or_same(monday, DayOfWeek::Monday).unwrap(), monday);
    }

    #[test]
    fn weekend_skipping() {
        // 2008-06-27 is a Friday.
        assert_eq!(next_non_weekend_day(date(2008, 6, 27)).unwrap(), date(2008, 6, 30));
        assert_eq!(next_non_weekend_day(date(2008, 6, 28)).unwrap(), date(2008, 6, 30));
        assert_eq!(next_non_weekend_day(date(2008, 6, 29)).unwrap(), date(2008, 6, 30));
        assert_eq!(next_non_weekend_day(date(2008, 6, 30)).unwrap(), date(2008, 7, 1));
    }

    #[test]
    fn range_boundary_errors() {
        assert!(first_day_of_next_year(LocalDate::MAX).is_err());
        assert!(next(LocalDate::MAX, DayOfWeek::Monday).is_err());
    }
}
