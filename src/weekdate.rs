use {
    anyhow::Context,
    jiff::{
        Span,
        civil::{Date, Weekday},
    },
};

/// Weekly recurrences number their weeks from Sunday.
pub const WEEK_START: Weekday = Weekday::Sunday;

/// Returns the start of the week that the given date resides in.
///
/// The starting point of the week is determined by `start`.
pub fn first_of_week(start: Weekday, date: Date) -> anyhow::Result<Date> {
    let since = date.weekday().since(start);
    date.checked_sub(Span::new().days(since)).with_context(|| {
        format!(
            "failed to find first day of week containing \
             {date}, for weeks starting on {start:?}",
        )
    })
}

/// Returns the first date on or after `week_start` whose weekday is
/// `weekday`.
///
/// `week_start` is usually the result of `first_of_week`.
pub fn in_week(week_start: Date, weekday: Weekday) -> anyhow::Result<Date> {
    let offset = weekday.since(week_start.weekday());
    week_start.checked_add(Span::new().days(offset)).with_context(|| {
        format!(
            "{weekday:?} in the week starting on {week_start} \
             is out of supported range",
        )
    })
}

#[cfg(test)]
mod tests {
    use jiff::civil::{Weekday::*, date};

    use super::*;

    #[test]
    fn first_of_week_sunday_start() {
        // 2026-01-14 is a Wednesday.
        let got = first_of_week(Sunday, date(2026, 1, 14)).unwrap();
        assert_eq!(got, date(2026, 1, 11));
        // Sundays are their own week start.
        let got = first_of_week(Sunday, date(2026, 1, 11)).unwrap();
        assert_eq!(got, date(2026, 1, 11));
        // Saturday is the last day of the week.
        let got = first_of_week(Sunday, date(2026, 1, 17)).unwrap();
        assert_eq!(got, date(2026, 1, 11));
        // Across a year boundary.
        let got = first_of_week(Sunday, date(2026, 1, 1)).unwrap();
        assert_eq!(got, date(2025, 12, 28));
    }

    #[test]
    fn first_of_week_other_starts() {
        let got = first_of_week(Monday, date(2026, 1, 11)).unwrap();
        assert_eq!(got, date(2026, 1, 5));
        let got = first_of_week(Saturday, date(2026, 1, 14)).unwrap();
        assert_eq!(got, date(2026, 1, 10));
    }

    #[test]
    fn first_of_week_out_of_range() {
        // -9999-01-01 is a Monday, so its Sunday started week begins before
        // the minimum supported date.
        assert!(first_of_week(Sunday, Date::MIN).is_err());
        assert!(first_of_week(Monday, Date::MIN).is_ok());
    }

    #[test]
    fn in_week_offsets() {
        let start = date(2026, 1, 11);
        assert_eq!(in_week(start, Sunday).unwrap(), date(2026, 1, 11));
        assert_eq!(in_week(start, Monday).unwrap(), date(2026, 1, 12));
        assert_eq!(in_week(start, Saturday).unwrap(), date(2026, 1, 17));
        assert!(in_week(Date::MAX, Monday).is_err());
    }
}
