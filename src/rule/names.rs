// Static vocabulary for recurrence phrases. Everything here expects lower
// case input, since phrases are case folded before matching.

use jiff::civil::Weekday;

use super::Interval;

/// Looks up a weekday by its full name, its 3 letter abbreviation or its 2
/// letter abbreviation. Plural full names (`mondays`) are accepted too.
pub(super) fn weekday(name: &str) -> Option<Weekday> {
    use jiff::civil::Weekday::*;

    let name = name
        .strip_suffix('s')
        .filter(|singular| singular.ends_with("day"))
        .unwrap_or(name);
    let weekday = match name {
        "sunday" | "sun" | "su" => Sunday,
        "monday" | "mon" | "mo" => Monday,
        "tuesday" | "tues" | "tue" | "tu" => Tuesday,
        "wednesday" | "wed" | "we" => Wednesday,
        "thursday" | "thurs" | "thu" | "th" => Thursday,
        "friday" | "fri" | "fr" => Friday,
        "saturday" | "sat" | "sa" => Saturday,
        _ => return None,
    };
    Some(weekday)
}

/// Looks up a month, in the range `1..=12`, by its full name or its 3
/// letter abbreviation.
pub(super) fn month(name: &str) -> Option<i8> {
    let month = match name {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sept" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Looks up a recurrence unit, singular or plural.
pub(super) fn unit(word: &str) -> Option<Interval> {
    let interval = match word {
        "day" | "days" => Interval::Day,
        "week" | "weeks" => Interval::Week,
        "month" | "months" => Interval::Month,
        "year" | "years" => Interval::Year,
        _ => return None,
    };
    Some(interval)
}

/// The abbreviation used when rendering a weekday index (0 is Sunday).
pub(super) fn weekday_abbreviation(index: i8) -> &'static str {
    match index {
        0 => "Sun",
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        6 => "Sat",
        _ => unreachable!("weekday index out of range"),
    }
}

/// The full English name of a month in the range `1..=12`.
pub(super) fn month_name(month: i8) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => unreachable!("month out of range"),
    }
}

/// Renders a day of the month as an English ordinal, e.g., `22nd`.
#[derive(Clone, Copy, Debug)]
pub(super) struct Ordinal(pub(super) i8);

impl std::fmt::Display for Ordinal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let suffix = match (self.0 % 10, self.0 % 100) {
            (_, 11..=13) => "th",
            (1, _) => "st",
            (2, _) => "nd",
            (3, _) => "rd",
            _ => "th",
        };
        write!(f, "{}{suffix}", self.0)
    }
}
