/*!
Turns human recurrence phrases into recurrence rules.

The parser first normalizes the phrase (case folding and whitespace
collapsing), then peels off the optional `at <time>` and `until <date>`
suffixes (in either order), and finally tries each phrase family in order.
The first family that recognizes what remains wins.
*/

use std::sync::LazyLock;

use {
    jiff::civil::{Date, Time, Weekday},
    regex::{Captures, Regex},
};

use super::{
    Interval, InvalidRecurrence, RecurrenceRule, RecurrenceType, Until, names,
};

/// The phrase families, in the order they are tried.
const FAMILIES: &[(&str, fn(&str) -> Option<Pattern>)] = &[
    ("shortcut", shortcut),
    ("cardinal", cardinal),
    ("weekly", weekly),
    ("monthly", monthly),
    ("yearly", yearly),
];

/// Parses a recurrence phrase into a rule.
///
/// Matching is case insensitive and tolerant of extra whitespace. The text
/// given is preserved verbatim as the rule's original text.
pub fn parse(text: &str) -> Result<RecurrenceRule, InvalidRecurrence> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return Err(InvalidRecurrence::empty(text));
    }
    let (kind, phrase) = match normalized.strip_prefix("every!") {
        None => (RecurrenceType::Absolute, normalized),
        Some(rest) => {
            (RecurrenceType::Relative, format!("every {}", rest.trim_start()))
        }
    };
    // The time may come either before or after the end date.
    let (phrase, trailing_time) = strip_time(&phrase);
    let (phrase, until) = strip_until(phrase)
        .map_err(|date| InvalidRecurrence::date(text, date))?;
    let (phrase, time) = match trailing_time {
        Some(time) => (phrase, Some(time)),
        None => strip_time(phrase),
    };
    log::trace!(
        "parsing `{text}` as `{phrase}` \
         (kind: {kind}, time: {time:?}, until: {until:?})",
        kind = kind.as_str(),
    );

    let Some((family, pattern)) =
        FAMILIES.iter().find_map(|&(name, matches)| {
            log::trace!("trying {name} phrase family on `{phrase}`");
            matches(phrase).map(|pattern| (name, pattern))
        })
    else {
        log::debug!("no phrase family recognizes `{phrase}`");
        return Err(InvalidRecurrence::pattern(text));
    };
    log::debug!("`{phrase}` matched the {family} phrase family: {pattern:?}");

    let mut builder = RecurrenceRule::builder(pattern.interval);
    builder
        .original_text(text)
        .kind(kind)
        .count(pattern.count)
        .by_week_day(pattern.days);
    if let Some(day) = pattern.day_of_month {
        builder.day_of_month(day);
    }
    if let Some(month) = pattern.month_of_year {
        builder.month_of_year(month);
    }
    if let Some(time) = time {
        builder.time(time);
    }
    if let Some(until) = until {
        builder.until(until);
    }
    builder.build().map_err(|err| {
        log::debug!("rejecting `{text}`: {err:#}");
        InvalidRecurrence::pattern(text)
    })
}

/// The rule shaped parts recognized by a single phrase family.
#[derive(Clone, Debug)]
struct Pattern {
    interval: Interval,
    count: i32,
    days: Vec<Weekday>,
    day_of_month: Option<i8>,
    month_of_year: Option<i8>,
}

impl Pattern {
    fn new(interval: Interval, count: i32) -> Pattern {
        Pattern {
            interval,
            count,
            days: vec![],
            day_of_month: None,
            month_of_year: None,
        }
    }

    fn days(self, days: impl IntoIterator<Item = Weekday>) -> Pattern {
        Pattern { days: days.into_iter().collect(), ..self }
    }

    fn day_of_month(self, day: i8) -> Pattern {
        Pattern { day_of_month: Some(day), ..self }
    }

    fn month_of_year(self, month: i8) -> Pattern {
        Pattern { month_of_year: Some(month), ..self }
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ").to_lowercase()
}

/// Splits off a trailing `until <date>`.
///
/// When there is an `until` but the text after it isn't a date, that text
/// is returned as the error.
fn strip_until(phrase: &str) -> Result<(&str, Option<Until>), &str> {
    static RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(.+?) until (.+)$").unwrap());
    static ISO: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").unwrap());
    static MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"^([a-z]+)\.? ([0-9]{1,2})(?:st|nd|rd|th)?(?:,? ([0-9]{4}))?$",
        )
        .unwrap()
    });

    let Some(caps) = RE.captures(phrase) else { return Ok((phrase, None)) };
    let (rest, date) = (group(&caps, 1), group(&caps, 2));
    let until = if let Some(caps) = ISO.captures(date) {
        let year = number::<i16>(&caps, 1).ok_or(date)?;
        let month = number::<i8>(&caps, 2).ok_or(date)?;
        let day = number::<i8>(&caps, 3).ok_or(date)?;
        Until::Date(Date::new(year, month, day).map_err(|_| date)?)
    } else if let Some(caps) = MONTH_DAY.captures(date) {
        let month = names::month(group(&caps, 1)).ok_or(date)?;
        let day = number::<i8>(&caps, 2).ok_or(date)?;
        match caps.get(3) {
            Some(_) => {
                let year = number::<i16>(&caps, 3).ok_or(date)?;
                Until::Date(Date::new(year, month, day).map_err(|_| date)?)
            }
            None => {
                Date::new(2000, month, day).map_err(|_| date)?;
                Until::MonthDay { month, day }
            }
        }
    } else {
        return Err(date);
    };
    Ok((rest, Some(until)))
}

/// Splits off a trailing time of day.
///
/// A suffix that looks like a time but is out of range is left in place, so
/// that the phrase fails to match any family.
fn strip_time(phrase: &str) -> (&str, Option<Time>) {
    static MERIDIEM: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^(.+?) at ([0-9]{1,2})(?::([0-9]{2}))? ?(am|pm)$")
            .unwrap()
    });
    static CLOCK: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^(.+?) (?:at )?([0-9]{1,2}):([0-9]{2})$").unwrap()
    });
    static HOUR: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(.+?) at ([0-9]{1,2})$").unwrap());
    static NAMED: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^(.+?) (?:at )?(noon|midnight)$").unwrap()
    });

    let time = if let Some(caps) = MERIDIEM.captures(phrase) {
        meridiem(&caps)
    } else if let Some(caps) = CLOCK.captures(phrase) {
        number::<i8>(&caps, 2)
            .zip(number::<i8>(&caps, 3))
            .and_then(|(hour, minute)| Time::new(hour, minute, 0, 0).ok())
            .map(|time| (group(&caps, 1), time))
    } else if let Some(caps) = HOUR.captures(phrase) {
        number::<i8>(&caps, 2)
            .and_then(|hour| Time::new(hour, 0, 0, 0).ok())
            .map(|time| (group(&caps, 1), time))
    } else if let Some(caps) = NAMED.captures(phrase) {
        let time = match group(&caps, 2) {
            "noon" => Time::constant(12, 0, 0, 0),
            _ => Time::midnight(),
        };
        Some((group(&caps, 1), time))
    } else {
        None
    };
    match time {
        None => (phrase, None),
        Some((rest, time)) => (rest, Some(time)),
    }
}

fn meridiem<'h>(caps: &Captures<'h>) -> Option<(&'h str, Time)> {
    let hour = number::<i8>(caps, 2)?;
    let minute = match caps.get(3) {
        None => 0,
        Some(_) => number::<i8>(caps, 3)?,
    };
    if !(1..=12).contains(&hour) {
        return None;
    }
    // 12am is midnight and 12pm is noon.
    let hour = match group(caps, 4) {
        "am" => hour % 12,
        _ => hour % 12 + 12,
    };
    let time = Time::new(hour, minute, 0, 0).ok()?;
    Some((group(caps, 1), time))
}

/// Recognizes single word shortcuts like `daily` or `weekdays`, with or
/// without a leading `every`, along with `every other <unit>`.
fn shortcut(phrase: &str) -> Option<Pattern> {
    use jiff::civil::Weekday::*;

    let word = phrase.strip_prefix("every ").unwrap_or(phrase);
    let pattern = match word {
        "daily" => Pattern::new(Interval::Day, 1),
        "weekly" => Pattern::new(Interval::Week, 1),
        "monthly" => Pattern::new(Interval::Month, 1),
        "yearly" | "annually" => Pattern::new(Interval::Year, 1),
        "weekday" | "weekdays" => Pattern::new(Interval::Week, 1)
            .days([Monday, Tuesday, Wednesday, Thursday, Friday]),
        "weekend" | "weekends" => {
            Pattern::new(Interval::Week, 1).days([Sunday, Saturday])
        }
        "biweekly" | "fortnightly" => Pattern::new(Interval::Week, 2),
        "quarterly" => Pattern::new(Interval::Month, 3),
        _ => {
            let unit = phrase.strip_prefix("every other ")?;
            Pattern::new(names::unit(unit)?, 2)
        }
    };
    Some(pattern)
}

/// Recognizes `every [N] <unit>`.
fn cardinal(phrase: &str) -> Option<Pattern> {
    static RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^every(?: ([0-9]+))? ([a-z]+)$").unwrap()
    });

    let caps = RE.captures(phrase)?;
    let interval = names::unit(group(&caps, 2))?;
    Some(Pattern::new(interval, count(&caps, 1)?))
}

/// Recognizes a list of weekdays, optionally after `every [N] weeks on`.
fn weekly(phrase: &str) -> Option<Pattern> {
    static RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^every (?:(?:([0-9]+|other) )?weeks? on )?(.+)$")
            .unwrap()
    });
    // `, and` is one separator, as in `Mon, Wed, and Fri`.
    static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r" ?(?:, ?and\b|,|&|\band\b) ?").unwrap()
    });

    let caps = RE.captures(phrase)?;
    let mut days = vec![];
    for name in SEPARATOR.split(group(&caps, 2)) {
        days.push(names::weekday(name)?);
    }
    Some(Pattern::new(Interval::Week, count(&caps, 1)?).days(days))
}

/// Recognizes a day of the month, including the last one.
fn monthly(phrase: &str) -> Option<Pattern> {
    static ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^every ([0-9]{1,2})(?:st|nd|rd|th)$").unwrap()
    });
    static ON: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"^every (?:([0-9]+|other) )?months? on (?:the )?([0-9]{1,2})(?:st|nd|rd|th)?$",
        )
        .unwrap()
    });
    static LAST: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^every last day(?: of (?:the|each|every) month)?$")
            .unwrap()
    });
    static ON_LAST: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"^every (?:([0-9]+|other) )?months? on the last day(?: of the month)?$",
        )
        .unwrap()
    });

    if let Some(caps) = ORDINAL.captures(phrase) {
        let day = number::<i8>(&caps, 1)?;
        return Some(Pattern::new(Interval::Month, 1).day_of_month(day));
    }
    if let Some(caps) = ON.captures(phrase) {
        let day = number::<i8>(&caps, 2)?;
        let count = count(&caps, 1)?;
        return Some(Pattern::new(Interval::Month, count).day_of_month(day));
    }
    if LAST.is_match(phrase) {
        return Some(Pattern::new(Interval::Month, 1).day_of_month(-1));
    }
    let caps = ON_LAST.captures(phrase)?;
    Some(Pattern::new(Interval::Month, count(&caps, 1)?).day_of_month(-1))
}

/// Recognizes a month and day, optionally after `every [N] years on`, along
/// with the last day of a month and a month on its own.
fn yearly(phrase: &str) -> Option<Pattern> {
    static DATE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"^every ([a-z]+)\.? ([0-9]{1,2})(?:st|nd|rd|th)?(?:,? [0-9]{4})?$",
        )
        .unwrap()
    });
    static ON: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"^every (?:([0-9]+|other) )?years? on ([a-z]+)\.? ([0-9]{1,2})(?:st|nd|rd|th)?$",
        )
        .unwrap()
    });
    static LAST: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"^every (?:(?:([0-9]+|other) )?years? on the )?last day of ([a-z]+)\.?$",
        )
        .unwrap()
    });
    static IN: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^every (?:([0-9]+|other) )?years? in ([a-z]+)\.?$")
            .unwrap()
    });

    if let Some(caps) = LAST.captures(phrase) {
        let month = names::month(group(&caps, 2))?;
        return Some(
            Pattern::new(Interval::Year, count(&caps, 1)?)
                .month_of_year(month)
                .day_of_month(-1),
        );
    }
    if let Some(caps) = IN.captures(phrase) {
        let month = names::month(group(&caps, 2))?;
        return Some(
            Pattern::new(Interval::Year, count(&caps, 1)?).month_of_year(month),
        );
    }
    let (count, month, day) = if let Some(caps) = DATE.captures(phrase) {
        (1, group(&caps, 1), number::<i8>(&caps, 2)?)
    } else {
        let caps = ON.captures(phrase)?;
        (count(&caps, 1)?, group(&caps, 2), number::<i8>(&caps, 3)?)
    };
    let month = names::month(month)?;
    // The day has to exist in at least one year.
    Date::new(2000, month, day).ok()?;
    Some(
        Pattern::new(Interval::Year, count)
            .month_of_year(month)
            .day_of_month(day),
    )
}

/// Returns the text of a capture group that always participates in a match.
fn group<'h>(caps: &Captures<'h>, index: usize) -> &'h str {
    caps.get(index).map_or("", |m| m.as_str())
}

fn number<T: std::str::FromStr>(caps: &Captures<'_>, index: usize) -> Option<T> {
    caps.get(index)?.as_str().parse().ok()
}

/// Interprets an optional `N` or `other` as an interval count.
fn count(caps: &Captures<'_>, index: usize) -> Option<i32> {
    match caps.get(index).map(|m| m.as_str()) {
        None => Some(1),
        Some("other") => Some(2),
        Some(n) => n.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use crate::rule::InvalidRecurrenceKind;

    use super::*;

    fn canonical(phrases: &[&str]) -> String {
        let mut out = String::new();
        for phrase in phrases {
            let rule = parse(phrase).unwrap();
            out.push_str(&format!("{phrase} => {rule}\n"));
        }
        out
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        for text in ["EVERY DAY", "Every Day", "every   day", "  every day\t"] {
            let rule = parse(text).unwrap();
            assert_eq!(rule.interval(), Interval::Day, "{text}");
            assert_eq!(rule.count(), 1, "{text}");
            assert_eq!(rule.original_text(), text);
        }
    }

    #[test]
    fn parsing_is_deterministic() {
        let text = "every Mon, Wed and Fri at 9am until 2027-03-01";
        assert_eq!(parse(text).unwrap(), parse(text).unwrap());
    }

    #[test]
    fn weekdays_are_sorted() {
        assert_eq!(parse("every Tue, Mon").unwrap().days(), &[1, 2]);
        assert_eq!(parse("every Mon, Tue").unwrap().days(), &[1, 2]);
        assert_eq!(
            parse("every saturday & sunday and sun").unwrap().days(),
            &[0, 6],
        );
    }

    #[test]
    fn two_week_cadence_with_time_and_end() {
        let rule =
            parse("every 2 weeks on Mon, Fri at 14:00 until December 31, 2026")
                .unwrap();
        assert_eq!(rule.kind(), RecurrenceType::Absolute);
        assert_eq!(rule.interval(), Interval::Week);
        assert_eq!(rule.count(), 2);
        assert_eq!(rule.days(), &[1, 5]);
        assert_eq!(rule.time(), Some(time(14, 0, 0, 0)));
        assert_eq!(rule.until(), Some(Until::Date(date(2026, 12, 31))));
    }

    #[test]
    fn relative_marker() {
        let rule = parse("Every! 3 days").unwrap();
        assert_eq!(rule.kind(), RecurrenceType::Relative);
        assert_eq!((rule.interval(), rule.count()), (Interval::Day, 3));

        let rule = parse("every!week").unwrap();
        assert_eq!(rule.kind(), RecurrenceType::Relative);
        assert_eq!(rule.interval(), Interval::Week);
    }

    #[test]
    fn shortcuts() {
        let got = canonical(&[
            "daily",
            "every day",
            "weekly",
            "monthly",
            "yearly",
            "annually",
            "every weekday",
            "weekdays",
            "weekends",
            "biweekly",
            "fortnightly",
            "quarterly",
            "every other day",
            "every other week",
            "every other month",
            "every other year",
        ]);
        insta::assert_snapshot!(got, @r"
        daily => every day
        every day => every day
        weekly => every week
        monthly => every month
        yearly => every year
        annually => every year
        every weekday => every week on Mon, Tue, Wed, Thu, Fri
        weekdays => every week on Mon, Tue, Wed, Thu, Fri
        weekends => every week on Sun, Sat
        biweekly => every 2 weeks
        fortnightly => every 2 weeks
        quarterly => every 3 months
        every other day => every 2 days
        every other week => every 2 weeks
        every other month => every 2 months
        every other year => every 2 years
        ");
    }

    #[test]
    fn families() {
        let got = canonical(&[
            "every 3 days",
            "every 1 week",
            "every 10 years",
            "every monday",
            "every Mon, Wed, and Fri",
            "every tu & th",
            "every other week on thursdays",
            "every 3 weeks on sat and sun",
            "every 15th",
            "every 1st",
            "every month on the 22nd",
            "every 2 months on 3",
            "every last day",
            "every last day of the month",
            "every other month on the last day",
            "every January 15",
            "every feb 29th, 2028",
            "every sept 3",
            "every 2 years on March 1st",
            "every last day of feb",
            "every year on the last day of february",
            "every other year on the last day of dec.",
            "every year in may",
            "every 3 years in sept",
        ]);
        insta::assert_snapshot!(got, @r"
        every 3 days => every 3 days
        every 1 week => every week
        every 10 years => every 10 years
        every monday => every week on Mon
        every Mon, Wed, and Fri => every week on Mon, Wed, Fri
        every tu & th => every week on Tue, Thu
        every other week on thursdays => every 2 weeks on Thu
        every 3 weeks on sat and sun => every 3 weeks on Sun, Sat
        every 15th => every month on the 15th
        every 1st => every month on the 1st
        every month on the 22nd => every month on the 22nd
        every 2 months on 3 => every 2 months on the 3rd
        every last day => every month on the last day
        every last day of the month => every month on the last day
        every other month on the last day => every 2 months on the last day
        every January 15 => every year on January 15
        every feb 29th, 2028 => every year on February 29
        every sept 3 => every year on September 3
        every 2 years on March 1st => every 2 years on March 1
        every last day of feb => every year on the last day of February
        every year on the last day of february => every year on the last day of February
        every other year on the last day of dec. => every 2 years on the last day of December
        every year in may => every year in May
        every 3 years in sept => every 3 years in September
        ");
    }

    #[test]
    fn times() {
        let got = canonical(&[
            "every day at 9am",
            "every day at 9 am",
            "every day at 9:30pm",
            "every day at 12am",
            "every day at 12pm",
            "every day at 17:45",
            "every day 07:05",
            "every day at 8",
            "every day at noon",
            "every day midnight",
            "every Mon, Fri at 14:00",
        ]);
        insta::assert_snapshot!(got, @r"
        every day at 9am => every day at 09:00
        every day at 9 am => every day at 09:00
        every day at 9:30pm => every day at 21:30
        every day at 12am => every day at 00:00
        every day at 12pm => every day at 12:00
        every day at 17:45 => every day at 17:45
        every day 07:05 => every day at 07:05
        every day at 8 => every day at 08:00
        every day at noon => every day at 12:00
        every day midnight => every day at 00:00
        every Mon, Fri at 14:00 => every week on Mon, Fri at 14:00
        ");
    }

    #[test]
    fn end_dates() {
        let got = canonical(&[
            "every day until 2026-12-31",
            "every week until Dec 31st",
            "every January 15 until 2027-03-01",
            "every month on the 1st at 8am until March 1, 2027",
            "every day until feb 29",
            "every day until 2026-12-31 at 9am",
            "every Mon, Fri until Dec 31 14:00",
        ]);
        insta::assert_snapshot!(got, @r"
        every day until 2026-12-31 => every day until 2026-12-31
        every week until Dec 31st => every week until December 31
        every January 15 until 2027-03-01 => every year on January 15 until 2027-03-01
        every month on the 1st at 8am until March 1, 2027 => every month on the 1st at 08:00 until 2027-03-01
        every day until feb 29 => every day until February 29
        every day until 2026-12-31 at 9am => every day at 09:00 until 2026-12-31
        every Mon, Fri until Dec 31 14:00 => every week on Mon, Fri at 14:00 until December 31
        ");

        let rule = parse("every week until Dec 31st").unwrap();
        assert_eq!(rule.until(), Some(Until::MonthDay { month: 12, day: 31 }));
    }

    #[test]
    fn errors() {
        let err = parse("").unwrap_err();
        assert_eq!(err.kind(), &InvalidRecurrenceKind::Empty);
        insta::assert_snapshot!(err, @"recurrence pattern is empty");

        let err = parse("   ").unwrap_err();
        assert_eq!(err.kind(), &InvalidRecurrenceKind::Empty);

        let err = parse("foo bar baz").unwrap_err();
        assert_eq!(err.kind(), &InvalidRecurrenceKind::Pattern);
        insta::assert_snapshot!(
            err,
            @"cannot parse recurrence pattern `foo bar baz`",
        );

        let err = parse("every day until not-a-date").unwrap_err();
        insta::assert_snapshot!(
            err,
            @"invalid date `not-a-date` in recurrence pattern `every day until not-a-date`",
        );

        let err = parse("every day until 2026-02-30").unwrap_err();
        assert_eq!(
            err.kind(),
            &InvalidRecurrenceKind::Date { date: "2026-02-30".into() },
        );

        let err = parse("every day until february 30").unwrap_err();
        assert_eq!(
            err.kind(),
            &InvalidRecurrenceKind::Date { date: "february 30".into() },
        );
    }

    #[test]
    fn rejected_patterns() {
        for text in [
            "every 0 days",
            "every 0th",
            "every 32nd",
            "every month on the 0th",
            "every february 30",
            "every day at 13pm",
            "every day at 24:00",
            "every day at 9:60",
            "every fortnight",
            "every mon, funday",
            "every mon,",
            "every mon and",
            "every 2 weeks on mon and",
            "every , mon",
            "every mon,, fri",
            "every mon and and fri",
            "every day at 9am until 2026-12-31 at 10am",
            "every year in funuary",
            "every last day of the week",
            "every 99999999999 days",
            "until 2026-01-01",
            "every",
            "every day until",
        ] {
            let err = parse(text).unwrap_err();
            assert_eq!(err.kind(), &InvalidRecurrenceKind::Pattern, "{text}");
        }
    }

    #[test]
    fn canonical_phrase_parses_to_equal_rule() {
        for text in [
            "daily",
            "every! weekday",
            "every other week on thursdays at 7:15am",
            "every 3 weeks on sat and sun",
            "every 2 months on 3 until dec 31",
            "every! last day at noon",
            "every feb 29th",
            "every 2 years on March 1st until 2040-01-01",
            "every 2 weeks on Mon, Fri at 14:00 until December 31, 2026",
            "every last day of feb at 6pm",
            "every 2 years in june until 2040-01-01",
        ] {
            let rule = parse(text).unwrap();
            let again = parse(&rule.to_string()).unwrap();
            assert_eq!(rule.kind(), again.kind(), "{text}");
            assert_eq!(rule.interval(), again.interval(), "{text}");
            assert_eq!(rule.count(), again.count(), "{text}");
            assert_eq!(rule.days(), again.days(), "{text}");
            assert_eq!(rule.day_of_month(), again.day_of_month(), "{text}");
            assert_eq!(rule.month_of_year(), again.month_of_year(), "{text}");
            assert_eq!(rule.time(), again.time(), "{text}");
            assert_eq!(rule.until(), again.until(), "{text}");
        }
    }
}
