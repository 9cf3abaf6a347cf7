use crate::{command::assert_cmd_snapshot, recur};

#[test]
fn weekdays() {
    assert_cmd_snapshot!(
        recur(["next", "every Mon, Wed", "2026-01-14"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2026-01-19

    ----- stderr -----
    ",
    );

    // Sunday starts the week, so Monday is still ahead.
    assert_cmd_snapshot!(
        recur(["next", "every 2 weeks on Mon", "2026-01-18"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2026-01-19

    ----- stderr -----
    ",
    );
}

/// The due date defaults to today.
#[test]
fn today() {
    assert_cmd_snapshot!(
        recur(["next", "every weekday"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2026-01-15

    ----- stderr -----
    ",
    );

    assert_cmd_snapshot!(
        recur(["next", "every day", "tomorrow"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2026-01-16

    ----- stderr -----
    ",
    );
}

#[test]
fn times() {
    assert_cmd_snapshot!(
        recur(["next", "every day at 9am", "2026-01-14"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2026-01-15T09:00

    ----- stderr -----
    ",
    );

    assert_cmd_snapshot!(
        recur(["next", "every day", "now"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2026-01-15T12:00

    ----- stderr -----
    ",
    );

    assert_cmd_snapshot!(
        recur(["next", "every week", "2026-01-14T17:45"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2026-01-21T17:45

    ----- stderr -----
    ",
    );
}

#[test]
fn months_clamp() {
    assert_cmd_snapshot!(
        recur(["next", "every month on the 31st", "2026-01-31"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2026-02-28

    ----- stderr -----
    ",
    );

    assert_cmd_snapshot!(
        recur(["next", "every year on feb 29", "2024-02-29"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2025-02-28

    ----- stderr -----
    ",
    );
}

#[test]
fn completed() {
    // Repeats from the completion date.
    assert_cmd_snapshot!(
        recur([
            "next",
            "--completed",
            "2026-01-20",
            "every! 2 weeks",
            "2026-01-14",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2026-02-03

    ----- stderr -----
    ",
    );

    // Repeats from the due date, so the completion date is ignored.
    assert_cmd_snapshot!(
        recur([
            "next",
            "--completed",
            "2026-01-20",
            "every 2 weeks",
            "2026-01-14",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2026-01-28

    ----- stderr -----
    ",
    );
}

/// Nothing is printed when the next occurrence is after the end date.
#[test]
fn end_date() {
    assert_cmd_snapshot!(
        recur(["next", "every day until 2026-01-15", "2026-01-14"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2026-01-15

    ----- stderr -----
    ",
    );

    assert_cmd_snapshot!(
        recur(["next", "every day until 2026-01-14", "2026-01-14"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ",
    );
}

#[test]
fn invalid() {
    assert_cmd_snapshot!(
        recur(["next", "sometimes"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    invalid <rule>: cannot parse recurrence pattern `sometimes`
    ",
    );

    assert_cmd_snapshot!(
        recur(["next", "daily", "2026-01-14T09:30Z"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    invalid <due>: date `2026-01-14T09:30Z` must not have an offset or time zone annotation
    ",
    );

    assert_cmd_snapshot!(
        recur(["next"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    missing required <rule>
    ",
    );
}
