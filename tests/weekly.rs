use crate::command::assert_cmd_snapshot;

fn weekly() -> crate::command::Command {
    crate::recur(["weekly"])
}

#[test]
fn count_is_across_weekdays() {
    assert_cmd_snapshot!(
        weekly().args(["-w", "thu,sat", "-c4", "2024-02-01"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    February 2024
        2024-02-01 Thu
        2024-02-03 Sat
        2024-02-08 Thu
        2024-02-10 Sat

    ----- stderr -----
    ",
    );
}

#[test]
fn repeated_flags_and_until() {
    assert_cmd_snapshot!(
        weekly().args([
            "-w",
            "sat",
            "-w",
            "thu,SAT",
            "-u",
            "2024-03-02",
            "2024-02-01",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    February 2024
        2024-02-01 Thu
        2024-02-03 Sat
        2024-02-08 Thu
        2024-02-10 Sat
        2024-02-15 Thu
        2024-02-17 Sat
        2024-02-22 Thu
        2024-02-24 Sat
        2024-02-29 Thu
    March 2024
        2024-03-02 Sat

    ----- stderr -----
    ",
    );
}

#[test]
fn until_on_matching_weekday() {
    assert_cmd_snapshot!(
        weekly().args(["-w", "fri", "-u", "2024-03-01", "2024-02-01"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    February 2024
        2024-02-02 Fri
        2024-02-09 Fri
        2024-02-16 Fri
        2024-02-23 Fri
    March 2024
        2024-03-01 Fri

    ----- stderr -----
    ",
    );
}

#[test]
fn start_not_on_weekday() {
    assert_cmd_snapshot!(
        weekly().args(["--week-day", "monday", "-c2"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    July 2024
        2024-07-22 Mon
        2024-07-29 Mon

    ----- stderr -----
    ",
    );
}

#[test]
fn weekday_is_required() {
    assert_cmd_snapshot!(
        weekly().args(["-c3"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    at least one -w/--week-day is required
    ",
    );

    assert_cmd_snapshot!(
        weekly().args(["-w", "fry", "-c3"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    -w/--week-day: failed to parse `fry` within sequence `fry`: unrecognized weekday: `fry`
    ",
    );
}
