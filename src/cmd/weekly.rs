use recur::Rule;

use crate::args::{self, flags, positional};

const USAGE: &'static str = r#"
Print every occurrence of one or more weekdays on or after a given date.

If a start date is not given, then today's date is used. At least one weekday
must be given with `-w/--week-day`, and exactly one of the `-c/--count` or
`-u/--until` flags must be given.

The start date is only included when it falls on one of the given weekdays.
A count applies to all weekdays combined, so `-w thu,sat -c 4` prints four
dates and not eight.

USAGE:
    recur weekly -w <weekday-list> [-c <number> | -u <date>] [<start>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Print the next 4 Thursdays and Saturdays, starting on Feb 1, 2024:

        $ recur weekly -w thu,sat -c 4 2024-02-01
        February 2024
            2024-02-01 Thu
            2024-02-03 Sat
            2024-02-08 Thu
            2024-02-10 Sat

    %snip-start%

    Print every Friday from today through the end of August:

        $ recur weekly -w fri -u 2024-08-31
        July 2024
            2024-07-26 Fri
        August 2024
            2024-08-02 Fri
            2024-08-09 Fri
            2024-08-16 Fri
            2024-08-23 Fri
            2024-08-30 Fri

    %snip-end%
ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut weekdays = flags::Weekdays::default();
    let mut termination = flags::Termination::default();
    let mut output = flags::Output::default();
    let mut start = positional::Start::default();
    args::configure(
        p,
        USAGE,
        &mut [&mut weekdays, &mut termination, &mut output, &mut start],
    )?;
    let rule = Rule::Weekly(weekdays.get()?);
    super::print(rule, start.get(), termination.limit()?, output)
}
