use recur::Rule;

use crate::args::{self, flags, positional};

const USAGE: &'static str = r#"
Print the same day, or the same weekday, of every month.

If a start date is not given, then today's date is used. Exactly one of the
`-c/--count` or `-u/--until` flags must be given.

By default, every date has the same day of the month as the start date. With
`-b weekday`, every date is instead the same weekday as the start date, at the
same position within its month (e.g., the first Thursday). Either way, months
without a matching date are skipped rather than moved to the end of the month.

USAGE:
    recur monthly [-b date|weekday] [-c <number> | -u <date>] [<start>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Print the 31st of the month, 5 times, starting on Jan 31, 2024:

        $ recur monthly -c 5 2024-01-31
        January 2024
            2024-01-31 Wed
        March 2024
            2024-03-31 Sun
        May 2024
            2024-05-31 Fri
        July 2024
            2024-07-31 Wed
        August 2024
            2024-08-31 Sat

    %snip-start%

    Print the first Thursday of the month for the first half of 2024:

        $ recur monthly -b weekday -u 2024-06-30 2024-01-04
        January 2024
            2024-01-04 Thu
        February 2024
            2024-02-01 Thu
        March 2024
            2024-03-07 Thu
        April 2024
            2024-04-04 Thu
        May 2024
            2024-05-02 Thu
        June 2024
            2024-06-06 Thu

    %snip-end%
ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut by = flags::MonthlyBy::default();
    let mut termination = flags::Termination::default();
    let mut output = flags::Output::default();
    let mut start = positional::Start::default();
    args::configure(
        p,
        USAGE,
        &mut [&mut by, &mut termination, &mut output, &mut start],
    )?;
    let rule = Rule::Monthly(by.get());
    super::print(rule, start.get(), termination.limit()?, output)
}
