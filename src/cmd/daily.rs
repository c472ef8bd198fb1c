use recur::Rule;

use crate::args::{self, flags, positional};

const USAGE: &'static str = r#"
Print every day starting at a given date.

If a start date is not given, then today's date is used. Exactly one of the
`-c/--count` or `-u/--until` flags must be given.

USAGE:
    recur daily [-c <number> | -u <date>] [<start>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Print the next 3 days, starting with today:

        $ recur daily -c 3
        July 2024
            2024-07-20 Sat
            2024-07-21 Sun
            2024-07-22 Mon

    %snip-start%

    Print every day from the end of February through the start of March in a
    leap year:

        $ recur daily -u 2024-03-01 2024-02-28
        February 2024
            2024-02-28 Wed
            2024-02-29 Thu
        March 2024
            2024-03-01 Fri

    %snip-end%
ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut termination = flags::Termination::default();
    let mut output = flags::Output::default();
    let mut start = positional::Start::default();
    args::configure(
        p,
        USAGE,
        &mut [&mut termination, &mut output, &mut start],
    )?;
    super::print(Rule::Daily, start.get(), termination.limit()?, output)
}
