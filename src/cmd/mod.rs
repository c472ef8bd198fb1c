use std::io::Write;

use anyhow::Context;

use recur::{CalendarDate, RecurrenceLimit, Rule, Schedule};

use crate::{args::flags::Output, style::Theme};

mod daily;
mod monthly;
mod weekly;

const USAGE: &'static str = "\
Print the dates on which something recurs, grouped by month.

USAGE:
    recur <command> ...

COMMANDS:
    daily    Recur every day
    weekly   Recur on one or more days of every week
    monthly  Recur on the same day or weekday of every month
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "daily" => daily::run(p),
        "weekly" => weekly::run(p),
        "monthly" => monthly::run(p),
        unk => anyhow::bail!("unrecognized command '{}'", unk),
    }
}

/// Evaluates the given rule and prints the resulting schedule to stdout.
fn print(
    rule: Rule,
    start: CalendarDate,
    limit: RecurrenceLimit,
    output: Output,
) -> anyhow::Result<()> {
    let schedule = rule.schedule(start, limit).with_context(|| {
        format!("failed to compute {rule} recurrence starting at {start}")
    })?;
    log::debug!(
        "{rule} recurrence starting at {start} produced {} dates \
         over {} months",
        schedule.date_count(),
        schedule.len(),
    );
    let wtr = std::io::stdout().lock();
    match output {
        Output::Text => write_text(wtr, Theme::stdout(), &schedule),
        Output::Json => write_json(wtr, &schedule),
    }
}

/// Writes a heading for each month followed by its dates, one per line.
fn write_text<W: Write>(
    mut wtr: W,
    theme: &Theme,
    schedule: &Schedule,
) -> anyhow::Result<()> {
    for group in schedule {
        writeln!(wtr, "{}", theme.highlight(group.year_month()))?;
        for date in group.dates() {
            let weekday = theme.muted(date.weekday().abbreviation());
            writeln!(wtr, "    {date} {weekday}")?;
        }
    }
    Ok(())
}

/// Writes one JSON object per month, one per line.
fn write_json<W: Write>(
    mut wtr: W,
    schedule: &Schedule,
) -> anyhow::Result<()> {
    for group in schedule {
        serde_json::to_writer(&mut wtr, group)?;
        writeln!(wtr)?;
    }
    Ok(())
}
