use std::{
    fmt::{Debug, Display, Write},
    str::FromStr,
    sync::LazyLock,
};

use {
    anyhow::Context,
    lexopt::{Arg, Parser, ValueExt},
    regex::Regex,
};

pub mod flags;
pub mod positional;

/// Something that claims some of a command's arguments.
///
/// Each command builds a handful of these and hands them to `configure`,
/// which offers every argument to each of them in turn until one accepts it.
pub trait Configurable: Debug {
    /// Returns true when `arg` was recognized (and, for flags that take a
    /// value, its value consumed from `p`).
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool>;

    /// Documentation for every argument and flag this parses.
    fn usage(&self) -> &[Usage] {
        &[]
    }
}

/// Parse every remaining argument in `p` into the given targets.
///
/// `usage` is the command's help text. It may contain `%args%` and `%flags%`
/// placeholders, along with a `%snip-start%`/`%snip-end%` section that only
/// appears in the long (`--help`) version.
pub fn configure(
    p: &mut Parser,
    usage: &str,
    targets: &mut [&mut dyn Configurable],
) -> anyhow::Result<()> {
    while let Some(arg) = p.next()? {
        match arg {
            Arg::Short('h') => return Err(help(usage, targets, false).into()),
            Arg::Long("help") => return Err(help(usage, targets, true).into()),
            Arg::Long("version") => return Err(Version.into()),
            _ => {}
        }
        // The argument borrows from `p` when it's a long flag, but targets
        // need `p` mutably to read flag values. So give the flag name its
        // own home first.
        let long: String;
        let mut arg = match arg {
            Arg::Long(name) => {
                long = name.to_string();
                Arg::Long(&long)
            }
            Arg::Short(c) => Arg::Short(c),
            Arg::Value(value) => Arg::Value(value),
        };
        let mut recognized = false;
        for target in targets.iter_mut() {
            if target.configure(p, &mut arg)? {
                recognized = true;
                break;
            }
        }
        if !recognized {
            return Err(arg.unexpected().into());
        }
    }
    Ok(())
}

/// Render the help output of a command for the given targets.
fn help(usage: &str, targets: &[&mut dyn Configurable], long: bool) -> Help {
    static SNIPPED: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?m)^\s*%snip-start%\p{any}*?%snip-end%\s*$").unwrap()
    });
    static SNIP_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?m)^\s*%snip-(start|end)%\s*$").unwrap()
    });

    let all = || targets.iter().flat_map(|t| t.usage().iter().copied());
    // Positional arguments stay in the order they are parsed in.
    let args: Vec<Usage> = all().filter(|u| !u.flag).collect();
    let mut flags: Vec<Usage> = [Help::USAGE, Version::USAGE]
        .into_iter()
        .chain(all().filter(|u| u.flag))
        .collect();
    flags.sort_by_key(|u| u.sort_key());

    let (usage, args, flags) = if long {
        let usage = SNIP_MARKERS.replace_all(usage, "");
        (usage, Usage::describe(&args), Usage::describe(&flags))
    } else {
        let usage = SNIPPED.replace_all(usage, "");
        (usage, Usage::table(&args), Usage::table(&flags))
    };
    let usage = usage.replace("%args%", &args).replace("%flags%", &flags);
    Help(usage.trim().to_string())
}

/// Parses the next argument as a sub-command name and returns it.
///
/// `-h/--help` and `--version` are handled here too, since they may be given
/// before any sub-command. When there are no arguments at all, the usage is
/// returned as an error.
pub fn next_as_command(usage: &str, p: &mut Parser) -> anyhow::Result<String> {
    let usage = usage.trim();
    let Some(arg) = p.next()? else { anyhow::bail!("{usage}") };
    match arg {
        Arg::Value(cmd) => Ok(cmd.string()?),
        Arg::Short('h') | Arg::Long("help") => {
            Err(Help(usage.to_string()).into())
        }
        Arg::Long("version") => Err(Version.into()),
        arg => Err(arg.unexpected().into()),
    }
}

/// Parses the value of the flag most recently returned by `p`.
///
/// Errors are prefixed with `flag_name`.
pub fn parse<T>(p: &mut Parser, flag_name: &'static str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: Display + Debug + Send + Sync + 'static,
{
    let value = p.value().context(flag_name)?;
    let value = value.string().context(flag_name)?;
    // `T::Err` might be an `anyhow::Error`, which doesn't implement
    // `std::error::Error`. So it can only be carried as a message.
    value.parse().map_err(|err| anyhow::Error::msg(err).context(flag_name))
}

/// Documentation for a single flag or positional argument.
#[derive(Clone, Copy, Debug)]
pub struct Usage {
    /// False for positional arguments.
    pub flag: bool,
    /// How the flag is written, e.g., `-c/--count <number>`.
    pub format: &'static str,
    /// A one line description, shown by `-h`.
    pub short: &'static str,
    /// The full description, shown by `--help`. Paragraphs are separated by
    /// blank lines and are re-wrapped when rendered.
    pub long: &'static str,
}

impl Usage {
    pub const fn flag(
        format: &'static str,
        short: &'static str,
        long: &'static str,
    ) -> Usage {
        Usage { flag: true, format, short, long }
    }

    pub const fn arg(
        format: &'static str,
        short: &'static str,
        long: &'static str,
    ) -> Usage {
        Usage { flag: false, format, short, long }
    }

    /// Flags are listed by their long name, ignoring any short name.
    fn sort_key(&self) -> &'static str {
        self.format.split_once('/').map_or(self.format, |(_, long)| long)
    }

    /// Renders each usage as a row of an aligned, two column table of
    /// formats and short descriptions.
    fn table(usages: &[Usage]) -> String {
        let width = usages.iter().map(|u| u.format.len()).max().unwrap_or(0);
        let mut out = String::new();
        for u in usages.iter() {
            let _ = writeln!(out, "    {:width$}  {}", u.format, u.short);
        }
        out
    }

    /// Renders each usage as its format followed by its long description,
    /// indented and wrapped beneath it.
    fn describe(usages: &[Usage]) -> String {
        let opts = textwrap::Options::new(79)
            .initial_indent("        ")
            .subsequent_indent("        ");
        let mut entries = vec![];
        for u in usages.iter() {
            let paragraphs: Vec<String> = u
                .long
                .trim()
                .split("\n\n")
                .map(|p| textwrap::fill(&p.replace('\n', " "), &opts))
                .collect();
            let body = paragraphs.join("\n\n");
            entries.push(format!("    {}\n{body}\n", u.format));
        }
        entries.join("\n")
    }
}

/// The rendered help output of a command.
///
/// This is returned as an error so that parsing stops immediately. `main`
/// finds it by downcasting and prints it to stdout with a success exit code.
#[derive(Debug)]
pub struct Help(String);

impl Help {
    const USAGE: Usage = Usage::flag(
        "-h/--help",
        "Print help (-h for a summary, --help for everything).",
        r#"
Print help (-h for a summary, --help for everything).

The short flag shows a one line description of each flag and leaves out some
examples. The long flag shows the complete documentation.
"#,
    );
}

impl std::fmt::Display for Help {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Help {}

/// A request to print the version of `recur`.
///
/// Like `Help`, this travels as an error and is printed to stdout by `main`.
#[derive(Debug)]
pub struct Version;

impl Version {
    const USAGE: Usage = Usage::flag(
        "--version",
        "Print the version of recur.",
        r#"
Print the version of recur.
"#,
    );
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let semver = option_env!("CARGO_PKG_VERSION").unwrap_or("N/A");
        match option_env!("RECUR_BUILD_GIT_HASH") {
            None => write!(f, "recur {semver}"),
            Some(hash) => write!(f, "recur {semver} (rev {hash})"),
        }
    }
}

impl std::error::Error for Version {}
