/*!
Command line plumbing shared by every `recur` command.

A command hands its arguments to a list of `Configurable` targets, each of
which claims the flags and positional values it understands. `-h`, `--help`
and `--version` are answered here for every command.

A command's usage text may contain `%args%` and `%flags%`, which are replaced
by the docs of its targets. Text between `%snip-start%` and `%snip-end%` is
only shown by `--help`.
*/

use std::{fmt::Debug, sync::LazyLock};

use {
    anyhow::Context,
    lexopt::{Arg, Parser, ValueExt},
    regex::Regex,
};

use crate::parse::{FromBytes, OsStrExt};

pub mod flags;
pub mod positional;

/// Something that consumes some of a command's arguments.
pub trait Configurable: Debug {
    /// Offers `arg` to this target. Returns false when it isn't claimed.
    ///
    /// A flag that takes a value reads it from `p`.
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool>;

    /// Docs for every flag and argument this target claims.
    fn usage(&self) -> &[Usage] {
        &[]
    }
}

/// Offers every remaining argument in `p` to `targets`, in order, until one
/// of them claims it.
///
/// An argument that no target claims is an error.
pub fn configure(
    p: &mut Parser,
    usage: &str,
    targets: &mut [&mut dyn Configurable],
) -> anyhow::Result<()> {
    while let Some(arg) = p.next()? {
        // A long flag name borrows from `p`, which the targets need to read
        // flag values. So it gets copied out first.
        let long;
        let mut arg = match arg {
            Arg::Short('h') => {
                return Err(Help::new(usage, targets, false).into());
            }
            Arg::Long("help") => {
                return Err(Help::new(usage, targets, true).into());
            }
            Arg::Long("version") => return Err(Version.into()),
            Arg::Long(name) => {
                long = name.to_string();
                Arg::Long(&long)
            }
            Arg::Short(c) => Arg::Short(c),
            Arg::Value(value) => Arg::Value(value),
        };
        let mut claimed = false;
        for target in targets.iter_mut() {
            if target.configure(p, &mut arg)? {
                claimed = true;
                break;
            }
        }
        if !claimed {
            return Err(arg.unexpected().into());
        }
    }
    Ok(())
}

/// Reads the name of a sub-command.
///
/// With nothing left to read, the usage text is returned as an error.
pub fn next_as_command(usage: &str, p: &mut Parser) -> anyhow::Result<String> {
    let usage = usage.trim();
    match p.next()? {
        None => anyhow::bail!("{usage}"),
        Some(Arg::Value(name)) => Ok(name.string()?),
        Some(Arg::Short('h') | Arg::Long("help")) => {
            Err(Help(usage.to_string()).into())
        }
        Some(Arg::Long("version")) => Err(Version.into()),
        Some(arg) => Err(arg.unexpected().into()),
    }
}

/// Reads and parses the value of `flag`.
///
/// Errors are prefixed with the flag's name, e.g., `-c/--count`.
pub fn parse<T>(p: &mut Parser, flag: &'static str) -> anyhow::Result<T>
where
    T: FromBytes<Err = anyhow::Error>,
{
    let value = p.value().context(flag)?;
    OsStrExt::parse(&value).context(flag)
}

/// The docs for a single flag or positional argument.
#[derive(Clone, Copy, Debug)]
pub struct Usage {
    /// False for a positional argument.
    pub flag: bool,
    /// How it's written, e.g., `-c, --count <number>`.
    pub format: &'static str,
    /// One line shown by `-h`.
    pub short: &'static str,
    /// Paragraphs shown by `--help`.
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

    /// The long name of a flag, used to order flags in help output.
    fn name(&self) -> &'static str {
        self.format.split_once(", ").map_or(self.format, |(_, long)| long)
    }

    /// Renders a section of help output. The short form is one aligned line
    /// per usage. The long form wraps every paragraph under its format.
    fn render(usages: &[Usage], long: bool) -> String {
        if !long {
            let width = usages.iter().map(|u| u.format.len()).max();
            let width = width.unwrap_or(0);
            return usages
                .iter()
                .map(|u| format!("    {:width$}  {}\n", u.format, u.short))
                .collect();
        }

        let indent = " ".repeat(8);
        let wrap = textwrap::Options::new(79)
            .initial_indent(&indent)
            .subsequent_indent(&indent);
        let sections: Vec<String> = usages
            .iter()
            .map(|u| {
                let body: Vec<String> = u
                    .long
                    .trim()
                    .split("\n\n")
                    .map(|para| para.replace('\n', " "))
                    .map(|para| textwrap::fill(&para, &wrap))
                    .collect();
                format!("    {}\n{}\n", u.format, body.join("\n\n"))
            })
            .collect();
        sections.join("\n")
    }
}

/// The output of `-h` or `--help`.
///
/// This travels up to `main` as an error, which prints it to stdout and
/// exits successfully.
#[derive(Debug)]
pub struct Help(String);

impl Help {
    const USAGE: Usage = Usage::flag(
        "-h, --help",
        "Print help. Use --help for more detail.",
        r#"
Print help.

`-h` prints a short summary with one line for each flag and argument.
`--help` prints every detail, including more examples.
"#,
    );

    fn new(usage: &str, targets: &[&mut dyn Configurable], long: bool) -> Help {
        static SNIP: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"(?ms)^[ \t]*%snip-start%\n+(.*?)^[ \t]*%snip-end%\n")
                .unwrap()
        });

        let (args, mut flags): (Vec<Usage>, Vec<Usage>) = targets
            .iter()
            .flat_map(|t| t.usage().iter().copied())
            .chain([Help::USAGE, Version::USAGE])
            .partition(|u| !u.flag);
        // Positional arguments keep the order they're given in.
        flags.sort_by_key(|u| u.name());

        let usage = SNIP.replace_all(usage, if long { "${1}" } else { "" });
        let usage = usage
            .replace("%args%", &Usage::render(&args, long))
            .replace("%flags%", &Usage::render(&flags, long));
        Help(usage.trim().to_string())
    }
}

impl std::fmt::Display for Help {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Help {}

/// The output of `--version`. Like `Help`, this is printed by `main`.
#[derive(Debug)]
pub struct Version;

impl Version {
    const USAGE: Usage = Usage::flag(
        "--version",
        "Print the version of recur.",
        r#"
Print the version of recur.

When recur was built from a git checkout, the revision is printed too.
"#,
    );
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let semver = option_env!("CARGO_PKG_VERSION").unwrap_or("N/A");
        write!(f, "recur {semver}")?;
        if let Some(hash) = option_env!("RECUR_BUILD_GIT_HASH") {
            write!(f, " (rev {hash})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Version {}
