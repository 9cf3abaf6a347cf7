use std::io::Write;

use anyhow::Context;

use crate::{
    args::{self, Usage},
    datetime::Reference,
    parse::OsStrExt,
    rule::{RecurrenceRule, next::Occurrences},
};

const USAGE: &'static str = r#"
Print a sequence of occurrences of a recurrence rule.

Occurrences are generated in chronological order, each one computed from the
one before it, starting after the given date. If a starting date is not given,
then today is used.

The sequence stops at the rule's end date. Rules without an end date go on
until the maximum supported date is reached, so in that case, use
`-c/--count` (or a program like `head`) to limit the output.

USAGE:
    recur seq <rule> [<start>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Print the next three paydays:

        $ recur seq -c 3 'every last day' 2025-12-31
        2026-01-31
        2026-02-28
        2026-03-31

    %snip-start%

    Print every remaining occurrence of a rule with an end date:

        $ recur seq 'every 2 weeks on Mon, Fri at 14:00 until Feb 10, 2026' 2026-01-14
        2026-01-16T14:00
        2026-01-26T14:00
        2026-01-30T14:00
        2026-02-09T14:00

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    args::configure(p, USAGE, &mut [&mut config])?;

    let rule = config.rule()?;
    let start = config.start.unwrap_or_else(Reference::today);
    let mut wtr = std::io::stdout().lock();
    let occurrences = Occurrences::new(rule.clone(), start.get());
    for dt in occurrences.take(config.count.unwrap_or(usize::MAX)) {
        writeln!(wtr, "{}", start.occurrence(rule, dt))?;
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    rule: Option<RecurrenceRule>,
    start: Option<Reference>,
    count: Option<usize>,
}

impl Config {
    fn rule(&self) -> anyhow::Result<&RecurrenceRule> {
        self.rule.as_ref().context("missing required <rule>")
    }
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        use lexopt::Arg::*;

        match *arg {
            Value(ref v) => {
                if self.rule.is_none() {
                    self.rule = Some(v.parse().context("invalid <rule>")?);
                    return Ok(true);
                }
                if self.start.is_none() {
                    self.start = Some(v.parse().context("invalid <start>")?);
                    return Ok(true);
                }
                return Ok(false);
            }
            Short('c') | Long("count") => {
                self.count = Some(args::parse(p, "-c/--count")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const COUNT: Usage = Usage::flag(
            "-c, --count <number>",
            "Print at most this many occurrences.",
            r#"
Print at most this many occurrences.

When absent, occurrences are printed until the rule's end date, or until the
maximum supported date is reached.
"#,
        );
        &[RecurrenceRule::ARG, Reference::ARG_START, COUNT]
    }
}
