use std::io::Write;

use anyhow::Context;

use crate::{
    args::{self, Usage, positional},
    datetime::Reference,
    parse::OsStrExt,
    rule::{RecurrenceRule, next},
    style::Theme,
};

const USAGE: &'static str = r#"
Check whether dates are on or before a rule's end date.

For each date given, this prints the date followed by `true` when another
occurrence on that date should still be created, and `false` otherwise. The
end date is inclusive. Rules without an end date always print `true`.

Dates can be given as positional arguments after the rule. When no dates are
given, then line delimited dates are read from stdin.

USAGE:
    recur check <rule> <date>...
    recur check <rule> < line delimited <date>

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Check dates around the end of a rule:

        $ recur check 'every day until 2026-12-31' 2026-12-31 2027-01-01
        2026-12-31 true
        2027-01-01 false

    %snip-start%

    End dates without a year apply within every year:

        $ recur check 'every week until June 15' 2026-06-15 2027-01-01 2027-07-01
        2026-06-15 true
        2027-01-01 true
        2027-07-01 false

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    let mut dates = positional::References::default();
    args::configure(p, USAGE, &mut [&mut config, &mut dates])?;

    let rule = config.rule()?;
    let theme = Theme::stdout();
    let mut wtr = std::io::stdout().lock();
    dates.try_map(|date| {
        let yes = next::should_create_next_instance(rule, date.date());
        writeln!(wtr, "{date} {}", theme.answer(yes))?;
        Ok(true)
    })?;
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    rule: Option<RecurrenceRule>,
}

impl Config {
    fn rule(&self) -> anyhow::Result<&RecurrenceRule> {
        self.rule.as_ref().context("missing required <rule>")
    }
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            // The first positional argument is the rule. Everything after
            // it is left for the dates.
            lexopt::Arg::Value(ref v) if self.rule.is_none() => {
                self.rule = Some(v.parse().context("invalid <rule>")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[RecurrenceRule::ARG, Reference::ARG_OR_STDIN]
    }
}
