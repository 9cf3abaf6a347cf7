use crate::{
    args::{self, Usage, flags, positional},
    rule::{InvalidRecurrence, InvalidRecurrenceKind, RecurrenceRule},
};

const USAGE: &'static str = r#"
Parse recurrence phrases into rules.

This accepts one or more phrases to parse as positional arguments. When no
positional arguments are given, then line delimited phrases are read from
stdin.

By default, each rule is printed as its canonical phrase. Use `-f json` to
print the fields of each rule instead, which is suitable for storing next to
a task.

USAGE:
    recur parse <rule>...
    recur parse < line delimited <rule>

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Normalize a phrase:

        $ recur parse 'every Fri, Mon at 2pm'
        every week on Mon, Fri at 14:00

    %snip-start%

    Print a rule that repeats from the completion date as JSON:

        $ recur parse -f json 'every! 3 days'
        {"originalText":"every! 3 days","type":"relative","interval":"day","count":3,"days":[],"dayOfMonth":null,"monthOfYear":null,"time":null,"endDate":null}

    Parse many phrases from stdin, skipping the ones that don't parse:

        $ printf 'daily\nsometimes\nevery last day\n' | recur parse -i
        every day
        every month on the last day

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    let mut rules = positional::Rules::default();
    args::configure(p, USAGE, &mut [&mut config, &mut rules])?;

    let mut wtr = std::io::stdout().lock();
    rules.try_map(|raw, rule| {
        let rule = match rule {
            Ok(rule) => rule,
            Err(err) => {
                if !config.ignore_invalid {
                    return Err(err);
                }
                let empty = err
                    .downcast_ref::<InvalidRecurrence>()
                    .map_or(false, |err| {
                        *err.kind() == InvalidRecurrenceKind::Empty
                    });
                if empty {
                    log::debug!("skipping empty phrase");
                } else {
                    log::warn!("skipping `{raw}`: {err:#}");
                }
                return Ok(true);
            }
        };
        config.format.write(&mut wtr, &rule)?;
        Ok(true)
    })?;
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    format: flags::Format,
    ignore_invalid: bool,
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            lexopt::Arg::Short('f') | lexopt::Arg::Long("format") => {
                self.format = args::parse(p, "-f/--format")?;
            }
            lexopt::Arg::Short('i') | lexopt::Arg::Long("ignore-invalid") => {
                self.ignore_invalid = true;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const IGNORE_INVALID: Usage = Usage::flag(
            "-i/--ignore-invalid",
            "Ignore phrases that don't parse.",
            r#"
Ignore phrases that don't parse.

When enabled, these phrases are dropped and parsing continues to the next
input. To see error messages, enable logging with `RECUR_LOG=warn`. When
disabled, if parsing fails, then execution stops and an error is printed.
"#,
        );
        &[RecurrenceRule::ARG_OR_STDIN, flags::Format::USAGE, IGNORE_INVALID]
    }
}
