use std::io::Write;

use anyhow::Context;

use crate::{
    args::{self, Usage},
    datetime::Reference,
    parse::OsStrExt,
    rule::{RecurrenceRule, RecurrenceType, next},
};

const USAGE: &'static str = r#"
Print the next occurrence of a recurrence rule.

Rules normally repeat from the date a task was due. In that case, the next
occurrence is computed from the `<due>` date. Rules written with `every!`
repeat from the date a task was completed instead. In that case, the next
occurrence is computed from the `--completed` date, when it's given.

When the next occurrence falls after the rule's end date, nothing is printed.

USAGE:
    recur next <rule> [<due>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Find the next due date of a task due on a Wednesday:

        $ recur next 'every Mon, Wed' 2026-01-14
        2026-01-19

    %snip-start%

    Find the next due date of a task that was completed late, where the rule
    repeats from the completion date:

        $ recur next --completed 2026-01-20 'every! 2 weeks' 2026-01-14
        2026-02-03

    Clamp to the end of a shorter month:

        $ recur next 'every month on the 31st' 2026-01-31
        2026-02-28

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
    let reference = config.reference(rule);
    let dt = next::calculate(rule, reference.get()).with_context(|| {
        format!("failed to find next occurrence of `{rule}` after {reference}")
    })?;
    let occurrence = reference.occurrence(rule, dt);
    if !next::should_create_next_instance(rule, occurrence.date()) {
        log::info!(
            "next occurrence {occurrence} of `{rule}` is after its end date",
        );
        return Ok(());
    }
    let mut wtr = std::io::stdout().lock();
    writeln!(wtr, "{occurrence}")?;
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    rule: Option<RecurrenceRule>,
    due: Option<Reference>,
    completed: Option<Reference>,
}

impl Config {
    fn rule(&self) -> anyhow::Result<&RecurrenceRule> {
        self.rule.as_ref().context("missing required <rule>")
    }

    /// Picks the date the next occurrence is computed from.
    fn reference(&self, rule: &RecurrenceRule) -> Reference {
        let due = self.due.unwrap_or_else(Reference::today);
        match (rule.kind(), self.completed) {
            (RecurrenceType::Relative, Some(completed)) => completed,
            (RecurrenceType::Relative, None) => {
                log::debug!(
                    "`{rule}` repeats from the completion date, but no \
                     completion date was given, so using {due}",
                );
                due
            }
            (RecurrenceType::Absolute, _) => due,
        }
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
                if self.due.is_none() {
                    self.due = Some(v.parse().context("invalid <due>")?);
                    return Ok(true);
                }
                return Ok(false);
            }
            Long("completed") => {
                self.completed = Some(args::parse(p, "--completed")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[RecurrenceRule::ARG, Reference::ARG_DUE, Reference::COMPLETED_FLAG]
    }
}
