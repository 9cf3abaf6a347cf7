mod check;
mod next;
mod parse;
mod seq;

const USAGE: &'static str = "\
A simple utility for parsing recurrence phrases and computing occurrences.

USAGE:
    recur <command> ...

COMMANDS:
    check  Check whether dates are within a rule's end date
    next   Print the next occurrence of a rule
    parse  Parse recurrence phrases into rules
    seq    Print a sequence of occurrences of a rule
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "check" => check::run(p),
        "next" => next::run(p),
        "parse" => parse::run(p),
        "seq" => seq::run(p),
        unk => anyhow::bail!("unrecognized command '{}'", unk),
    }
}
