use {
    anyhow::Context,
    bstr::{BStr, BString, ByteSlice, ByteVec},
};

use crate::{
    args::Configurable,
    datetime::Reference,
    parse::{BufReadExt, BytesExt, Line},
    rule::RecurrenceRule,
};

/// The CLI parsing configuration for reading recurrence phrases.
///
/// This will greedily consume all remaining positional arguments as phrases.
///
/// When there are no positional arguments to consume, then this will read
/// phrases from `stdin` in a line delimited fashion. Blank lines are skipped.
#[derive(Clone, Debug, Default)]
pub struct Rules(Arguments);

impl Rules {
    /// Run the given function over each rule read from the CLI.
    ///
    /// The closure is given the raw argument along with the result of parsing
    /// it, so that callers can decide what to do with invalid rules.
    ///
    /// Iteration stops when the closure returns false or returns an error.
    pub fn try_map(
        self,
        mut f: impl FnMut(
            &BStr,
            anyhow::Result<RecurrenceRule>,
        ) -> anyhow::Result<bool>,
    ) -> anyhow::Result<()> {
        self.0.try_map(|arg| {
            if arg.is_blank() {
                return Ok(true);
            }
            f(arg.raw(), arg.to_rule())
        })
    }
}

impl Configurable for Rules {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        self.0.configure(p, arg)
    }
}

/// The CLI parsing configuration for reading reference dates.
///
/// This will greedily consume all remaining positional arguments as dates.
///
/// When there are no positional arguments to consume, then this will read
/// dates from `stdin` in a line delimited fashion. Blank lines are skipped.
#[derive(Clone, Debug, Default)]
pub struct References(Arguments);

impl References {
    /// Run the given function over each date read from the CLI.
    ///
    /// Iteration stops when the closure returns false or returns an error.
    pub fn try_map(
        self,
        mut f: impl FnMut(Reference) -> anyhow::Result<bool>,
    ) -> anyhow::Result<()> {
        self.0.try_map(|arg| {
            if arg.is_blank() {
                return Ok(true);
            }
            f(arg.to_reference()?)
        })
    }
}

impl Configurable for References {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        self.0.configure(p, arg)
    }
}

/// The parsing configuration for reading arguments either as positional
/// arguments on the CLI, or as line-delimited data on `stdin`.
///
/// This will greedily consume all remaining positional arguments. That is,
/// this is generally intended for use cases where a variable number of
/// arguments can be given.
///
/// When there are _zero_ positional arguments, then this will read lines from
/// stdin instead.
#[derive(Clone, Debug, Default)]
pub struct Arguments {
    positional: Vec<BString>,
}

impl Arguments {
    /// Run the given function over each argument read from the CLI.
    ///
    /// If there were no positional arguments, then this tries to read them
    /// from stdin, one per line. Stated differently, the argument given
    /// to the closure is either always `Positional` or always `StdinLine`.
    /// You can never get a mix.
    ///
    /// Iteration stops when the closure returns false or returns an error.
    pub fn try_map(
        self,
        mut f: impl FnMut(Argument<'_>) -> anyhow::Result<bool>,
    ) -> anyhow::Result<()> {
        if !self.positional.is_empty() {
            for arg in self.positional {
                if !f(Argument::Positional(arg))? {
                    return Ok(());
                }
            }
            return Ok(());
        }
        std::io::stdin().lock().for_byte_line(|line| {
            f(Argument::StdinLine(line))
                .with_context(|| format!("line {} of <stdin>", line.number()))
        })
    }
}

impl Configurable for Arguments {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            lexopt::Arg::Value(ref mut v) => {
                let v = std::mem::take(v);
                let bytes = Vec::from_os_string(v).map_err(|arg| {
                    anyhow::anyhow!(
                        "recur requires that positional arguments \
                         be valid UTF-8 in non-Unix environments, \
                         but `{arg:?}` is not valid UTF-8",
                    )
                })?;
                self.positional.push(BString::from(bytes));
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// A generic argument parsed from either positional args on the CLI, or
/// as a single line from stdin.
#[derive(Clone, Debug)]
pub enum Argument<'a> {
    /// Just arbitrary bytes.
    ///
    /// On Windows, we require that this is valid UTF-8.
    Positional(BString),
    /// A line containing arbitrary ASCII compatible bytes.
    StdinLine(Line<'a>),
}

impl<'a> Argument<'a> {
    /// Parse this argument into a recurrence rule.
    pub fn to_rule(&self) -> anyhow::Result<RecurrenceRule> {
        self.raw().parse::<RecurrenceRule>().context("invalid recurrence rule")
    }

    /// Parse this argument into a reference date.
    pub fn to_reference(&self) -> anyhow::Result<Reference> {
        self.raw().parse::<Reference>().context("invalid date")
    }

    /// Return the raw argument value.
    pub fn raw(&self) -> &BStr {
        match *self {
            Argument::Positional(ref arg) => arg.as_bstr(),
            Argument::StdinLine(line) => line.content(),
        }
    }

    /// Returns true when this is a line from stdin without any content.
    ///
    /// Positional arguments are never considered blank, since the end user
    /// asked for them explicitly.
    fn is_blank(&self) -> bool {
        match *self {
            Argument::Positional(_) => false,
            Argument::StdinLine(line) => line.is_blank(),
        }
    }
}
