use std::io::Write;

use {anyhow::Context, bstr::ByteSlice};

use crate::{args::Usage, parse::FromBytes, rule::RecurrenceRule};

/// Provides the output formats for a recurrence rule.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Format {
    /// Prints the rule's canonical phrase.
    #[default]
    Text,
    /// Prints the rule's fields as a single line of JSON.
    Json,
}

impl Format {
    pub const USAGE: Usage = Usage::flag(
        "-f, --format <kind>",
        "Print rules in this format.",
        r#"
Print rules in this format.

The legal values for this flag are `text` (default) and `json`.

The `text` format prints the canonical phrase for each rule, e.g., `every 2
weeks on Mon, Fri at 14:00`. The canonical phrase can always be parsed back
into the same rule.

The `json` format prints each rule as a single line JSON object with the
fields `originalText`, `type`, `interval`, `count`, `days`, `dayOfMonth`,
`monthOfYear`, `time` and `endDate`. This is suitable for storing a rule
alongside a task. Every command accepting a rule also accepts this format.
"#,
    );

    /// Writes the given rule in this format, followed by a line terminator.
    pub fn write<W: Write>(
        &self,
        mut wtr: W,
        rule: &RecurrenceRule,
    ) -> anyhow::Result<()> {
        match *self {
            Format::Text => writeln!(wtr, "{rule}")?,
            Format::Json => {
                serde_json::to_writer(&mut wtr, rule).with_context(|| {
                    format!("failed to write `{rule}` as JSON")
                })?;
                writeln!(wtr)?;
            }
        }
        Ok(())
    }
}

impl FromBytes for Format {
    type Err = anyhow::Error;

    fn from_bytes(s: &[u8]) -> anyhow::Result<Format> {
        let format = match s {
            b"text" => Format::Text,
            b"json" => Format::Json,
            unk => anyhow::bail!(
                "unrecognized format `{}` (must be `text` or `json`)",
                unk.as_bstr(),
            ),
        };
        Ok(format)
    }
}
