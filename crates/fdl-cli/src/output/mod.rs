use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};

pub mod table;

/// A command response with human-readable renderings next to its JSON form.
pub trait Report: Serialize {
    fn text(&self) -> String;

    fn markdown(&self) -> String {
        self.text()
    }
}

/// Render a response to a string in the requested format.
pub fn render<T: Report>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(value.text()),
        OutputFormat::Markdown => Ok(value.markdown()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response in the requested format. `--quiet` drops text output;
/// machine formats are always printed.
pub fn output<T: Report>(value: &T, flags: &GlobalFlags) -> anyhow::Result<()> {
    if flags.quiet && flags.format == OutputFormat::Text {
        return Ok(());
    }
    let rendered = render(value, flags.format)?;
    println!("{}", rendered.trim_end_matches('\n'));
    Ok(())
}
