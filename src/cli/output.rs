//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{LemmatizerArgs, OutputFormat};
use crate::error::Result;

/// Result structure for a single-word lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct LemmaResult {
    pub word: String,
    pub pos: Option<String>,
    pub lemma: String,
    pub morphology: String,
}

/// Result structure for a lemmatized message stream.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LemmatizeSummary {
    pub messages: usize,
    pub tokens: usize,
    pub invalid_lines: usize,
    pub mode: String,
    pub duration_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &LemmatizerArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &LemmatizerArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
    }

    let value = serde_json::to_value(result)?;
    if let Some(obj) = value.as_object() {
        for (key, value) in obj {
            match value {
                serde_json::Value::String(s) => println!("{key}: {s}"),
                serde_json::Value::Null => println!("{key}: -"),
                other => println!("{key}: {other}"),
            }
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &LemmatizerArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}
