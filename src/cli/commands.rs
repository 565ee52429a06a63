//! Command implementations for the crowd lemmatizer CLI.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Lines, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;

use crate::analysis::message::Message;
use crate::analysis::morphology::{DictionaryMorphology, EnglishMorphology, Morphology};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{LemmatizeError, Result};
use crate::plugin::{LemmatizerConfig, LemmatizerPlugin, MessageOperator, SingleablePlugin};

/// Execute a CLI command.
pub fn execute_command(args: LemmatizerArgs) -> Result<()> {
    match &args.command {
        Command::Lemmatize(lemmatize_args) => lemmatize_messages(lemmatize_args.clone(), &args),
        Command::Lemma(lemma_args) => lemmatize_word(lemma_args.clone(), &args),
    }
}

/// Build the plugin, loading the dictionary lazily on first use.
pub fn build_plugin(dictionary: Option<PathBuf>) -> LemmatizerPlugin {
    match dictionary {
        Some(path) => LemmatizerPlugin::with_factory(move || {
            let dictionary = DictionaryMorphology::from_path(&path)?
                .with_fallback(Arc::new(EnglishMorphology::new()));
            Ok(Arc::new(dictionary) as Arc<dyn Morphology>)
        }),
        None => LemmatizerPlugin::new(),
    }
}

/// Resolve the plugin configuration from inline JSON or a file.
pub fn load_config(inline: Option<&str>, file: Option<&Path>) -> Result<Option<LemmatizerConfig>> {
    if let Some(path) = file {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        return LemmatizerConfig::from_json_str(&json).map(Some);
    }
    inline.map(LemmatizerConfig::from_json_str).transpose()
}

/// Lazy reader of JSON-lines messages.
///
/// Blank lines are ignored and lines that are not valid messages are
/// counted and skipped. Iteration ends at the first I/O error, which
/// [`MessageReader::finish`] reports.
pub struct MessageReader<R> {
    lines: Lines<R>,
    line_num: usize,
    invalid: usize,
    error: Option<io::Error>,
}

impl<R: BufRead> MessageReader<R> {
    /// Create a reader over JSON-lines input.
    pub fn new(reader: R) -> Self {
        MessageReader {
            lines: reader.lines(),
            line_num: 0,
            invalid: 0,
            error: None,
        }
    }

    /// Number of invalid lines seen so far.
    pub fn invalid_lines(&self) -> usize {
        self.invalid
    }

    /// Consume the reader, returning the invalid line count or the I/O
    /// error that stopped iteration.
    pub fn finish(self) -> Result<usize> {
        match self.error {
            Some(e) => Err(e.into()),
            None => Ok(self.invalid),
        }
    }
}

impl<R: BufRead> Iterator for MessageReader<R> {
    type Item = Message;

    fn next(&mut self) -> Option<Message> {
        if self.error.is_some() {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.error = Some(e);
                    return None;
                }
            };
            self.line_num += 1;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Message>(&line) {
                Ok(message) => return Some(message),
                Err(e) => {
                    log::warn!("Skipping invalid message on line {}: {}", self.line_num, e);
                    self.invalid += 1;
                }
            }
        }
    }
}

/// Parse all JSON-lines messages up front.
///
/// Returns the parsed messages and the number of lines that were not valid
/// messages.
pub fn read_messages<R: BufRead>(reader: R) -> Result<(Vec<Message>, usize)> {
    let mut reader = MessageReader::new(reader);
    let messages = reader.by_ref().collect();
    let invalid = reader.finish()?;
    Ok((messages, invalid))
}

/// Write one message as a single JSON line.
pub fn write_message<W: Write>(writer: &mut W, message: &Message) -> Result<()> {
    serde_json::to_writer(&mut *writer, message)?;
    writeln!(writer)?;
    Ok(())
}

/// Write messages as JSON lines.
pub fn write_messages<W: Write>(writer: &mut W, messages: &[Message]) -> Result<()> {
    for message in messages {
        write_message(writer, message)?;
    }
    writer.flush()?;
    Ok(())
}

/// Lemmatize a message stream.
///
/// Sequential runs stream each message from input to output. `--parallel`
/// buffers the input so rayon can split it.
fn lemmatize_messages(args: LemmatizeArgs, cli_args: &LemmatizerArgs) -> Result<()> {
    let start_time = Instant::now();

    let config = load_config(args.config.as_deref(), args.config_file.as_deref())?;
    let plugin = build_plugin(args.dictionary.clone());
    let operator = plugin.operator(config);

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            log::info!("Reading messages from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("failed to open input {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };
    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut summary = LemmatizeSummary {
        mode: operator.mode().to_string(),
        ..Default::default()
    };

    if args.parallel {
        let (messages, invalid_lines) = read_messages(input)?;
        let messages = operator.call_batch(messages)?;
        write_messages(&mut writer, &messages)?;
        summary.messages = messages.len();
        summary.tokens = messages.iter().map(Message::token_count).sum();
        summary.invalid_lines = invalid_lines;
    } else {
        let mut reader = MessageReader::new(input);
        for message in operator.call_stream(reader.by_ref()) {
            let message = message?;
            summary.messages += 1;
            summary.tokens += message.token_count();
            write_message(&mut writer, &message)?;
        }
        summary.invalid_lines = reader.finish()?;
    }
    writer.flush()?;

    summary.duration_ms = start_time.elapsed().as_millis() as u64;
    log::info!(
        "Lemmatized {} messages ({} tokens, {} invalid lines) in {} ms using mode '{}'",
        summary.messages,
        summary.tokens,
        summary.invalid_lines,
        summary.duration_ms,
        summary.mode
    );

    // Keep stdout clean for the message stream.
    if args.output.is_some() && cli_args.verbosity() > 0 {
        output_result("Lemmatization finished", &summary, cli_args)?;
    }

    Ok(())
}

/// Lemmatize a single word.
fn lemmatize_word(args: LemmaArgs, cli_args: &LemmatizerArgs) -> Result<()> {
    if args.word.trim().is_empty() {
        return Err(LemmatizeError::invalid_argument("word must not be empty"));
    }

    let plugin = build_plugin(args.dictionary.clone());
    let morphology = plugin.morphology()?;
    let lemma = morphology.lemma(&args.word, args.pos.as_deref())?;

    if cli_args.output_format == OutputFormat::Human && cli_args.verbosity() <= 1 {
        println!("{lemma}");
        return Ok(());
    }

    output_result(
        "Lemma computed",
        &LemmaResult {
            word: args.word,
            pos: args.pos,
            lemma,
            morphology: morphology.name().to_string(),
        },
        cli_args,
    )
}
