//! Interactive deskmate REPL.
//!
//! # Responsibility
//! - Read one line at a time and print the assistant's reply.
//! - Run the save confirmation before exiting.
//!
//! All command semantics live in `deskmate_core`; this binary only does I/O.

use anyhow::{Context, Result};
use clap::Parser;
use deskmate_core::session::{INVALID_ANSWER_REPLY, SAVE_PROMPT};
use deskmate_core::{init_logging, Assistant, AssistantConfig, Reply, SaveAnswer};
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "deskmate")]
#[command(about = "Contacts and notes assistant driven by free-text commands", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the contact and note snapshots
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(cli)?;

    init_logging(&config.log_level, &config.log_dir)
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;
    info!(
        "event=cli_start module=cli status=ok core_version={}",
        deskmate_core::core_version()
    );

    let mut assistant = Assistant::open(&config).with_context(|| {
        format!("failed to open snapshots in `{}`", config.data_dir.display())
    })?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut assistant, &mut stdin.lock(), &mut stdout.lock())
}

fn resolve_config(cli: Cli) -> Result<AssistantConfig> {
    let mut config = AssistantConfig::from_env();
    if let Some(data_dir) = cli.data_dir {
        let log_follows_data = config.log_dir == config.data_dir.join("logs");
        config.data_dir = data_dir;
        if log_follows_data {
            config.log_dir = config.data_dir.join("logs");
        }
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = log_dir;
    }
    config.log_dir = absolute(&config.log_dir)?;
    Ok(config)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()
        .context("failed to resolve current directory")?
        .join(path))
}

fn run(assistant: &mut Assistant, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Welcome to deskmate. Type 'help' to see available commands.")?;

    loop {
        let Some(line) = prompt(input, out, ">>> ")? else {
            break;
        };
        match assistant.handle_line(&line) {
            Reply::Exit => break,
            reply => writeln!(out, "{reply}")?,
        }
    }

    loop {
        let answer = ask_save(input, out)?;
        match assistant.close(answer) {
            Ok(farewell) => {
                writeln!(out, "{farewell}")?;
                return Ok(());
            }
            Err(err) => {
                warn!("event=session_close module=cli status=error error_kind=save");
                writeln!(out, "Failed to save your data: {err}")?;
            }
        }
    }
}

/// Asks the save question until it gets `y` or `n`; end of input means `n`.
fn ask_save(input: &mut impl BufRead, out: &mut impl Write) -> Result<SaveAnswer> {
    loop {
        let Some(line) = prompt(input, out, &format!("{SAVE_PROMPT} "))? else {
            return Ok(SaveAnswer::Discard);
        };
        match SaveAnswer::parse(&line) {
            Some(answer) => return Ok(answer),
            None => writeln!(out, "{INVALID_ANSWER_REPLY}")?,
        }
    }
}

/// Prints `label` and reads one line; `None` on end of input.
fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::run;
    use deskmate_core::session::{FAREWELL, SAVE_PROMPT};
    use deskmate_core::{Assistant, SnapshotPaths, Workspace};
    use std::io::Cursor;

    fn transcript(assistant: &mut Assistant, input: &str) -> String {
        let mut out = Vec::new();
        run(assistant, &mut Cursor::new(input.as_bytes()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn failed_save_asks_again_before_exiting() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();
        let mut assistant = Assistant::new(Workspace::new(SnapshotPaths::in_dir(&blocker)));

        let output = transcript(
            &mut assistant,
            "add contact ann 380501112233\nexit\ny\nn\n",
        );

        assert!(output.contains("Failed to save your data"));
        assert_eq!(output.matches(SAVE_PROMPT).count(), 2);
        assert!(output.trim_end().ends_with(FAREWELL));
        assert!(assistant.workspace().contacts.contains("ann"));
    }

    #[test]
    fn end_of_input_discards_after_invalid_answer() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SnapshotPaths::in_dir(dir.path());
        let mut assistant = Assistant::new(Workspace::new(paths.clone()));

        let output = transcript(&mut assistant, "hello\nbye\nmaybe\n");

        assert!(output.contains("How can I help you?"));
        assert!(output.contains("Incorrect input! Try again please."));
        assert!(output.trim_end().ends_with(FAREWELL));
        assert!(!paths.contacts.exists());
    }
}
