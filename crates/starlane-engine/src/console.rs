//! Line-oriented command console.
//!
//! Reads one command per line, executes it through the router for a fixed
//! caller, and writes either the result text or the result as one line of
//! JSON. The loop ends when the line channel closes.
//!
//! Stdin is read on a plain OS thread that forwards lines over a channel.
//! A blocking read left pending there never holds up runtime shutdown.

use std::io::BufRead;

use starlane_commands::{CommandResult, CommandRouter, Context};
use starlane_core::config::OutputFormat;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::EngineError;

/// Lines buffered between the stdin thread and the console.
const LINE_BUFFER: usize = 16;

/// Spawn the stdin reader thread.
///
/// The thread stops at end of input, on a read error (which it forwards),
/// or once the receiver is dropped.
///
/// # Errors
///
/// Returns [`EngineError::Io`] if the thread cannot be spawned.
pub fn spawn_stdin_reader() -> Result<mpsc::Receiver<std::io::Result<String>>, EngineError> {
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    std::thread::Builder::new()
        .name("stdin-reader".to_owned())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
        })?;
    Ok(rx)
}

/// Execute every line received on `input` and write the results to
/// `output`.
///
/// Returns the number of lines executed.
///
/// # Errors
///
/// Returns [`EngineError::Io`] if reading or writing fails and
/// [`EngineError::Json`] if a result cannot be encoded.
pub async fn run_console<W>(
    router: &CommandRouter,
    context: &Context,
    format: OutputFormat,
    mut input: mpsc::Receiver<std::io::Result<String>>,
    mut output: W,
) -> Result<u64, EngineError>
where
    W: AsyncWrite + Unpin,
{
    let mut executed: u64 = 0;

    while let Some(line) = input.recv().await {
        let line = line?;
        let result = router.execute_line(context, &line);
        debug!(ok = result.ok, error_code = %result.error_code, "console command");
        output.write_all(render(&result, format)?.as_bytes()).await?;
        output.flush().await?;
        executed = executed.saturating_add(1);
    }

    Ok(executed)
}

/// Format one result for the console.
fn render(result: &CommandResult, format: OutputFormat) -> Result<String, EngineError> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string(result)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => {
            let mut text = result.text.clone();
            if !text.ends_with('\n') {
                text.push('\n');
            }
            Ok(text)
        }
    }
}
