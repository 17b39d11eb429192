//! Verb-to-handler dispatch table.
//!
//! The router is filled once at startup and only read afterwards, so it can
//! be shared behind an `Arc` by any number of request tasks. Verbs are
//! case-insensitive: they are lowercased both on registration and on
//! lookup.
//!
//! Failures are values. A handler reports bad input by returning a
//! [`CommandResult`] with an [`ErrorCode`]; a handler that panics anyway is
//! contained here and turned into an [`ErrorCode::Internal`] failure.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::Serialize;
use starlane_types::CallerId;
use tracing::{debug, error};

/// Who a command is executed for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    /// The calling user or session.
    pub caller_id: CallerId,
}

impl Context {
    /// Context for the given caller.
    pub const fn new(caller_id: CallerId) -> Self {
        Self { caller_id }
    }
}

/// A parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// The verb selecting a handler.
    pub verb: String,
    /// Positional arguments after the verb.
    pub args: Vec<String>,
}

impl Command {
    /// Split `line` on whitespace into a lowercased verb and arguments.
    ///
    /// Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let verb = normalize_verb(tokens.next()?);
        let args = tokens.map(str::to_owned).collect();
        Some(Self { verb, args })
    }
}

/// Machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Wrong number of arguments.
    Usage,
    /// Malformed or non-positive count argument.
    BadCount,
    /// Malformed numeric argument.
    BadNumber,
    /// Malformed or out-of-range input value.
    BadInput,
    /// Location name lookup missed.
    UnknownSystem,
    /// Too few locations for the request.
    EmptyUniverse,
    /// Endpoints are unknown or not connected.
    NoRoute,
    /// No handler is registered for the verb.
    UnknownCommand,
    /// The command line was blank.
    EmptyCommand,
    /// The handler failed unexpectedly.
    Internal,
}

impl ErrorCode {
    /// The wire spelling of this code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usage => "usage",
            Self::BadCount => "bad_count",
            Self::BadNumber => "bad_number",
            Self::BadInput => "bad_input",
            Self::UnknownSystem => "unknown_system",
            Self::EmptyUniverse => "empty_universe",
            Self::NoRoute => "no_route",
            Self::UnknownCommand => "unknown_command",
            Self::EmptyCommand => "empty_command",
            Self::Internal => "internal",
        }
    }
}

impl core::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of executing a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub ok: bool,
    /// Human-readable output or error message.
    pub text: String,
    /// Failure category, empty on success.
    pub error_code: String,
    /// Optional structured rows (names, route legs).
    pub lines: Vec<String>,
}

impl CommandResult {
    /// A successful result with `text`.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            ok: true,
            text: text.into(),
            error_code: String::new(),
            lines: Vec::new(),
        }
    }

    /// A failed result.
    pub fn failure(code: ErrorCode, text: impl Into<String>) -> Self {
        Self {
            ok: false,
            text: text.into(),
            error_code: code.as_str().to_owned(),
            lines: Vec::new(),
        }
    }

    /// Attach structured rows.
    #[must_use]
    pub fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = lines;
        self
    }
}

/// Whether a verb only reads world state or may change it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Query only.
    #[default]
    Read,
    /// May mutate state.
    Write,
}

/// Something that can execute a command.
///
/// Any `Fn(&Context, &Command) -> CommandResult` closure that is
/// `Send + Sync` is a handler.
pub trait CommandHandler: Send + Sync {
    /// Execute `command` on behalf of `context`.
    fn handle(&self, context: &Context, command: &Command) -> CommandResult;
}

impl<F> CommandHandler for F
where
    F: Fn(&Context, &Command) -> CommandResult + Send + Sync,
{
    fn handle(&self, context: &Context, command: &Command) -> CommandResult {
        self(context, command)
    }
}

/// Errors that can occur when registering a handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// The verb is empty after normalization.
    #[error("verb must not be empty")]
    EmptyVerb,

    /// The verb already has a handler.
    #[error("verb already registered: {verb}")]
    DuplicateVerb {
        /// The normalized verb.
        verb: String,
    },
}

struct Entry {
    handler: Box<dyn CommandHandler>,
    access: Access,
}

/// Dispatch table from normalized verb to handler.
#[derive(Default)]
pub struct CommandRouter {
    handlers: HashMap<String, Entry>,
}

impl CommandRouter {
    /// An empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a [`Access::Read`] handler for `verb`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError`] if the verb is empty or taken.
    pub fn add<H>(&mut self, verb: &str, handler: H) -> Result<(), RegistrationError>
    where
        H: CommandHandler + 'static,
    {
        self.add_with_access(verb, handler, Access::Read)
    }

    /// Register a handler for `verb` with explicit access.
    ///
    /// The first registration of a verb wins; later ones are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError`] if the verb is empty or taken.
    pub fn add_with_access<H>(
        &mut self,
        verb: &str,
        handler: H,
        access: Access,
    ) -> Result<(), RegistrationError>
    where
        H: CommandHandler + 'static,
    {
        let verb = normalize_verb(verb.trim());
        if verb.is_empty() {
            return Err(RegistrationError::EmptyVerb);
        }
        if self.handlers.contains_key(&verb) {
            return Err(RegistrationError::DuplicateVerb { verb });
        }
        self.handlers.insert(
            verb,
            Entry {
                handler: Box::new(handler),
                access,
            },
        );
        Ok(())
    }

    /// Parse and execute one text line.
    pub fn execute_line(&self, context: &Context, line: &str) -> CommandResult {
        Command::parse(line).map_or_else(
            || CommandResult::failure(ErrorCode::EmptyCommand, "Empty command."),
            |command| self.execute(context, &command),
        )
    }

    /// Execute an already parsed command. The verb is normalized first.
    pub fn execute(&self, context: &Context, command: &Command) -> CommandResult {
        let verb = normalize_verb(&command.verb);
        let Some(entry) = self.handlers.get(&verb) else {
            debug!(verb = %verb, caller = %context.caller_id, "unknown command");
            return CommandResult::failure(
                ErrorCode::UnknownCommand,
                format!("Unknown command: {}", command.verb),
            );
        };

        let outcome = catch_unwind(AssertUnwindSafe(|| entry.handler.handle(context, command)));
        match outcome {
            Ok(result) => {
                debug!(
                    verb = %verb,
                    caller = %context.caller_id,
                    ok = result.ok,
                    error_code = %result.error_code,
                    "command executed"
                );
                result
            }
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_owned())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_default();
                error!(
                    verb = %verb,
                    caller = %context.caller_id,
                    panic = %message,
                    "command handler panicked"
                );
                CommandResult::failure(
                    ErrorCode::Internal,
                    format!("Internal error while executing {verb}."),
                )
            }
        }
    }

    /// Declared access of `verb`, if registered.
    pub fn access_for(&self, verb: &str) -> Option<Access> {
        self.handlers.get(&normalize_verb(verb)).map(|e| e.access)
    }

    /// All registered verbs, sorted.
    pub fn verbs(&self) -> Vec<&str> {
        let mut verbs: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        verbs.sort_unstable();
        verbs
    }
}

impl core::fmt::Debug for CommandRouter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommandRouter")
            .field("verbs", &self.verbs())
            .finish()
    }
}

fn normalize_verb(verb: &str) -> String {
    verb.to_lowercase()
}
