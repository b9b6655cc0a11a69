//! Command-line parsing for the `crisp` binary.
//!
//! The first argument selects the command; the rest are its arguments.
//! Parsing never touches the network, so usage errors are reported before
//! any request is made.

use crate::config::REQUIRED_ENV_VARS;
use crate::error::{Error, Result};
use crate::types::ConversationFilter;
use crate::website::DEFAULT_PAGE_SIZE;

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrispCommand {
    /// List one page of conversations.
    List {
        /// Which conversations to ask for.
        filter: ConversationFilter,
        /// Page size.
        limit: u32,
    },

    /// Print the messages of a conversation.
    Read {
        /// Conversation to read.
        session_id: String,
    },

    /// Send an operator reply.
    Reply {
        /// Conversation to reply to.
        session_id: String,
        /// Reply text.
        message: String,
    },

    /// Mark a conversation as resolved.
    Resolve {
        /// Conversation to resolve.
        session_id: String,
    },

    /// Move a conversation back to pending.
    Reopen {
        /// Conversation to reopen.
        session_id: String,
    },

    /// Search conversations.
    Search {
        /// Free-text query.
        query: String,
    },

    /// Print the details of a conversation.
    Info {
        /// Conversation to inspect.
        session_id: String,
    },

    /// Display help information.
    Help,
}

impl CrispCommand {
    /// One-line usage string for the command.
    pub fn usage(&self) -> &'static str {
        match self {
            CrispCommand::List { .. } => LIST_USAGE,
            CrispCommand::Read { .. } => READ_USAGE,
            CrispCommand::Reply { .. } => REPLY_USAGE,
            CrispCommand::Resolve { .. } => RESOLVE_USAGE,
            CrispCommand::Reopen { .. } => REOPEN_USAGE,
            CrispCommand::Search { .. } => SEARCH_USAGE,
            CrispCommand::Info { .. } => INFO_USAGE,
            CrispCommand::Help => "Usage: crisp <command> [arguments]",
        }
    }
}

const LIST_USAGE: &str = "Usage: crisp list [--status pending|resolved|all] [--limit N]";
const READ_USAGE: &str = "Usage: crisp read <session_id>";
const REPLY_USAGE: &str = "Usage: crisp reply <session_id> \"message\"";
const RESOLVE_USAGE: &str = "Usage: crisp resolve <session_id>";
const REOPEN_USAGE: &str = "Usage: crisp reopen <session_id>";
const SEARCH_USAGE: &str = "Usage: crisp search \"query\"";
const INFO_USAGE: &str = "Usage: crisp info <session_id>";

/// Parses the command line (without the program name).
///
/// Unknown or absent commands parse as [`CrispCommand::Help`]. A missing
/// required argument is an [`Error::Usage`].
///
/// # Examples
///
/// ```
/// # use crisp_cli::commands::{parse_command, CrispCommand};
/// assert_eq!(
///     parse_command(&["read", "session_1"]).unwrap(),
///     CrispCommand::Read { session_id: "session_1".to_string() }
/// );
/// assert_eq!(parse_command::<&str>(&[]).unwrap(), CrispCommand::Help);
/// assert!(parse_command(&["read"]).is_err());
/// ```
pub fn parse_command<S: AsRef<str>>(args: &[S]) -> Result<CrispCommand> {
    let args: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();
    let (command, rest) = match args.split_first() {
        Some((command, rest)) => (*command, rest),
        None => return Ok(CrispCommand::Help),
    };

    let command = match command {
        "list" => parse_list(rest),
        "read" => CrispCommand::Read {
            session_id: session_id(rest, READ_USAGE)?,
        },
        "reply" => {
            let session_id = session_id(rest, REPLY_USAGE)?;
            let message = rest[1..].join(" ");
            if message.is_empty() {
                return Err(Error::usage(REPLY_USAGE));
            }
            CrispCommand::Reply {
                session_id,
                message,
            }
        }
        "resolve" => CrispCommand::Resolve {
            session_id: session_id(rest, RESOLVE_USAGE)?,
        },
        "reopen" => CrispCommand::Reopen {
            session_id: session_id(rest, REOPEN_USAGE)?,
        },
        "search" => {
            let query = rest.join(" ");
            if query.is_empty() {
                return Err(Error::usage(SEARCH_USAGE));
            }
            CrispCommand::Search { query }
        }
        "info" => CrispCommand::Info {
            session_id: session_id(rest, INFO_USAGE)?,
        },
        _ => CrispCommand::Help,
    };
    Ok(command)
}

/// The first argument, which must be a non-empty session id.
fn session_id(rest: &[&str], usage: &'static str) -> Result<String> {
    match rest.first() {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(Error::usage(usage)),
    }
}

/// `--status` and `--limit`, in any order. A flag without a value is ignored,
/// as are unrecognized arguments.
fn parse_list(rest: &[&str]) -> CrispCommand {
    let mut filter = ConversationFilter::All;
    let mut limit = DEFAULT_PAGE_SIZE;
    let mut i = 0;
    while i < rest.len() {
        let value = rest.get(i + 1).copied().filter(|v| !v.is_empty());
        match (rest[i], value) {
            ("--status", Some(status)) => {
                filter = ConversationFilter::from_status(status);
                i += 1;
            }
            ("--limit", Some(raw)) => {
                match raw.parse::<u32>() {
                    Ok(parsed) => limit = parsed,
                    Err(_) => tracing::warn!(limit = raw, "ignoring invalid --limit"),
                }
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    CrispCommand::List { filter, limit }
}

/// Returns the help text shown for unknown or absent commands.
pub fn help_text() -> String {
    format!(
        r#"Crisp CLI - Manage live chat conversations

Commands:
  list [--status pending|resolved|all] [--limit N]  List conversations
  read <session_id>                                  Read conversation messages
  reply <session_id> "message"                       Send a reply
  resolve <session_id>                               Mark as resolved
  reopen <session_id>                                Reopen conversation
  search "query"                                     Search conversations
  info <session_id>                                  Get conversation details

Environment variables required:
  {:<18} Your Crisp plugin identifier
  {:<18} Your Crisp plugin key
  {:<18} Your website ID
"#,
        REQUIRED_ENV_VARS[0], REQUIRED_ENV_VARS[1], REQUIRED_ENV_VARS[2]
    )
}
