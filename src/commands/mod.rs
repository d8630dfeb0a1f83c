pub mod entry;
pub mod help;
pub mod history;
pub mod mismatch;
pub mod reference;

use tracing::{debug, warn};

use crate::models::ReferenceKind;
use crate::session::{Reply, Session};

/// Initial load: reference data for the form plus the transaction snapshot
pub async fn start(session: &mut Session) -> Reply {
    let mut reply = Reply::default();

    if let Err(e) = history::open(session, &mut Reply::default()).await {
        reply.error(e);
    }
    if let Err(e) = entry::open(session, &mut reply).await {
        reply.error(e);
    }
    reply
}

/// Handle one input line
///
/// Failures never touch session state, they come back as an error notification.
pub async fn handle_line(session: &mut Session, line: &str) -> Reply {
    let mut reply = Reply::default();
    let line = line.trim();

    if let Some(pending) = session.pending.take() {
        if let Err(e) = reference::confirm(session, &mut reply, pending, line).await {
            warn!("Confirmed action failed: {}", e);
            reply.error(e);
        }
        return reply;
    }

    if line.is_empty() {
        return reply;
    }

    let (command, args) = match line.split_once(char::is_whitespace) {
        Some((command, args)) => (command.to_lowercase(), args.trim()),
        None => (line.to_lowercase(), ""),
    };
    debug!("Command '{}' args '{}'", command, args);

    let result = match command.as_str() {
        "help" | "?" => {
            help::execute(&mut reply);
            Ok(())
        }
        "quit" | "exit" => {
            reply.quit = true;
            Ok(())
        }
        "entry" | "form" => entry::open(session, &mut reply).await,
        "history" => history::open(session, &mut reply).await,
        "mismatches" | "mismatch" => mismatch::open(session, &mut reply).await,
        "reference" | "ref" => reference::open(session, &mut reply).await,
        "set" | "clear" | "show" | "submit" | "reset-form" => {
            entry::execute(session, &mut reply, &command, args).await
        }
        "search" | "date" | "direction" | "dir" | "filter" | "sort" | "page" | "next"
        | "prev" | "reset" | "reload" => history::execute(session, &mut reply, &command, args).await,
        "fix" => mismatch::fix(session, &mut reply, args).await,
        "banks" | "pairs" => match ReferenceKind::parse(&command) {
            Some(kind) => reference::execute(session, &mut reply, kind, args).await,
            None => Ok(()),
        },
        _ => Err(format!(
            "Unknown command '{}'. Type `help` for a list of commands",
            command
        )),
    };

    if let Err(e) = result {
        warn!("Command '{}' failed: {}", command, e);
        reply.error(e);
    }

    reply
}
