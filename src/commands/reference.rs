use crate::models::ReferenceKind;
use crate::services::{entry_service, reference_service};
use crate::session::{Pending, Reply, Session, View};

/// Reload both lists; failures are reported per list
async fn reload(session: &mut Session, reply: &mut Reply) {
    for notice in reference_service::reload(&session.client, &mut session.reference).await {
        reply.error(notice);
    }
    entry_service::retain_known(&mut session.form, &session.reference);
}

pub async fn open(session: &mut Session, reply: &mut Reply) -> Result<(), String> {
    session.view = View::Reference;
    reload(session, reply).await;
    reply.text(reference_service::render_reference(&session.reference));
    Ok(())
}

/// `banks|pairs [add <name> | delete <id>]`
pub async fn execute(
    session: &mut Session,
    reply: &mut Reply,
    kind: ReferenceKind,
    args: &str,
) -> Result<(), String> {
    session.view = View::Reference;

    let (action, rest) = match args.split_once(char::is_whitespace) {
        Some((action, rest)) => (action.to_lowercase(), rest.trim()),
        None => (args.to_lowercase(), ""),
    };

    match action.as_str() {
        "" | "list" => reload(session, reply).await,
        "add" => {
            match reference_service::add(&session.client, kind, rest).await? {
                Some(notice) => reply.success(notice),
                None => return Ok(()),
            }
            reload(session, reply).await;
        }
        "delete" | "rm" => {
            let id: i64 = rest.parse().map_err(|_| {
                format!("Usage: `{} delete <id>` with the Id shown in the list", kind.path())
            })?;
            session.pending = Some(Pending::Delete { kind, id });
            reply.text(format!("{} (y/N)", reference_service::DELETE_PROMPT));
            return Ok(());
        }
        other => {
            return Err(format!(
                "Unknown {} action '{}'. Use: `{} add <name>` or `{} delete <id>`",
                kind.path(),
                other,
                kind.path(),
                kind.path()
            ))
        }
    }

    reply.text(reference_service::render_list(kind, session.reference.list(kind)));
    Ok(())
}

/// Answer to the delete prompt, anything but yes cancels
pub async fn confirm(
    session: &mut Session,
    reply: &mut Reply,
    pending: Pending,
    answer: &str,
) -> Result<(), String> {
    let Pending::Delete { kind, id } = pending;

    if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
        reply.text("Cancelled");
        return Ok(());
    }

    let notice = reference_service::delete(&session.client, kind, id).await?;
    reply.success(notice);
    reload(session, reply).await;
    reply.text(reference_service::render_list(kind, session.reference.list(kind)));
    Ok(())
}
