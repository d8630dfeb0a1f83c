use crate::services::mismatch_service;
use crate::session::{Reply, Session, View};

pub async fn open(session: &mut Session, reply: &mut Reply) -> Result<(), String> {
    session.view = View::Mismatches;
    let mismatches = mismatch_service::load_mismatches(&session.client).await?;
    session.mismatches = mismatches;
    reply.text(mismatch_service::render_mismatches(&session.mismatches));
    Ok(())
}

/// `fix <id>`: book the missing leg, then refresh the list
pub async fn fix(session: &mut Session, reply: &mut Reply, args: &str) -> Result<(), String> {
    let id: i64 = args
        .parse()
        .map_err(|_| "Usage: `fix <id>` with the Id shown in `mismatches`".to_string())?;

    let notice = mismatch_service::fix_mismatch(&session.client, id).await?;
    reply.success(notice);
    open(session, reply).await
}
