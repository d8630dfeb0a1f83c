use crate::models::{EntryForm, FormField};
use crate::services::{entry_service, reference_service};
use crate::session::{Reply, Session, View};

fn field_list() -> String {
    FormField::ALL
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_field(value: &str) -> Result<FormField, String> {
    FormField::parse(value)
        .ok_or_else(|| format!("Unknown field '{}'. Fields: {}", value, field_list()))
}

/// Reload the reference lists (the form's allowed values) and show the draft
pub async fn open(session: &mut Session, reply: &mut Reply) -> Result<(), String> {
    session.view = View::Entry;
    for notice in reference_service::reload(&session.client, &mut session.reference).await {
        reply.error(notice);
    }
    entry_service::retain_known(&mut session.form, &session.reference);
    reply.text(entry_service::render_form(&session.form));
    Ok(())
}

pub async fn execute(
    session: &mut Session,
    reply: &mut Reply,
    command: &str,
    args: &str,
) -> Result<(), String> {
    match command {
        "set" => {
            let (field, value) = args
                .split_once(char::is_whitespace)
                .ok_or_else(|| format!("Usage: `set <field> <value>`. Fields: {}", field_list()))?;
            let field = parse_field(field)?;
            entry_service::set_field(&mut session.form, field, value, &session.reference)?;
        }
        "clear" => {
            let field = parse_field(args)?;
            entry_service::clear_field(&mut session.form, field);
        }
        "show" => {}
        "submit" => {
            let notice = entry_service::submit(&session.client, &session.form).await?;
            reply.success(notice);
            session.form = EntryForm::now();
        }
        "reset-form" => session.form = EntryForm::now(),
        _ => return Err(format!("Unknown entry command '{}'", command)),
    }

    session.view = View::Entry;
    reply.text(entry_service::render_form(&session.form));
    Ok(())
}
