use tracing::{debug, error, info};

use crate::api::backend::BackendClient;
use crate::models::{ReferenceData, ReferenceItem, ReferenceKind};
use crate::utils::Table;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this item?";

async fn load_kind(
    client: &BackendClient,
    kind: ReferenceKind,
) -> Result<Vec<ReferenceItem>, String> {
    match client.list_reference(kind).await {
        Ok(items) => {
            debug!("Loaded {} {}", items.len(), kind.path());
            Ok(items)
        }
        Err(e) => {
            error!("Error loading {}: {}", kind.path(), e);
            Err(format!("Error loading {}", kind.path()))
        }
    }
}

/// Fetch banks and pairs concurrently
///
/// Each list is replaced on its own, a failed fetch keeps the previous copy.
/// Returns the error notices, one per failed list.
pub async fn reload(client: &BackendClient, refs: &mut ReferenceData) -> Vec<String> {
    let (banks, pairs) = tokio::join!(
        load_kind(client, ReferenceKind::Banks),
        load_kind(client, ReferenceKind::Pairs)
    );

    let mut errors = Vec::new();
    for (kind, result) in [(ReferenceKind::Banks, banks), (ReferenceKind::Pairs, pairs)] {
        match result {
            Ok(items) => refs.replace(kind, items),
            Err(e) => errors.push(e),
        }
    }
    errors
}

/// Add a bank or pair, an empty name is ignored and yields `Ok(None)`
pub async fn add(
    client: &BackendClient,
    kind: ReferenceKind,
    name: &str,
) -> Result<Option<String>, String> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    match client.add_reference(kind, name).await {
        Ok(status) => {
            info!("Added {} '{}' (id {:?})", kind.singular().to_lowercase(), name, status.id);
            Ok(Some(format!("{} added!", kind.singular())))
        }
        Err(e) => {
            error!("Failed to add {} '{}': {}", kind.singular().to_lowercase(), name, e);
            Err(e.notice("Error adding item"))
        }
    }
}

pub async fn delete(client: &BackendClient, kind: ReferenceKind, id: i64) -> Result<String, String> {
    match client.delete_reference(kind, id).await {
        Ok(()) => {
            info!("Deleted {} {}", kind.singular().to_lowercase(), id);
            Ok("Item deleted".to_string())
        }
        Err(e) => {
            error!("Failed to delete {} {}: {}", kind.singular().to_lowercase(), id, e);
            Err("Error deleting item".to_string())
        }
    }
}

pub fn render_list(kind: ReferenceKind, items: &[ReferenceItem]) -> String {
    let mut table = Table::new(&["Id", kind.singular()]);
    table.set_placeholder("Nothing here yet");
    for item in items {
        table.add_row(vec![item.id.to_string(), item.name.clone()]);
    }
    format!("🏦 {}\n\n{}", capitalize(kind.path()), table.render())
}

pub fn render_reference(refs: &ReferenceData) -> String {
    format!(
        "{}\n{}",
        render_list(ReferenceKind::Banks, &refs.banks),
        render_list(ReferenceKind::Pairs, &refs.pairs)
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
