use tracing::{error, info};

use crate::api::backend::BackendClient;
use crate::models::{Direction, Transaction};
use crate::utils::{format_amount, format_rate, Table};

pub const ALL_BALANCED: &str = "All trades are balanced!";

/// The counter-leg a mismatched transaction is waiting for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingLeg {
    pub direction: Direction,
    pub from_bank: String,
    pub to_bank: String,
}

/// Opposite direction, booked from bank2 back to bank1
pub fn missing_leg(tx: &Transaction) -> MissingLeg {
    MissingLeg {
        direction: tx.direction.opposite(),
        from_bank: tx.bank2.clone(),
        to_bank: tx.bank1.clone(),
    }
}

pub async fn load_mismatches(client: &BackendClient) -> Result<Vec<Transaction>, String> {
    client.list_mismatches().await.map_err(|e| {
        error!("Failed to load mismatches: {}", e);
        "Error loading mismatches".to_string()
    })
}

/// Ask the backend to book the missing leg of transaction `id`
pub async fn fix_mismatch(client: &BackendClient, id: i64) -> Result<String, String> {
    match client.fix_mismatch(id).await {
        Ok(status) => {
            info!("Fixed mismatch {} (new row {:?})", id, status.new_id);
            Ok("Mismatch fixed successfully!".to_string())
        }
        Err(e) => {
            error!("Failed to fix mismatch {}: {}", id, e);
            Err(e.notice("Error fixing mismatch"))
        }
    }
}

pub fn render_mismatches(mismatches: &[Transaction]) -> String {
    let mut table = Table::new(&["Id", "Number", "When", "Trade", "Missing Leg"]);
    table.set_placeholder(&format!("✅ {}", ALL_BALANCED));

    for tx in mismatches {
        let leg = missing_leg(tx);
        table.add_row(vec![
            tx.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            tx.transaction_number.clone(),
            format!("{} at {}", tx.date, tx.time),
            format!(
                "{} {} {} -> {} Amt: {} @ {}",
                tx.direction,
                tx.pair,
                tx.bank1,
                tx.bank2,
                format_amount(tx.amount_base),
                format_rate(tx.rate)
            ),
            format!("Missing {} from {} -> {}", leg.direction, leg.from_bank, leg.to_bank),
        ]);
    }

    let mut output = String::from("⚖️ Mismatches\n\n");
    output.push_str(&table.render());
    if !mismatches.is_empty() {
        output.push_str(&format!(
            "\n{} unmatched. Use `fix <id>` to book the missing leg",
            mismatches.len()
        ));
    }
    output
}
