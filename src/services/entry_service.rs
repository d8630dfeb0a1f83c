use chrono::{NaiveDate, NaiveTime, Utc};
use rand::Rng;
use tracing::{error, info};

use crate::api::backend::BackendClient;
use crate::models::{
    Direction, EntryForm, FormField, NewTransaction, ReferenceData, ReferenceKind,
};
use crate::utils::{format_money, format_rate, round_rate, Table};

/// `TRX-{last 6 digits of epoch millis}-{1000..=9999}`
pub fn generate_transaction_number() -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let suffix = &millis[millis.len().saturating_sub(6)..];
    let random = rand::thread_rng().gen_range(1000..=9999);
    format!("TRX-{}-{}", suffix, random)
}

/// Counter amount for the current base amount and rate, rounded to cents
pub fn counter_amount(form: &EntryForm) -> Option<f64> {
    match (form.amount_base, form.rate) {
        (Some(base), Some(rate)) => format!("{:.2}", base * rate)
            .parse()
            .ok()
            .filter(|counter: &f64| counter.is_finite()),
        _ => None,
    }
}

fn parse_positive(field: &str, value: &str) -> Result<f64, String> {
    let number: f64 = value
        .trim()
        .replace(',', "")
        .parse()
        .map_err(|_| format!("{} must be a number, got '{}'", field, value.trim()))?;
    if !number.is_finite() || number <= 0.0 {
        return Err(format!("{} must be greater than zero", field));
    }
    Ok(number)
}

fn pick_reference(
    refs: &ReferenceData,
    kind: ReferenceKind,
    value: &str,
) -> Result<String, String> {
    if refs.list(kind).is_empty() {
        return Err(format!(
            "No {} loaded. Open `reference` or `entry` to load them",
            kind.path()
        ));
    }
    refs.find_name(kind, value)
        .map(|name| name.to_string())
        .ok_or_else(|| {
            let options: Vec<&str> = refs.list(kind).iter().map(|i| i.name.as_str()).collect();
            format!(
                "Unknown {} '{}'. Choose one of: {}",
                kind.singular().to_lowercase(),
                value.trim(),
                options.join(", ")
            )
        })
}

/// Set one field of the draft from operator input
///
/// Banks and pairs must come from the loaded reference lists.
pub fn set_field(
    form: &mut EntryForm,
    field: FormField,
    value: &str,
    refs: &ReferenceData,
) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("Missing value for `{}`", field.name()));
    }

    match field {
        FormField::Date => {
            let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD", value))?;
            form.date = Some(date.format("%Y-%m-%d").to_string());
        }
        FormField::Time => {
            let time = NaiveTime::parse_from_str(value, "%H:%M")
                .map_err(|_| format!("Invalid time '{}'. Use HH:MM", value))?;
            form.time = Some(time.format("%H:%M").to_string());
        }
        FormField::Bank1 => form.bank1 = Some(pick_reference(refs, ReferenceKind::Banks, value)?),
        FormField::Bank2 => form.bank2 = Some(pick_reference(refs, ReferenceKind::Banks, value)?),
        FormField::Pair => form.pair = Some(pick_reference(refs, ReferenceKind::Pairs, value)?),
        FormField::Rate => {
            let rate = round_rate(parse_positive("Rate", value)?);
            if rate <= 0.0 {
                return Err("Rate must be at least 0.00001".to_string());
            }
            form.rate = Some(rate);
        }
        FormField::Direction => {
            form.direction = Direction::parse(value)
                .ok_or_else(|| format!("Invalid direction '{}'. Use Buy or Sell", value))?;
        }
        FormField::AmountBase => form.amount_base = Some(parse_positive("Amount", value)?),
        FormField::DealType => form.deal_type = Some(value.to_string()),
        FormField::LocalCodeRole => form.local_code_role = Some(value.to_uppercase()),
    }

    Ok(())
}

/// Unset one field, direction falls back to Buy
pub fn clear_field(form: &mut EntryForm, field: FormField) {
    match field {
        FormField::Date => form.date = None,
        FormField::Time => form.time = None,
        FormField::Bank1 => form.bank1 = None,
        FormField::Bank2 => form.bank2 = None,
        FormField::Pair => form.pair = None,
        FormField::Rate => form.rate = None,
        FormField::Direction => form.direction = Direction::Buy,
        FormField::AmountBase => form.amount_base = None,
        FormField::DealType => form.deal_type = None,
        FormField::LocalCodeRole => form.local_code_role = None,
    }
}

/// Drop selections that are no longer in the reference lists
pub fn retain_known(form: &mut EntryForm, refs: &ReferenceData) {
    let known_bank = |name: &Option<String>| {
        name.as_ref()
            .map_or(true, |n| refs.contains(ReferenceKind::Banks, n))
    };
    if !known_bank(&form.bank1) {
        form.bank1 = None;
    }
    if !known_bank(&form.bank2) {
        form.bank2 = None;
    }
    if let Some(pair) = &form.pair {
        if !refs.contains(ReferenceKind::Pairs, pair) {
            form.pair = None;
        }
    }
}

fn required<T: Clone>(value: &Option<T>, field: FormField) -> Result<T, String> {
    value
        .clone()
        .ok_or_else(|| format!("Please fill in `{}`", field.name()))
}

/// Check the draft and build the request body with a fresh transaction number
pub fn build_transaction(form: &EntryForm) -> Result<NewTransaction, String> {
    let date = required(&form.date, FormField::Date)?;
    let time = required(&form.time, FormField::Time)?;
    let bank1 = required(&form.bank1, FormField::Bank1)?;
    let bank2 = required(&form.bank2, FormField::Bank2)?;
    let pair = required(&form.pair, FormField::Pair)?;
    let rate = required(&form.rate, FormField::Rate)?;
    let amount_base = required(&form.amount_base, FormField::AmountBase)?;
    let amount_counter = counter_amount(form).unwrap_or(amount_base * rate);
    if !amount_counter.is_finite() {
        return Err("Counter amount is too large, check the rate and amount".to_string());
    }

    Ok(NewTransaction {
        transaction_number: generate_transaction_number(),
        date,
        time,
        bank1,
        bank2,
        pair,
        rate,
        direction: form.direction,
        amount_base,
        amount_counter,
        deal_type: form.deal_type.clone(),
        local_code_role: form.local_code_role.clone(),
    })
}

/// Validate and submit the draft, returns the success notice
///
/// The draft is left untouched, the caller resets it on success.
pub async fn submit(client: &BackendClient, form: &EntryForm) -> Result<String, String> {
    let transaction = build_transaction(form)?;

    match client.create_transaction(&transaction).await {
        Ok(_) => {
            info!(
                "Saved transaction {} ({} {} {} -> {})",
                transaction.transaction_number,
                transaction.direction,
                transaction.pair,
                transaction.bank1,
                transaction.bank2
            );
            Ok("Transaction saved successfully!".to_string())
        }
        Err(e) => {
            error!("Failed to save transaction {}: {}", transaction.transaction_number, e);
            Err(e.notice("Error saving transaction"))
        }
    }
}

/// Render the draft as a two-column table
pub fn render_form(form: &EntryForm) -> String {
    let unset = || "-".to_string();
    let mut table = Table::new(&["Field", "Value"]);

    let rows = [
        ("date", form.date.clone().unwrap_or_else(unset)),
        ("time", form.time.clone().unwrap_or_else(unset)),
        ("bank1", form.bank1.clone().unwrap_or_else(unset)),
        ("bank2", form.bank2.clone().unwrap_or_else(unset)),
        ("pair", form.pair.clone().unwrap_or_else(unset)),
        ("direction", form.direction.to_string()),
        ("rate", form.rate.map(format_rate).unwrap_or_else(unset)),
        ("amount", form.amount_base.map(format_money).unwrap_or_else(unset)),
        ("counter", counter_amount(form).map(format_money).unwrap_or_else(unset)),
        ("deal", form.deal_type.clone().unwrap_or_else(|| "Spot (server default)".to_string())),
        ("role", form.local_code_role.clone().unwrap_or_else(|| "TAKER (server default)".to_string())),
    ];
    for (name, value) in rows {
        table.add_row(vec![name.to_string(), value]);
    }

    format!("📝 New Transaction\n\n{}", table.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReferenceItem;
    use crate::testing::MockBackend;
    use std::time::Duration;

    fn refs() -> ReferenceData {
        ReferenceData {
            banks: vec![
                ReferenceItem { id: 1, name: "JP Morgan".to_string() },
                ReferenceItem { id: 2, name: "Citi".to_string() },
            ],
            pairs: vec![ReferenceItem { id: 1, name: "EUR/USD".to_string() }],
        }
    }

    fn empty_form() -> EntryForm {
        EntryForm::with_defaults(
            NaiveDate::from_ymd_opt(2024, 3, 1).expect("date"),
            NaiveTime::from_hms_opt(9, 5, 0).expect("time"),
        )
    }

    fn filled_form() -> EntryForm {
        let refs = refs();
        let mut form = empty_form();
        set_field(&mut form, FormField::Bank1, "jp morgan", &refs).expect("bank1");
        set_field(&mut form, FormField::Bank2, "Citi", &refs).expect("bank2");
        set_field(&mut form, FormField::Pair, "eur/usd", &refs).expect("pair");
        set_field(&mut form, FormField::Rate, "1.084567", &refs).expect("rate");
        set_field(&mut form, FormField::AmountBase, "1,000,000", &refs).expect("amount");
        form
    }

    #[test]
    fn test_defaults() {
        let form = empty_form();
        assert_eq!(form.date.as_deref(), Some("2024-03-01"));
        assert_eq!(form.time.as_deref(), Some("09:05"));
        assert_eq!(form.direction, Direction::Buy);
    }

    #[test]
    fn test_transaction_number_format() {
        let number = generate_transaction_number();
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "TRX");
        assert_eq!(parts[1].len(), 6);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        let suffix: u32 = parts[2].parse().expect("numeric suffix");
        assert!((1000..=9999).contains(&suffix));
    }

    #[test]
    fn test_rate_is_rounded_and_counter_follows() {
        let form = filled_form();
        assert_eq!(form.rate, Some(1.08457));
        assert_eq!(form.bank1.as_deref(), Some("JP Morgan"));
        assert_eq!(counter_amount(&form), Some(1084570.0));

        let mut partial = empty_form();
        assert_eq!(counter_amount(&partial), None);
        partial.rate = Some(2.0);
        assert_eq!(counter_amount(&partial), None);
    }

    #[test]
    fn test_set_field_rejects_bad_input() {
        let refs = refs();
        let mut form = empty_form();
        assert!(set_field(&mut form, FormField::Date, "2024-02-30", &refs).is_err());
        assert!(set_field(&mut form, FormField::Time, "25:00", &refs).is_err());
        assert!(set_field(&mut form, FormField::Rate, "-1", &refs).is_err());
        assert!(set_field(&mut form, FormField::AmountBase, "lots", &refs).is_err());
        assert!(set_field(&mut form, FormField::Direction, "hold", &refs).is_err());

        let err = set_field(&mut form, FormField::Bank1, "Nomura", &refs).expect_err("unknown bank");
        assert!(err.contains("JP Morgan, Citi"));

        let err = set_field(&mut form, FormField::Pair, "EUR/USD", &ReferenceData::default())
            .expect_err("nothing loaded");
        assert!(err.contains("No pairs loaded"));

        // Nothing above changed the draft
        assert_eq!(form, empty_form());
    }

    #[test]
    fn test_rate_that_rounds_to_zero_is_rejected() {
        let refs = refs();
        let mut form = empty_form();
        let err = set_field(&mut form, FormField::Rate, "0.000001", &refs).expect_err("zero rate");
        assert!(err.contains("0.00001"));
        assert_eq!(form.rate, None);

        set_field(&mut form, FormField::Rate, "0.00001", &refs).expect("smallest rate");
        assert_eq!(form.rate, Some(0.00001));
    }

    #[test]
    fn test_overflowing_counter_amount_is_rejected() {
        let refs = refs();
        let mut form = filled_form();
        set_field(&mut form, FormField::AmountBase, "1e300", &refs).expect("amount");
        set_field(&mut form, FormField::Rate, "1e10", &refs).expect("rate");

        assert_eq!(counter_amount(&form), None);
        let err = build_transaction(&form).expect_err("infinite counter");
        assert!(err.contains("too large"));
        assert!(render_form(&form).contains("counter"));
    }

    #[test]
    fn test_build_requires_every_field() {
        let mut form = filled_form();
        form.pair = None;
        let err = build_transaction(&form).expect_err("pair missing");
        assert!(err.contains("`pair`"));
    }

    #[test]
    fn test_build_transaction() {
        let mut form = filled_form();
        form.direction = Direction::Sell;
        let tx = build_transaction(&form).expect("valid draft");
        assert_eq!(tx.date, "2024-03-01");
        assert_eq!(tx.time, "09:05");
        assert_eq!(tx.amount_base, 1000000.0);
        assert_eq!(tx.amount_counter, 1084570.0);
        assert_eq!(tx.direction, Direction::Sell);
        assert!(tx.transaction_number.starts_with("TRX-"));
    }

    #[test]
    fn test_retain_known_clears_removed_selections() {
        let mut form = filled_form();
        let mut refs = refs();
        refs.banks.retain(|b| b.name != "Citi");

        retain_known(&mut form, &refs);
        assert_eq!(form.bank1.as_deref(), Some("JP Morgan"));
        assert_eq!(form.bank2, None);
        assert_eq!(form.pair.as_deref(), Some("EUR/USD"));
    }

    #[test]
    fn test_render_form_shows_counter() {
        let rendered = render_form(&filled_form());
        assert!(rendered.contains("1.08457"));
        assert!(rendered.contains("1,084,570.00"));
    }

    #[tokio::test]
    async fn test_submit_maps_server_message() {
        let mock = MockBackend::start().await;
        mock.route(
            "POST",
            "/api/transactions",
            400,
            r#"{"status": "error", "message": "Duplicate transaction number"}"#,
        );
        let client = BackendClient::new(&mock.base_url, Duration::from_secs(5)).expect("client");

        let err = submit(&client, &filled_form()).await.expect_err("rejected");
        assert_eq!(err, "Duplicate transaction number");

        mock.route("POST", "/api/transactions", 201, r#"{"status": "success"}"#);
        let notice = submit(&client, &filled_form()).await.expect("saved");
        assert_eq!(notice, "Transaction saved successfully!");
    }
}
