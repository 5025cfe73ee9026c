use std::io::Write;

use crate::core::errors::Result;
use crate::core::models::entity::{EntityKind, EntityMeta};
use crate::core::models::snapshot::Snapshot;

/// Writes entity listings as CSV for spreadsheets.
///
/// Each kind has a fixed column set. Passwords are never exported, and
/// cells that a spreadsheet would evaluate as a formula are prefixed
/// with `'`.
pub struct ExportService;

impl ExportService {
    /// Header row for `kind`.
    pub fn headers(kind: EntityKind) -> &'static [&'static str] {
        match kind {
            EntityKind::Identity => &[
                "Name", "Email", "Phone", "Country", "Address", "Status", "Notes", "Created At",
            ],
            EntityKind::Website => &[
                "Name",
                "URL",
                "Type",
                "Hosting Provider",
                "Status",
                "Notes",
                "Created At",
            ],
            EntityKind::Card => &[
                "Card Holder",
                "Card Type",
                "Last Four",
                "Expiry",
                "Billing Address",
                "Status",
                "Notes",
                "Created At",
            ],
            EntityKind::Advertiser => &[
                "Name",
                "Contact Email",
                "Contact Name",
                "Commission Rate",
                "Payment Terms",
                "Status",
                "Notes",
                "Created At",
            ],
            EntityKind::Account => &[
                "Account Name",
                "Account Email",
                "Affiliate ID",
                "Status",
                "Notes",
                "Created At",
            ],
            EntityKind::Order => &[
                "Order Number",
                "Product Name",
                "Amount",
                "Commission",
                "Status",
                "Order Date",
                "Refund Reminder",
                "Notes",
                "Created At",
            ],
        }
    }

    /// Write a header plus one line per row of `kind`. Rows of other kinds
    /// are skipped.
    pub fn write_csv<W: Write>(&self, kind: EntityKind, rows: &[Snapshot], out: W) -> Result<usize> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(Self::headers(kind))?;

        let mut written = 0;
        for row in rows.iter().filter(|r| r.kind() == kind) {
            writer.write_record(cells(row).iter().map(|c| guard_formula(c)))?;
            written += 1;
        }
        writer.flush()?;

        tracing::debug!(kind = %kind, rows = written, "csv export written");
        Ok(written)
    }
}

fn label<S: serde::Serialize>(value: &S) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn created_at(meta: &EntityMeta) -> String {
    meta.created_at.map(|t| t.to_rfc3339()).unwrap_or_default()
}

fn cells(row: &Snapshot) -> Vec<String> {
    let status = row.status();
    match row {
        Snapshot::Identity(e) => {
            let address = [&e.street_address, &e.city, &e.state, &e.zip_code]
                .into_iter()
                .flatten()
                .filter(|part| !part.trim().is_empty())
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                e.name.clone(),
                e.email.clone(),
                text(&e.phone),
                e.country.clone(),
                address,
                status,
                text(&e.notes),
                created_at(&e.meta),
            ]
        }
        Snapshot::Website(e) => vec![
            e.name.clone(),
            e.url.clone(),
            text(&e.website_type),
            text(&e.hosting_provider),
            status,
            text(&e.notes),
            created_at(&e.meta),
        ],
        Snapshot::Card(e) => vec![
            e.card_holder.clone(),
            label(&e.card_type),
            e.last_four.clone(),
            format!("{:02}/{}", e.expiry_month, e.expiry_year),
            text(&e.billing_address),
            status,
            text(&e.notes),
            created_at(&e.meta),
        ],
        Snapshot::Advertiser(e) => vec![
            e.name.clone(),
            text(&e.contact_email),
            text(&e.contact_name),
            e.commission_rate
                .filter(|rate| *rate != 0.0)
                .map(|rate| format!("{rate}%"))
                .unwrap_or_default(),
            text(&e.payment_terms),
            status,
            text(&e.notes),
            created_at(&e.meta),
        ],
        Snapshot::Account(e) => vec![
            e.account_name.clone(),
            e.account_email.clone(),
            text(&e.affiliate_id),
            status,
            text(&e.notes),
            created_at(&e.meta),
        ],
        Snapshot::Order(e) => vec![
            e.order_number.clone(),
            text(&e.product_name),
            format!("{} {}", e.currency, e.amount),
            e.commission.map(|c| c.to_string()).unwrap_or_default(),
            status,
            e.order_date.clone(),
            text(&e.refund_reminder_date),
            text(&e.notes),
            created_at(&e.meta),
        ],
    }
}

fn guard_formula(value: &str) -> String {
    if matches!(value.chars().next(), Some('=' | '+' | '-' | '@')) {
        format!("'{value}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn export(kind: EntityKind, rows: &[Snapshot]) -> String {
        let mut buf = Vec::new();
        ExportService.write_csv(kind, rows, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn card_expiry_is_month_slash_year() {
        let card = Snapshot::from_json(
            EntityKind::Card,
            json!({
                "identity_id": "i1", "last_four": "0042", "expiry_month": 3,
                "expiry_year": 2030, "card_holder": "Jane Doe", "card_type": "Debit"
            }),
        )
        .unwrap();

        let csv = export(EntityKind::Card, &[card]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Card Holder,Card Type,Last Four,Expiry,Billing Address,Status,Notes,Created At"
        );
        assert_eq!(lines.next().unwrap(), "Jane Doe,Debit,0042,03/2030,,Active,,");
    }

    #[test]
    fn order_amount_carries_currency() {
        let order = Snapshot::from_json(
            EntityKind::Order,
            json!({
                "platform_id": "cb", "order_number": "CB-7", "amount": 49.5,
                "currency": "EUR", "order_date": "2026-02-14"
            }),
        )
        .unwrap();

        let csv = export(EntityKind::Order, &[order]);
        assert!(csv.lines().nth(1).unwrap().starts_with("CB-7,,EUR 49.5,,Pending,2026-02-14"));
    }

    #[test]
    fn account_export_omits_password() {
        let account = Snapshot::from_json(
            EntityKind::Account,
            json!({
                "platform_id": "mb", "account_name": "jane_mb",
                "account_email": "jane@example.com", "encrypted_password": "s3cret"
            }),
        )
        .unwrap();

        let csv = export(EntityKind::Account, &[account]);
        assert!(!csv.contains("s3cret"));
        assert!(!csv.to_lowercase().contains("password"));
    }

    #[test]
    fn formula_like_cells_are_guarded() {
        let identity = Snapshot::from_json(
            EntityKind::Identity,
            json!({ "name": "=HYPERLINK(\"x\")", "email": "a@b.co", "country": "US" }),
        )
        .unwrap();

        let csv = export(EntityKind::Identity, &[identity]);
        assert!(csv.contains("'=HYPERLINK"));
    }

    #[test]
    fn rows_of_other_kinds_are_skipped() {
        let identity = Snapshot::from_json(
            EntityKind::Identity,
            json!({ "name": "Jane Doe", "email": "a@b.co", "country": "US" }),
        )
        .unwrap();

        let mut buf = Vec::new();
        let written = ExportService
            .write_csv(EntityKind::Website, &[identity], &mut buf)
            .unwrap();
        assert_eq!(written, 0);
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
    }
}
