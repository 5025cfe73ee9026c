use serde::{Deserialize, Serialize};

use crate::core::models::entity::{Entity, EntityKind, EntityMeta};
use crate::core::models::snapshot::Snapshot;

// ─── Identity ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityStatus {
    #[default]
    Active,
    Burned,
    #[serde(rename = "Pending Docs")]
    PendingDocs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdType {
    Passport,
    #[serde(rename = "Driving License")]
    DrivingLicense,
    #[serde(rename = "National ID")]
    NationalId,
    Other,
}

/// A persona used to open accounts and hold cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_type: Option<IdType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_expiry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_profile: Option<String>,
    #[serde(default)]
    pub status: IdentityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entity for Identity {
    const KIND: EntityKind = EntityKind::Identity;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn into_snapshot(self) -> Snapshot {
        Snapshot::Identity(self)
    }
}

// ─── Website ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebsiteStatus {
    #[default]
    Active,
    Inactive,
}

/// A landing or checkout site, optionally owned by an identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Website {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosting_provider: Option<String>,
    #[serde(default)]
    pub platform_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpanel_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpanel_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpanel_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webmail_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webmail_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_id: Option<String>,
    #[serde(default)]
    pub status: WebsiteStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entity for Website {
    const KIND: EntityKind = EntityKind::Website;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn into_snapshot(self) -> Snapshot {
        Snapshot::Website(self)
    }
}

// ─── Card ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    #[default]
    Credit,
    Debit,
    Prepaid,
    Virtual,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardStatus {
    #[default]
    Active,
    Expired,
    Blocked,
}

/// A payment card. Only the last four digits are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub identity_id: String,
    #[serde(default)]
    pub card_type: CardType,
    pub last_four: String,
    pub expiry_month: u32,
    pub expiry_year: i32,
    pub card_holder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<String>,
    #[serde(default)]
    pub status: CardStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entity for Card {
    const KIND: EntityKind = EntityKind::Card;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn display_name(&self) -> String {
        format!("****{}", self.last_four)
    }

    fn into_snapshot(self) -> Snapshot {
        Snapshot::Card(self)
    }
}

// ─── Advertiser ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvertiserStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

/// An advertiser (offer owner) on an affiliate platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Advertiser {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub platform_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
    #[serde(default)]
    pub status: AdvertiserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entity for Advertiser {
    const KIND: EntityKind = EntityKind::Advertiser;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn into_snapshot(self) -> Snapshot {
        Snapshot::Advertiser(self)
    }
}

// ─── Platform account ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    #[default]
    Active,
    Suspended,
    Pending,
}

/// A login on an affiliate platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformAccount {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub platform_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_id: Option<String>,
    pub account_name: String,
    pub account_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_id: Option<String>,
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entity for PlatformAccount {
    const KIND: EntityKind = EntityKind::Account;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn display_name(&self) -> String {
        self.account_name.clone()
    }

    fn into_snapshot(self) -> Snapshot {
        Snapshot::Account(self)
    }
}

// ─── Order ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Refunded,
    Cancelled,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// A tracked purchase, with optional refund reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub platform_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertiser_id: Option<String>,
    pub order_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission: Option<f64>,
    #[serde(default)]
    pub status: OrderStatus,
    pub order_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_reminder_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Default for Order {
    fn default() -> Self {
        Self {
            meta: EntityMeta::default(),
            platform_id: String::new(),
            account_id: None,
            advertiser_id: None,
            order_number: String::new(),
            product_name: None,
            amount: 0.0,
            currency: default_currency(),
            commission: None,
            status: OrderStatus::default(),
            order_date: String::new(),
            refund_reminder_date: None,
            notes: None,
        }
    }
}

impl Entity for Order {
    const KIND: EntityKind = EntityKind::Order;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn display_name(&self) -> String {
        self.order_number.clone()
    }

    fn into_snapshot(self) -> Snapshot {
        Snapshot::Order(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_label_is_masked() {
        let card = Card {
            last_four: "4242".into(),
            ..Card::default()
        };
        assert_eq!(card.display_name(), "****4242");
    }

    #[test]
    fn identity_status_uses_display_spelling() {
        let json = serde_json::to_string(&IdentityStatus::PendingDocs).unwrap();
        assert_eq!(json, "\"Pending Docs\"");
    }

    #[test]
    fn order_defaults_fill_missing_columns() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "platform_id": "clickbank",
            "order_number": "X1",
            "amount": 19.5,
            "order_date": "2026-03-01"
        }))
        .unwrap();

        assert_eq!(order.currency, "USD");
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.meta.id.is_empty());
    }

    #[test]
    fn optional_columns_are_omitted() {
        let identity = Identity {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            country: "US".into(),
            ..Identity::default()
        };
        let value = serde_json::to_value(&identity).unwrap();
        assert!(value.get("phone").is_none());
        assert_eq!(value["status"], "Active");
    }
}
