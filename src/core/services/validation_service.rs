use std::sync::OnceLock;

use regex::Regex;

use crate::core::errors::{Result, TrackerError};
use crate::core::models::assets::{Advertiser, Card, Identity, Order, PlatformAccount, Website};
use crate::core::models::snapshot::Snapshot;

/// Field rules applied to data entered by a user before it reaches the store.
///
/// Snapshots restored by an undo are not re-validated.
pub struct ValidationService;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    })
}

fn last_four_pattern() -> &'static Regex {
    static LAST_FOUR: OnceLock<Regex> = OnceLock::new();
    LAST_FOUR.get_or_init(|| Regex::new(r"^\d{4}$").expect("last-four pattern is valid"))
}

fn invalid(field: &str, detail: &str) -> TrackerError {
    TrackerError::ValidationFailed {
        field: field.to_string(),
        detail: detail.to_string(),
    }
}

fn min_len(field: &str, value: &str, min: usize) -> Result<()> {
    if value.trim().chars().count() < min {
        let detail = if min == 1 {
            "is required".to_string()
        } else {
            format!("must be at least {min} characters")
        };
        return Err(invalid(field, &detail));
    }
    Ok(())
}

fn email(field: &str, value: &str) -> Result<()> {
    if !email_pattern().is_match(value.trim()) {
        return Err(invalid(field, "invalid email address"));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, "must be zero or positive"));
    }
    Ok(())
}

impl ValidationService {
    pub fn validate(&self, snapshot: &Snapshot) -> Result<()> {
        match snapshot {
            Snapshot::Identity(e) => self.identity(e),
            Snapshot::Website(e) => self.website(e),
            Snapshot::Card(e) => self.card(e),
            Snapshot::Advertiser(e) => self.advertiser(e),
            Snapshot::Account(e) => self.account(e),
            Snapshot::Order(e) => self.order(e),
        }
    }

    fn identity(&self, e: &Identity) -> Result<()> {
        min_len("name", &e.name, 2)?;
        email("email", &e.email)?;
        min_len("country", &e.country, 1)
    }

    fn website(&self, e: &Website) -> Result<()> {
        min_len("name", &e.name, 2)?;
        min_len("url", &e.url, 4)
    }

    fn card(&self, e: &Card) -> Result<()> {
        min_len("identity_id", &e.identity_id, 1)?;
        if !last_four_pattern().is_match(&e.last_four) {
            return Err(invalid("last_four", "must be exactly 4 digits"));
        }
        if !(1..=12).contains(&e.expiry_month) {
            return Err(invalid("expiry_month", "must be between 1 and 12"));
        }
        min_len("card_holder", &e.card_holder, 2)
    }

    fn advertiser(&self, e: &Advertiser) -> Result<()> {
        min_len("platform_id", &e.platform_id, 1)?;
        min_len("name", &e.name, 2)?;
        if let Some(contact) = e.contact_email.as_deref().filter(|c| !c.is_empty()) {
            email("contact_email", contact)?;
        }
        if let Some(rate) = e.commission_rate
            && !(0.0..=100.0).contains(&rate)
        {
            return Err(invalid("commission_rate", "must be between 0 and 100"));
        }
        Ok(())
    }

    fn account(&self, e: &PlatformAccount) -> Result<()> {
        min_len("platform_id", &e.platform_id, 1)?;
        min_len("account_name", &e.account_name, 2)?;
        email("account_email", &e.account_email)
    }

    fn order(&self, e: &Order) -> Result<()> {
        min_len("platform_id", &e.platform_id, 1)?;
        min_len("order_number", &e.order_number, 1)?;
        non_negative("amount", e.amount)?;
        if let Some(commission) = e.commission {
            non_negative("commission", commission)?;
        }
        min_len("order_date", &e.order_date, 1)
    }
}
