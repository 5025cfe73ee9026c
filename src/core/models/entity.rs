use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::models::snapshot::Snapshot;

/// The six tracked collections. Serialized as the `entity_type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Identity,
    Website,
    Card,
    Advertiser,
    Account,
    Order,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Identity,
        EntityKind::Website,
        EntityKind::Card,
        EntityKind::Advertiser,
        EntityKind::Account,
        EntityKind::Order,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Identity => "identity",
            EntityKind::Website => "website",
            EntityKind::Card => "card",
            EntityKind::Advertiser => "advertiser",
            EntityKind::Account => "account",
            EntityKind::Order => "order",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        // Accept both singular and plural forms on the command line
        let singular = lower.strip_suffix('s').unwrap_or(&lower);
        let singular = if lower == "identities" {
            "identity"
        } else {
            singular
        };
        EntityKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == singular)
            .ok_or_else(|| {
                format!(
                    "unknown entity type '{s}' (expected one of: identity, website, card, advertiser, account, order)"
                )
            })
    }
}

/// Bookkeeping columns shared by every entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityMeta {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: String,
}

/// A row in one of the six collections.
///
/// Each implementor knows its own tag, label, and how to wrap itself
/// into a `Snapshot`, so stores and services stay schema-specific
/// without any reflection.
pub trait Entity: Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync {
    const KIND: EntityKind;

    fn meta(&self) -> &EntityMeta;

    fn meta_mut(&mut self) -> &mut EntityMeta;

    /// Human-readable label stored in history as `entity_name`.
    fn display_name(&self) -> String;

    fn into_snapshot(self) -> Snapshot;

    fn id(&self) -> &str {
        &self.meta().id
    }
}
