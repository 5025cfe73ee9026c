use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, TrackerError};
use crate::core::models::assets::{Advertiser, Card, Identity, Order, PlatformAccount, Website};
use crate::core::models::entity::{Entity, EntityKind, EntityMeta};

/// A captured copy of one entity's fields at a point in time.
///
/// One variant per collection, so every consumer has to handle all six
/// schemas explicitly and the compiler flags any gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "fields", rename_all = "snake_case")]
pub enum Snapshot {
    Identity(Identity),
    Website(Website),
    Card(Card),
    Advertiser(Advertiser),
    Account(PlatformAccount),
    Order(Order),
}

impl Snapshot {
    /// Build a typed snapshot from loose JSON fields.
    pub fn from_json(kind: EntityKind, fields: serde_json::Value) -> Result<Self> {
        fn typed<T: Entity>(fields: serde_json::Value) -> Result<Snapshot> {
            serde_json::from_value::<T>(fields)
                .map(T::into_snapshot)
                .map_err(|e| TrackerError::InvalidEntityData {
                    kind: T::KIND,
                    detail: e.to_string(),
                })
        }

        match kind {
            EntityKind::Identity => typed::<Identity>(fields),
            EntityKind::Website => typed::<Website>(fields),
            EntityKind::Card => typed::<Card>(fields),
            EntityKind::Advertiser => typed::<Advertiser>(fields),
            EntityKind::Account => typed::<PlatformAccount>(fields),
            EntityKind::Order => typed::<Order>(fields),
        }
    }

    /// The snapshot's fields as a JSON object (no kind tag).
    pub fn to_fields(&self) -> Result<serde_json::Value> {
        let value = match self {
            Snapshot::Identity(e) => serde_json::to_value(e),
            Snapshot::Website(e) => serde_json::to_value(e),
            Snapshot::Card(e) => serde_json::to_value(e),
            Snapshot::Advertiser(e) => serde_json::to_value(e),
            Snapshot::Account(e) => serde_json::to_value(e),
            Snapshot::Order(e) => serde_json::to_value(e),
        };
        value.map_err(|e| TrackerError::InvalidEntityData {
            kind: self.kind(),
            detail: e.to_string(),
        })
    }

    /// Apply a partial JSON object on top of this snapshot's fields.
    ///
    /// Keys present in `patch` replace the current values; `null` clears
    /// an optional column. The bookkeeping columns cannot be patched.
    pub fn merged(&self, patch: &serde_json::Value) -> Result<Self> {
        let kind = self.kind();
        let patch = patch
            .as_object()
            .ok_or_else(|| TrackerError::InvalidEntityData {
                kind,
                detail: "update data must be a JSON object".into(),
            })?;

        let mut fields = self.to_fields()?;
        if let Some(current) = fields.as_object_mut() {
            for (key, value) in patch {
                if matches!(key.as_str(), "id" | "created_at" | "updated_at" | "created_by") {
                    continue;
                }
                current.insert(key.clone(), value.clone());
            }
        }

        Self::from_json(kind, fields)
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Snapshot::Identity(_) => EntityKind::Identity,
            Snapshot::Website(_) => EntityKind::Website,
            Snapshot::Card(_) => EntityKind::Card,
            Snapshot::Advertiser(_) => EntityKind::Advertiser,
            Snapshot::Account(_) => EntityKind::Account,
            Snapshot::Order(_) => EntityKind::Order,
        }
    }

    pub fn meta(&self) -> &EntityMeta {
        match self {
            Snapshot::Identity(e) => e.meta(),
            Snapshot::Website(e) => e.meta(),
            Snapshot::Card(e) => e.meta(),
            Snapshot::Advertiser(e) => e.meta(),
            Snapshot::Account(e) => e.meta(),
            Snapshot::Order(e) => e.meta(),
        }
    }

    pub fn id(&self) -> &str {
        &self.meta().id
    }

    /// The row's status label as stored, e.g. `Pending Docs`.
    pub fn status(&self) -> String {
        fn label<S: Serialize>(status: &S) -> String {
            serde_json::to_value(status)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default()
        }

        match self {
            Snapshot::Identity(e) => label(&e.status),
            Snapshot::Website(e) => label(&e.status),
            Snapshot::Card(e) => label(&e.status),
            Snapshot::Advertiser(e) => label(&e.status),
            Snapshot::Account(e) => label(&e.status),
            Snapshot::Order(e) => label(&e.status),
        }
    }

    /// Label recorded as `entity_name` in history.
    pub fn display_name(&self) -> String {
        match self {
            Snapshot::Identity(e) => e.display_name(),
            Snapshot::Website(e) => e.display_name(),
            Snapshot::Card(e) => e.display_name(),
            Snapshot::Advertiser(e) => e.display_name(),
            Snapshot::Account(e) => e.display_name(),
            Snapshot::Order(e) => e.display_name(),
        }
    }
}
