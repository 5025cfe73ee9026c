use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::entity::EntityKind;
use crate::core::models::snapshot::Snapshot;

/// The kind of mutation a history entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ActionKind::Create => "create",
            ActionKind::Update => "update",
            ActionKind::Delete => "delete",
        })
    }
}

/// One entry in the undo history.
///
/// `previous_data` is set for updates and deletes, `new_data` for
/// creates and updates. `reverted_at` is set once and never cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub id: String,
    pub user_id: String,
    pub action: ActionKind,
    pub entity_type: EntityKind,
    pub entity_id: String,
    pub entity_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_data: Option<Snapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_data: Option<Snapshot>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverted_at: Option<DateTime<Utc>>,
}

impl ActionRecord {
    pub fn is_reverted(&self) -> bool {
        self.reverted_at.is_some()
    }
}

/// Payload handed to the recorder: everything but the id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAction {
    pub user_id: String,
    pub action: ActionKind,
    pub entity_type: EntityKind,
    pub entity_id: String,
    pub entity_name: String,
    pub previous_data: Option<Snapshot>,
    pub new_data: Option<Snapshot>,
}

impl NewAction {
    /// A completed create; `created` is the entity as stored.
    pub fn created(user_id: impl Into<String>, created: Snapshot) -> Self {
        Self {
            user_id: user_id.into(),
            action: ActionKind::Create,
            entity_type: created.kind(),
            entity_id: created.id().to_string(),
            entity_name: created.display_name(),
            previous_data: None,
            new_data: Some(created),
        }
    }

    /// A completed update. The label is taken from the entity before the change.
    pub fn updated(user_id: impl Into<String>, before: Snapshot, after: Snapshot) -> Self {
        Self {
            user_id: user_id.into(),
            action: ActionKind::Update,
            entity_type: before.kind(),
            entity_id: before.id().to_string(),
            entity_name: before.display_name(),
            previous_data: Some(before),
            new_data: Some(after),
        }
    }

    /// A completed delete; `deleted` is the entity as it was just before removal.
    pub fn deleted(user_id: impl Into<String>, deleted: Snapshot) -> Self {
        Self {
            user_id: user_id.into(),
            action: ActionKind::Delete,
            entity_type: deleted.kind(),
            entity_id: deleted.id().to_string(),
            entity_name: deleted.display_name(),
            previous_data: Some(deleted),
            new_data: None,
        }
    }

    /// Stamp the payload into a full record.
    pub(crate) fn into_record(self, id: String, created_at: DateTime<Utc>) -> ActionRecord {
        ActionRecord {
            id,
            user_id: self.user_id,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            entity_name: self.entity_name,
            previous_data: self.previous_data,
            new_data: self.new_data,
            created_at,
            reverted_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::assets::Card;
    use crate::core::models::entity::{Entity, EntityMeta};

    fn card() -> Snapshot {
        Card {
            meta: EntityMeta {
                id: "c1".into(),
                ..EntityMeta::default()
            },
            identity_id: "i1".into(),
            last_four: "1234".into(),
            ..Card::default()
        }
        .into_snapshot()
    }

    #[test]
    fn created_carries_only_new_data() {
        let action = NewAction::created("u1", card());
        assert_eq!(action.action, ActionKind::Create);
        assert_eq!(action.entity_type, EntityKind::Card);
        assert_eq!(action.entity_id, "c1");
        assert_eq!(action.entity_name, "****1234");
        assert!(action.previous_data.is_none());
        assert!(action.new_data.is_some());
    }

    #[test]
    fn deleted_carries_only_previous_data() {
        let action = NewAction::deleted("", card());
        assert_eq!(action.action, ActionKind::Delete);
        assert!(action.previous_data.is_some());
        assert!(action.new_data.is_none());
        assert!(action.user_id.is_empty());
    }

    #[test]
    fn record_serializes_snake_case_tags() {
        let record = NewAction::created("u1", card()).into_record("r1".into(), Utc::now());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["action"], "create");
        assert_eq!(value["entity_type"], "card");
        assert!(value.get("reverted_at").is_none());
        assert!(value.get("previous_data").is_none());
    }
}
