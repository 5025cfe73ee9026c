use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::{Result, TrackerError};
use crate::core::models::assets::{Advertiser, Card, Identity, Order, PlatformAccount, Website};
use crate::core::models::entity::{Entity, EntityKind};
use crate::core::traits::entity_store::Collection;

/// The six collections, newest row first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tables {
    #[serde(default)]
    pub identities: Vec<Identity>,
    #[serde(default)]
    pub websites: Vec<Website>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub advertisers: Vec<Advertiser>,
    #[serde(default)]
    pub accounts: Vec<PlatformAccount>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Tables {
    fn contains(&self, kind: EntityKind, id: &str) -> bool {
        match kind {
            EntityKind::Identity => has_id(&self.identities, id),
            EntityKind::Website => has_id(&self.websites, id),
            EntityKind::Card => has_id(&self.cards, id),
            EntityKind::Advertiser => has_id(&self.advertisers, id),
            EntityKind::Account => has_id(&self.accounts, id),
            EntityKind::Order => has_id(&self.orders, id),
        }
    }

    /// First collection holding rows that point at `(kind, id)`, with their count.
    fn dependents(&self, kind: EntityKind, id: &str) -> Option<(EntityKind, usize)> {
        [
            count_refs(&self.identities, kind, id),
            count_refs(&self.websites, kind, id),
            count_refs(&self.cards, kind, id),
            count_refs(&self.advertisers, kind, id),
            count_refs(&self.accounts, kind, id),
            count_refs(&self.orders, kind, id),
        ]
        .into_iter()
        .flatten()
        .next()
    }
}

fn has_id<T: Entity>(rows: &[T], id: &str) -> bool {
    rows.iter().any(|r| r.id() == id)
}

fn count_refs<T: StoredEntity>(rows: &[T], kind: EntityKind, id: &str) -> Option<(EntityKind, usize)> {
    let count = rows
        .iter()
        .filter(|r| r.references().contains(&(kind, id)))
        .count();
    (count > 0).then_some((T::KIND, count))
}

/// Glue between an entity type and its table, plus the foreign keys it holds.
pub trait StoredEntity: Entity {
    fn table(tables: &Tables) -> &Vec<Self>;

    fn table_mut(tables: &mut Tables) -> &mut Vec<Self>;

    /// `(target kind, target id)` for every reference this row holds.
    fn references(&self) -> Vec<(EntityKind, &str)> {
        Vec::new()
    }
}

impl StoredEntity for Identity {
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.identities
    }

    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.identities
    }
}

impl StoredEntity for Website {
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.websites
    }

    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.websites
    }

    fn references(&self) -> Vec<(EntityKind, &str)> {
        self.identity_id
            .as_deref()
            .map(|id| (EntityKind::Identity, id))
            .into_iter()
            .collect()
    }
}

impl StoredEntity for Card {
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.cards
    }

    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.cards
    }

    fn references(&self) -> Vec<(EntityKind, &str)> {
        vec![(EntityKind::Identity, self.identity_id.as_str())]
    }
}

impl StoredEntity for Advertiser {
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.advertisers
    }

    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.advertisers
    }
}

impl StoredEntity for PlatformAccount {
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.accounts
    }

    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.accounts
    }

    fn references(&self) -> Vec<(EntityKind, &str)> {
        self.identity_id
            .as_deref()
            .map(|id| (EntityKind::Identity, id))
            .into_iter()
            .collect()
    }
}

impl StoredEntity for Order {
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.orders
    }

    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.orders
    }

    fn references(&self) -> Vec<(EntityKind, &str)> {
        let account = self.account_id.as_deref().map(|id| (EntityKind::Account, id));
        let advertiser = self
            .advertiser_id
            .as_deref()
            .map(|id| (EntityKind::Advertiser, id));
        account.into_iter().chain(advertiser).collect()
    }
}

/// Entity store kept entirely in memory.
///
/// Enforces the same rules a relational backend would: unique ids,
/// existing targets for every reference, and no deleting rows that are
/// still referenced.
#[derive(Debug, Default)]
pub struct MemoryEntityStore {
    tables: RwLock<Tables>,
}

impl MemoryEntityStore {
    pub fn from_tables(tables: Tables) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Copy of the current contents, for persisting.
    pub fn tables(&self) -> Tables {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_references<T: StoredEntity>(tables: &Tables, row: &T) -> Result<()> {
        for (target, id) in row.references() {
            if !tables.contains(target, id) {
                return Err(TrackerError::ReferenceNotFound {
                    kind: T::KIND,
                    target,
                    id: id.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl<T: StoredEntity> Collection<T> for MemoryEntityStore {
    fn create(&self, mut fields: T) -> Result<T> {
        let mut tables = self.write();

        let meta = fields.meta_mut();
        if meta.id.trim().is_empty() {
            meta.id = Uuid::new_v4().to_string();
        }
        let now = Utc::now();
        meta.created_at.get_or_insert(now);
        meta.updated_at.get_or_insert(now);

        if has_id(T::table(&tables), fields.id()) {
            return Err(TrackerError::EntityAlreadyExists {
                kind: T::KIND,
                id: fields.id().to_string(),
            });
        }
        Self::check_references(&tables, &fields)?;

        T::table_mut(&mut tables).insert(0, fields.clone());
        tracing::debug!(kind = %T::KIND, id = %fields.id(), "created entity");
        Ok(fields)
    }

    fn update(&self, id: &str, mut fields: T) -> Result<Option<T>> {
        let mut tables = self.write();

        let Some(pos) = T::table(&tables).iter().position(|r| r.id() == id) else {
            return Ok(None);
        };
        Self::check_references(&tables, &fields)?;

        let table = T::table_mut(&mut tables);
        let current = table[pos].meta().clone();
        let meta = fields.meta_mut();
        meta.id = current.id;
        meta.created_at = current.created_at;
        meta.created_by = current.created_by;
        meta.updated_at = Some(Utc::now());

        table[pos] = fields.clone();
        tracing::debug!(kind = %T::KIND, id = %id, "updated entity");
        Ok(Some(fields))
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let mut tables = self.write();

        if !has_id(T::table(&tables), id) {
            return Ok(false);
        }
        if let Some((dependent, count)) = tables.dependents(T::KIND, id) {
            return Err(TrackerError::ReferenceInUse {
                kind: T::KIND,
                id: id.to_string(),
                dependent,
                count,
            });
        }

        T::table_mut(&mut tables).retain(|r| r.id() != id);
        tracing::debug!(kind = %T::KIND, id = %id, "deleted entity");
        Ok(true)
    }

    fn get(&self, id: &str) -> Result<Option<T>> {
        Ok(T::table(&self.read()).iter().find(|r| r.id() == id).cloned())
    }

    fn list(&self) -> Result<Vec<T>> {
        Ok(T::table(&self.read()).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::entity::EntityMeta;

    fn identity(id: &str) -> Identity {
        Identity {
            meta: EntityMeta {
                id: id.into(),
                ..EntityMeta::default()
            },
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            country: "US".into(),
            ..Identity::default()
        }
    }

    fn card(id: &str, identity_id: &str) -> Card {
        Card {
            meta: EntityMeta {
                id: id.into(),
                ..EntityMeta::default()
            },
            identity_id: identity_id.into(),
            last_four: "4242".into(),
            expiry_month: 4,
            expiry_year: 2030,
            card_holder: "Jane Doe".into(),
            ..Card::default()
        }
    }

    #[test]
    fn create_keeps_supplied_id_and_stamps_times() {
        let store = MemoryEntityStore::default();
        let created = Collection::<Identity>::create(&store, identity("i1")).unwrap();

        assert_eq!(created.meta.id, "i1");
        assert!(created.meta.created_at.is_some());
        assert!(created.meta.updated_at.is_some());
    }

    #[test]
    fn create_generates_id_when_missing() {
        let store = MemoryEntityStore::default();
        let created = Collection::<Identity>::create(&store, identity("")).unwrap();
        assert!(!created.meta.id.is_empty());
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let store = MemoryEntityStore::default();
        Collection::<Identity>::create(&store, identity("i1")).unwrap();
        let err = Collection::<Identity>::create(&store, identity("i1")).unwrap_err();
        assert!(matches!(err, TrackerError::EntityAlreadyExists { .. }));
    }

    #[test]
    fn list_is_newest_first() {
        let store = MemoryEntityStore::default();
        Collection::<Identity>::create(&store, identity("i1")).unwrap();
        Collection::<Identity>::create(&store, identity("i2")).unwrap();

        let rows: Vec<Identity> = store.list().unwrap();
        assert_eq!(rows[0].meta.id, "i2");
        assert_eq!(rows[1].meta.id, "i1");
    }

    #[test]
    fn card_requires_existing_identity() {
        let store = MemoryEntityStore::default();
        let err = Collection::<Card>::create(&store, card("c1", "ghost")).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::ReferenceNotFound {
                target: EntityKind::Identity,
                ..
            }
        ));
    }

    #[test]
    fn update_preserves_bookkeeping_columns() {
        let store = MemoryEntityStore::default();
        let created = Collection::<Identity>::create(&store, identity("i1")).unwrap();

        let mut changed = identity("other");
        changed.name = "Janet".into();
        let updated = Collection::<Identity>::update(&store, "i1", changed)
            .unwrap()
            .unwrap();

        assert_eq!(updated.meta.id, "i1");
        assert_eq!(updated.meta.created_at, created.meta.created_at);
        assert_eq!(updated.name, "Janet");
    }

    #[test]
    fn update_unknown_id_returns_none() {
        let store = MemoryEntityStore::default();
        let result = Collection::<Identity>::update(&store, "nope", identity("nope")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn delete_referenced_identity_is_refused() {
        let store = MemoryEntityStore::default();
        Collection::<Identity>::create(&store, identity("i1")).unwrap();
        Collection::<Card>::create(&store, card("c1", "i1")).unwrap();

        let err = Collection::<Identity>::delete(&store, "i1").unwrap_err();
        assert!(matches!(
            err,
            TrackerError::ReferenceInUse {
                dependent: EntityKind::Card,
                count: 1,
                ..
            }
        ));

        assert!(Collection::<Card>::delete(&store, "c1").unwrap());
        assert!(Collection::<Identity>::delete(&store, "i1").unwrap());
    }

    #[test]
    fn delete_unknown_id_returns_false() {
        let store = MemoryEntityStore::default();
        assert!(!Collection::<Order>::delete(&store, "o1").unwrap());
    }

    #[test]
    fn order_references_are_checked() {
        let store = MemoryEntityStore::default();
        let order = Order {
            platform_id: "clickbank".into(),
            order_number: "X1".into(),
            advertiser_id: Some("adv-missing".into()),
            ..Order::default()
        };
        let err = Collection::<Order>::create(&store, order).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::ReferenceNotFound {
                target: EntityKind::Advertiser,
                ..
            }
        ));
    }

    #[test]
    fn delete_refused_for_every_referenced_kind() {
        let store = MemoryEntityStore::default();
        Collection::<Identity>::create(&store, identity("i1")).unwrap();
        Collection::<Website>::create(
            &store,
            Website {
                meta: EntityMeta {
                    id: "w1".into(),
                    ..EntityMeta::default()
                },
                name: "Deals Hub".into(),
                url: "https://deals.example".into(),
                identity_id: Some("i1".into()),
                ..Website::default()
            },
        )
        .unwrap();
        Collection::<Advertiser>::create(
            &store,
            Advertiser {
                meta: EntityMeta {
                    id: "a1".into(),
                    ..EntityMeta::default()
                },
                platform_id: "clickbank".into(),
                name: "Acme Offers".into(),
                ..Advertiser::default()
            },
        )
        .unwrap();
        Collection::<Order>::create(
            &store,
            Order {
                platform_id: "clickbank".into(),
                order_number: "X2".into(),
                advertiser_id: Some("a1".into()),
                ..Order::default()
            },
        )
        .unwrap();

        let err = Collection::<Identity>::delete(&store, "i1").unwrap_err();
        assert!(matches!(
            err,
            TrackerError::ReferenceInUse {
                dependent: EntityKind::Website,
                count: 1,
                ..
            }
        ));

        let err = Collection::<Advertiser>::delete(&store, "a1").unwrap_err();
        assert!(matches!(
            err,
            TrackerError::ReferenceInUse {
                dependent: EntityKind::Order,
                ..
            }
        ));
    }
}
