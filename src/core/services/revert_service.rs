use crate::core::errors::{Result, TrackerError};
use crate::core::models::action_record::{ActionKind, ActionRecord};
use crate::core::models::assets::{Advertiser, Card, Identity, Order, PlatformAccount, Website};
use crate::core::models::entity::{Entity, EntityKind};
use crate::core::models::snapshot::Snapshot;
use crate::core::services::action_log::ActionLog;
use crate::core::traits::entity_store::{Collection, EntityStore};

/// What the inverse mutation did to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum RevertOutcome {
    /// A deleted entity was created again. The id may differ from the
    /// original if the store had to assign a new one.
    Recreated { entity_id: String },
    /// An updated entity got its previous fields back.
    Restored { entity_id: String },
    /// A created entity was removed.
    Removed { entity_id: String },
}

/// Applies the inverse of a recorded action against an `EntityStore`.
///
/// | action | inverse             | snapshot        |
/// |--------|---------------------|-----------------|
/// | delete | create from fields  | `previous_data` |
/// | update | overwrite fields    | `previous_data` |
/// | create | delete by id        | none            |
pub struct RevertService<'a, S: EntityStore> {
    pub store: &'a S,
}

impl<'a, S: EntityStore> RevertService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Mark `id` reverted in the log, then apply its inverse.
    ///
    /// The mark is not rolled back if the store rejects the inverse; the
    /// error is returned and the entry stays reverted.
    pub fn undo(&self, log: &ActionLog, id: &str) -> Result<(ActionRecord, RevertOutcome)> {
        self.undo_with(log, id, |_| Ok(()))
    }

    /// Like [`undo`](Self::undo), but runs `persist_mark` between marking and
    /// applying. When it fails the inverse is never applied, so a mark that
    /// was not saved cannot leave the store already reverted.
    pub fn undo_with<F>(
        &self,
        log: &ActionLog,
        id: &str,
        persist_mark: F,
    ) -> Result<(ActionRecord, RevertOutcome)>
    where
        F: FnOnce(&ActionRecord) -> Result<()>,
    {
        let record = log.revert(id)?;
        persist_mark(&record)?;

        match self.apply(&record) {
            Ok(outcome) => {
                tracing::info!(
                    id = %record.id,
                    action = %record.action,
                    entity_type = %record.entity_type,
                    entity_id = %record.entity_id,
                    "action reverted"
                );
                Ok((record, outcome))
            }
            Err(e) => {
                tracing::warn!(
                    id = %record.id,
                    entity_type = %record.entity_type,
                    entity_id = %record.entity_id,
                    error = %e,
                    "history entry marked reverted but inverse mutation failed"
                );
                Err(e)
            }
        }
    }

    /// Apply the inverse mutation for an already-marked record.
    ///
    /// Any failure is reported as `InverseApplyFailed`.
    pub fn apply(&self, record: &ActionRecord) -> Result<RevertOutcome> {
        self.dispatch(record)
            .map_err(|e| TrackerError::InverseApplyFailed {
                kind: record.entity_type,
                id: record.entity_id.clone(),
                reason: e.to_string(),
            })
    }

    fn dispatch(&self, record: &ActionRecord) -> Result<RevertOutcome> {
        match record.action {
            ActionKind::Delete => {
                let snapshot = self.previous_snapshot(record)?;
                let entity_id = self.recreate(snapshot)?;
                Ok(RevertOutcome::Recreated { entity_id })
            }
            ActionKind::Update => {
                let snapshot = self.previous_snapshot(record)?;
                self.restore(&record.entity_id, snapshot)?;
                Ok(RevertOutcome::Restored {
                    entity_id: record.entity_id.clone(),
                })
            }
            ActionKind::Create => {
                self.remove(record.entity_type, &record.entity_id)?;
                Ok(RevertOutcome::Removed {
                    entity_id: record.entity_id.clone(),
                })
            }
        }
    }

    fn previous_snapshot<'r>(&self, record: &'r ActionRecord) -> Result<&'r Snapshot> {
        let snapshot = record
            .previous_data
            .as_ref()
            .ok_or_else(|| TrackerError::MissingSnapshot {
                action: record.action,
                kind: record.entity_type,
                id: record.entity_id.clone(),
            })?;

        if snapshot.kind() != record.entity_type {
            return Err(TrackerError::SnapshotMismatch {
                expected: record.entity_type,
                found: snapshot.kind(),
            });
        }
        Ok(snapshot)
    }

    fn recreate(&self, snapshot: &Snapshot) -> Result<String> {
        fn create<T: Entity, C: Collection<T> + ?Sized>(store: &C, row: &T) -> Result<String> {
            Ok(store.create(row.clone())?.id().to_string())
        }

        match snapshot {
            Snapshot::Identity(e) => create::<Identity, _>(self.store, e),
            Snapshot::Website(e) => create::<Website, _>(self.store, e),
            Snapshot::Card(e) => create::<Card, _>(self.store, e),
            Snapshot::Advertiser(e) => create::<Advertiser, _>(self.store, e),
            Snapshot::Account(e) => create::<PlatformAccount, _>(self.store, e),
            Snapshot::Order(e) => create::<Order, _>(self.store, e),
        }
    }

    fn restore(&self, entity_id: &str, snapshot: &Snapshot) -> Result<()> {
        fn update<T: Entity, C: Collection<T> + ?Sized>(store: &C, id: &str, row: &T) -> Result<()> {
            store
                .update(id, row.clone())?
                .map(|_| ())
                .ok_or_else(|| TrackerError::EntityNotFound {
                    kind: T::KIND,
                    id: id.to_string(),
                })
        }

        match snapshot {
            Snapshot::Identity(e) => update::<Identity, _>(self.store, entity_id, e),
            Snapshot::Website(e) => update::<Website, _>(self.store, entity_id, e),
            Snapshot::Card(e) => update::<Card, _>(self.store, entity_id, e),
            Snapshot::Advertiser(e) => update::<Advertiser, _>(self.store, entity_id, e),
            Snapshot::Account(e) => update::<PlatformAccount, _>(self.store, entity_id, e),
            Snapshot::Order(e) => update::<Order, _>(self.store, entity_id, e),
        }
    }

    fn remove(&self, kind: EntityKind, entity_id: &str) -> Result<()> {
        fn delete<T: Entity, C: Collection<T> + ?Sized>(store: &C, id: &str) -> Result<()> {
            if store.delete(id)? {
                Ok(())
            } else {
                Err(TrackerError::EntityNotFound {
                    kind: T::KIND,
                    id: id.to_string(),
                })
            }
        }

        match kind {
            EntityKind::Identity => delete::<Identity, _>(self.store, entity_id),
            EntityKind::Website => delete::<Website, _>(self.store, entity_id),
            EntityKind::Card => delete::<Card, _>(self.store, entity_id),
            EntityKind::Advertiser => delete::<Advertiser, _>(self.store, entity_id),
            EntityKind::Account => delete::<PlatformAccount, _>(self.store, entity_id),
            EntityKind::Order => delete::<Order, _>(self.store, entity_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stores::memory_store::MemoryEntityStore;
    use crate::core::models::action_record::NewAction;
    use crate::core::models::assets::{IdentityStatus, OrderStatus};
    use crate::core::models::entity::EntityMeta;
    use crate::core::services::asset_service::AssetService;
    use serde_json::json;

    fn meta(id: &str) -> EntityMeta {
        EntityMeta {
            id: id.into(),
            ..EntityMeta::default()
        }
    }

    fn jane() -> Identity {
        Identity {
            meta: meta("i1"),
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            country: "US".into(),
            status: IdentityStatus::Active,
            ..Identity::default()
        }
    }

    fn order(id: &str) -> Order {
        Order {
            meta: meta(id),
            platform_id: "clickbank".into(),
            order_number: "X1".into(),
            amount: 49.0,
            order_date: "2026-02-14".into(),
            ..Order::default()
        }
    }

    #[test]
    fn delete_revert_recreates_identity() {
        let store = MemoryEntityStore::default();
        let log = ActionLog::default();

        let stored = Collection::<Identity>::create(&store, jane()).unwrap();
        Collection::<Identity>::delete(&store, "i1").unwrap();
        let id = log.record(NewAction::deleted("u1", stored.clone().into_snapshot()));

        let (record, outcome) = RevertService::new(&store).undo(&log, &id).unwrap();

        assert_eq!(record.entity_name, "Jane Doe");
        assert_eq!(
            outcome,
            RevertOutcome::Recreated {
                entity_id: "i1".into()
            }
        );
        let back: Identity = store.get("i1").unwrap().unwrap();
        assert_eq!(back, stored);
        assert!(log.list().is_empty());
    }

    #[test]
    fn update_revert_restores_previous_fields() {
        let store = MemoryEntityStore::default();
        let log = ActionLog::default();

        let before = Collection::<Identity>::create(&store, jane()).unwrap();
        let mut burned = before.clone();
        burned.status = IdentityStatus::Burned;
        let after = Collection::<Identity>::update(&store, "i1", burned)
            .unwrap()
            .unwrap();
        let id = log.record(NewAction::updated(
            "u1",
            before.into_snapshot(),
            after.into_snapshot(),
        ));

        let (_, outcome) = RevertService::new(&store).undo(&log, &id).unwrap();

        assert!(matches!(outcome, RevertOutcome::Restored { .. }));
        let current: Identity = store.get("i1").unwrap().unwrap();
        assert_eq!(current.status, IdentityStatus::Active);
    }

    #[test]
    fn create_revert_removes_order() {
        let store = MemoryEntityStore::default();
        let log = ActionLog::default();

        let created = Collection::<Order>::create(&store, order("o9")).unwrap();
        let id = log.record(NewAction::created("", created.into_snapshot()));

        let (_, outcome) = RevertService::new(&store).undo(&log, &id).unwrap();

        assert_eq!(
            outcome,
            RevertOutcome::Removed {
                entity_id: "o9".into()
            }
        );
        let gone: Option<Order> = store.get("o9").unwrap();
        assert!(gone.is_none());
    }

    #[test]
    fn undo_of_unknown_id_is_not_revertible() {
        let store = MemoryEntityStore::default();
        let log = ActionLog::default();

        let err = RevertService::new(&store).undo(&log, "missing").unwrap_err();
        assert!(matches!(err, TrackerError::NotRevertible { .. }));
    }

    #[test]
    fn second_undo_is_not_revertible() {
        let store = MemoryEntityStore::default();
        let log = ActionLog::default();
        let created = Collection::<Order>::create(&store, order("o1")).unwrap();
        let id = log.record(NewAction::created("", created.into_snapshot()));

        let service = RevertService::new(&store);
        service.undo(&log, &id).unwrap();
        let err = service.undo(&log, &id).unwrap_err();

        assert!(matches!(err, TrackerError::NotRevertible { .. }));
    }

    #[test]
    fn failed_inverse_keeps_entry_reverted() {
        let store = MemoryEntityStore::default();
        let log = ActionLog::default();

        // Card deleted, then its owner deleted too: recreating the card must fail.
        Collection::<Identity>::create(&store, jane()).unwrap();
        let card = Collection::<Card>::create(
            &store,
            Card {
                meta: meta("c1"),
                identity_id: "i1".into(),
                last_four: "4242".into(),
                expiry_month: 1,
                expiry_year: 2031,
                card_holder: "Jane Doe".into(),
                ..Card::default()
            },
        )
        .unwrap();
        Collection::<Card>::delete(&store, "c1").unwrap();
        let id = log.record(NewAction::deleted("u1", card.into_snapshot()));
        Collection::<Identity>::delete(&store, "i1").unwrap();

        let err = RevertService::new(&store).undo(&log, &id).unwrap_err();

        assert!(matches!(
            err,
            TrackerError::InverseApplyFailed {
                kind: EntityKind::Card,
                ..
            }
        ));
        assert!(log.list().is_empty());
        assert!(log.all()[0].reverted_at.is_some());
    }

    #[test]
    fn update_revert_on_vanished_entity_fails() {
        let store = MemoryEntityStore::default();
        let log = ActionLog::default();

        let before = order("o2");
        let mut after = before.clone();
        after.status = OrderStatus::Refunded;
        let id = log.record(NewAction::updated(
            "",
            before.into_snapshot(),
            after.into_snapshot(),
        ));

        let err = RevertService::new(&store).undo(&log, &id).unwrap_err();
        assert!(matches!(err, TrackerError::InverseApplyFailed { .. }));
    }

    #[test]
    fn delete_record_without_snapshot_is_rejected() {
        let store = MemoryEntityStore::default();
        let mut record = NewAction::deleted("", jane().into_snapshot())
            .into_record("r1".into(), chrono::Utc::now());
        record.previous_data = None;

        let err = RevertService::new(&store).apply(&record).unwrap_err();
        let TrackerError::InverseApplyFailed { reason, .. } = err else {
            panic!("expected InverseApplyFailed");
        };
        assert!(reason.contains("no previous snapshot"));
    }

    #[test]
    fn snapshot_kind_must_match_entity_type() {
        let store = MemoryEntityStore::default();
        let mut record = NewAction::deleted("", jane().into_snapshot())
            .into_record("r1".into(), chrono::Utc::now());
        record.entity_type = EntityKind::Website;

        let err = RevertService::new(&store).apply(&record).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::InverseApplyFailed {
                kind: EntityKind::Website,
                ..
            }
        ));
        let untouched: Vec<Identity> = store.list().unwrap();
        assert!(untouched.is_empty());
    }

    #[test]
    fn failed_mark_persist_skips_inverse() {
        let store = MemoryEntityStore::default();
        let log = ActionLog::default();
        let created = Collection::<Order>::create(&store, order("o3")).unwrap();
        let id = log.record(NewAction::created("", created.into_snapshot()));

        let err = RevertService::new(&store)
            .undo_with(&log, &id, |_| {
                Err(TrackerError::HistoryError {
                    detail: "disk full".into(),
                })
            })
            .unwrap_err();

        assert!(matches!(err, TrackerError::HistoryError { .. }));
        let still_there: Option<Order> = store.get("o3").unwrap();
        assert!(still_there.is_some());
    }

    #[test]
    fn every_kind_reverts_create_update_and_delete() {
        let cases = [
            (
                EntityKind::Identity,
                json!({ "id": "i5", "name": "Mark Lee", "email": "mark@example.com", "country": "CA" }),
            ),
            (
                EntityKind::Website,
                json!({ "id": "w1", "name": "Deals Hub", "url": "https://deals.example.com", "identity_id": "i0" }),
            ),
            (
                EntityKind::Card,
                json!({
                    "id": "c1", "identity_id": "i0", "last_four": "4242",
                    "expiry_month": 3, "expiry_year": 2030, "card_holder": "Jane Doe"
                }),
            ),
            (
                EntityKind::Advertiser,
                json!({ "id": "a1", "platform_id": "maxbounty", "name": "Acme Offers", "commission_rate": 12.5 }),
            ),
            (
                EntityKind::Account,
                json!({
                    "id": "p1", "platform_id": "maxbounty", "identity_id": "i0",
                    "account_name": "jane_mb", "account_email": "jane.mb@example.com"
                }),
            ),
            (
                EntityKind::Order,
                json!({
                    "id": "o1", "platform_id": "maxbounty", "order_number": "MB-1001",
                    "amount": 89.5, "order_date": "2026-03-01"
                }),
            ),
        ];

        for (kind, fields) in cases {
            let store = MemoryEntityStore::default();
            let log = ActionLog::default();
            Collection::<Identity>::create(
                &store,
                Identity {
                    meta: meta("i0"),
                    ..jane()
                },
            )
            .unwrap();

            let assets = AssetService::new(&store, &log, "u1");
            let reverts = RevertService::new(&store);

            let created = assets
                .create(Snapshot::from_json(kind, fields).unwrap())
                .unwrap();
            let entity_id = created.id().to_string();
            let create_action = log.list()[0].id.clone();

            // update -> restore
            assets
                .patch(kind, &entity_id, &json!({ "notes": "flagged" }))
                .unwrap();
            let update_action = log.list()[0].id.clone();
            let (_, outcome) = reverts.undo(&log, &update_action).unwrap();
            assert_eq!(
                outcome,
                RevertOutcome::Restored {
                    entity_id: entity_id.clone()
                },
                "{kind}"
            );
            let restored = assets.get(kind, &entity_id).unwrap().unwrap();
            assert!(restored.to_fields().unwrap().get("notes").is_none(), "{kind}");

            // delete -> recreate
            assets.delete(kind, &entity_id).unwrap();
            let delete_action = log.list()[0].id.clone();
            let (_, outcome) = reverts.undo(&log, &delete_action).unwrap();
            assert_eq!(
                outcome,
                RevertOutcome::Recreated {
                    entity_id: entity_id.clone()
                },
                "{kind}"
            );
            let recreated = assets.get(kind, &entity_id).unwrap().unwrap();
            assert_eq!(recreated.kind(), kind);
            assert_eq!(recreated.display_name(), created.display_name(), "{kind}");

            // create -> remove
            let (_, outcome) = reverts.undo(&log, &create_action).unwrap();
            assert_eq!(
                outcome,
                RevertOutcome::Removed {
                    entity_id: entity_id.clone()
                },
                "{kind}"
            );
            assert!(assets.get(kind, &entity_id).unwrap().is_none(), "{kind}");
            assert!(log.list().is_empty(), "{kind}");
        }
    }
}
