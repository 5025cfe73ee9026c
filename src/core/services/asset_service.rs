use chrono::{Duration, NaiveDate};

use crate::core::errors::{Result, TrackerError};
use crate::core::models::action_record::NewAction;
use crate::core::models::assets::{
    Advertiser, Card, CardStatus, Identity, IdentityStatus, Order, OrderStatus, PlatformAccount,
    Website, WebsiteStatus,
};
use crate::core::models::entity::{Entity, EntityKind};
use crate::core::models::list_filter::ListFilter;
use crate::core::models::overview::OverviewStats;
use crate::core::models::snapshot::Snapshot;
use crate::core::services::action_log::ActionLog;
use crate::core::services::validation_service::ValidationService;
use crate::core::traits::entity_store::{Collection, EntityStore};

/// Performs user-initiated mutations and records each one in the history.
///
/// An action is recorded only after the store accepted the mutation.
pub struct AssetService<'a, S: EntityStore> {
    pub store: &'a S,
    pub log: &'a ActionLog,
    pub user_id: String,
}

impl<'a, S: EntityStore> AssetService<'a, S> {
    pub fn new(store: &'a S, log: &'a ActionLog, user_id: impl Into<String>) -> Self {
        Self {
            store,
            log,
            user_id: user_id.into(),
        }
    }

    /// Create an entity and record a `create` action.
    pub fn create(&self, mut fields: Snapshot) -> Result<Snapshot> {
        ValidationService.validate(&fields)?;
        stamp_creator(&mut fields, &self.user_id);

        let created = match fields {
            Snapshot::Identity(e) => create_in(self.store, e)?,
            Snapshot::Website(e) => create_in(self.store, e)?,
            Snapshot::Card(e) => create_in(self.store, e)?,
            Snapshot::Advertiser(e) => create_in(self.store, e)?,
            Snapshot::Account(e) => create_in(self.store, e)?,
            Snapshot::Order(e) => create_in(self.store, e)?,
        };

        self.log
            .record(NewAction::created(self.user_id.clone(), created.clone()));
        Ok(created)
    }

    /// Overwrite an entity's fields and record an `update` action.
    pub fn update(&self, id: &str, fields: Snapshot) -> Result<Snapshot> {
        let kind = fields.kind();
        let before = self.get(kind, id)?.ok_or_else(|| TrackerError::EntityNotFound {
            kind,
            id: id.to_string(),
        })?;
        ValidationService.validate(&fields)?;

        let updated = match fields {
            Snapshot::Identity(e) => update_in(self.store, id, e)?,
            Snapshot::Website(e) => update_in(self.store, id, e)?,
            Snapshot::Card(e) => update_in(self.store, id, e)?,
            Snapshot::Advertiser(e) => update_in(self.store, id, e)?,
            Snapshot::Account(e) => update_in(self.store, id, e)?,
            Snapshot::Order(e) => update_in(self.store, id, e)?,
        };

        self.log.record(NewAction::updated(
            self.user_id.clone(),
            before,
            updated.clone(),
        ));
        Ok(updated)
    }

    /// Apply a partial JSON object to an entity, then update it.
    pub fn patch(&self, kind: EntityKind, id: &str, patch: &serde_json::Value) -> Result<Snapshot> {
        let current = self.get(kind, id)?.ok_or_else(|| TrackerError::EntityNotFound {
            kind,
            id: id.to_string(),
        })?;
        self.update(id, current.merged(patch)?)
    }

    /// Delete an entity and record a `delete` action holding its last state.
    pub fn delete(&self, kind: EntityKind, id: &str) -> Result<Snapshot> {
        let before = self.get(kind, id)?.ok_or_else(|| TrackerError::EntityNotFound {
            kind,
            id: id.to_string(),
        })?;

        let deleted = match kind {
            EntityKind::Identity => Collection::<Identity>::delete(self.store, id)?,
            EntityKind::Website => Collection::<Website>::delete(self.store, id)?,
            EntityKind::Card => Collection::<Card>::delete(self.store, id)?,
            EntityKind::Advertiser => Collection::<Advertiser>::delete(self.store, id)?,
            EntityKind::Account => Collection::<PlatformAccount>::delete(self.store, id)?,
            EntityKind::Order => Collection::<Order>::delete(self.store, id)?,
        };
        if !deleted {
            return Err(TrackerError::EntityNotFound {
                kind,
                id: id.to_string(),
            });
        }

        self.log
            .record(NewAction::deleted(self.user_id.clone(), before.clone()));
        Ok(before)
    }

    /// Look up any entity by kind and id.
    pub fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Snapshot>> {
        Ok(match kind {
            EntityKind::Identity => get_in::<Identity, _>(self.store, id)?,
            EntityKind::Website => get_in::<Website, _>(self.store, id)?,
            EntityKind::Card => get_in::<Card, _>(self.store, id)?,
            EntityKind::Advertiser => get_in::<Advertiser, _>(self.store, id)?,
            EntityKind::Account => get_in::<PlatformAccount, _>(self.store, id)?,
            EntityKind::Order => get_in::<Order, _>(self.store, id)?,
        })
    }

    /// Every entity of one kind, newest first.
    pub fn list(&self, kind: EntityKind) -> Result<Vec<Snapshot>> {
        Ok(match kind {
            EntityKind::Identity => list_in::<Identity, _>(self.store)?,
            EntityKind::Website => list_in::<Website, _>(self.store)?,
            EntityKind::Card => list_in::<Card, _>(self.store)?,
            EntityKind::Advertiser => list_in::<Advertiser, _>(self.store)?,
            EntityKind::Account => list_in::<PlatformAccount, _>(self.store)?,
            EntityKind::Order => list_in::<Order, _>(self.store)?,
        })
    }

    /// Entities of one kind that pass `filter`, newest first.
    ///
    /// Cards are matched against their owner's name as well.
    pub fn list_filtered(&self, kind: EntityKind, filter: &ListFilter) -> Result<Vec<Snapshot>> {
        let rows = self.list(kind)?;
        if filter.is_empty() {
            return Ok(rows);
        }

        let mut kept = Vec::with_capacity(rows.len());
        for row in rows {
            let owner = match &row {
                Snapshot::Card(card) => Collection::<Identity>::get(self.store, &card.identity_id)?
                    .map(|identity| identity.name),
                _ => None,
            };
            if filter.matches(&row, owner.as_deref()) {
                kept.push(row);
            }
        }
        Ok(kept)
    }

    /// Orders whose refund reminder falls within `days` of `today`
    /// (inclusive), soonest first. Refunded orders and unparseable dates
    /// are skipped.
    pub fn refund_reminders(&self, today: NaiveDate, days: i64) -> Result<Vec<Order>> {
        let until = today + Duration::days(days.max(0));
        let mut due: Vec<(NaiveDate, Order)> = Collection::<Order>::list(self.store)?
            .into_iter()
            .filter(|order| order.status != OrderStatus::Refunded)
            .filter_map(|order| {
                let date = reminder_date(order.refund_reminder_date.as_deref()?)?;
                Some((date, order))
            })
            .filter(|(date, _)| (today..=until).contains(date))
            .collect();

        due.sort_by_key(|(date, _)| *date);
        Ok(due.into_iter().map(|(_, order)| order).collect())
    }

    /// Counts and totals for the overview screen.
    pub fn overview(&self, today: NaiveDate) -> Result<OverviewStats> {
        let identities: Vec<Identity> = Collection::<Identity>::list(self.store)?;
        let websites: Vec<Website> = Collection::<Website>::list(self.store)?;
        let cards: Vec<Card> = Collection::<Card>::list(self.store)?;
        let orders: Vec<Order> = Collection::<Order>::list(self.store)?;

        let week_out = today + Duration::days(7);
        let completed = || orders.iter().filter(|o| o.status == OrderStatus::Completed);

        Ok(OverviewStats {
            identities: identities.len(),
            active_identities: identities
                .iter()
                .filter(|i| i.status == IdentityStatus::Active)
                .count(),
            burned_identities: identities
                .iter()
                .filter(|i| i.status == IdentityStatus::Burned)
                .count(),
            websites: websites.len(),
            active_websites: websites
                .iter()
                .filter(|w| w.status == WebsiteStatus::Active)
                .count(),
            cards: cards.len(),
            active_cards: cards
                .iter()
                .filter(|c| c.status == CardStatus::Active)
                .count(),
            orders: orders.len(),
            pending_orders: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            completed_revenue: completed().map(|o| o.amount).sum(),
            completed_commission: completed().filter_map(|o| o.commission).sum(),
            reminders_due: orders
                .iter()
                .filter(|o| o.status != OrderStatus::Refunded)
                .filter_map(|o| reminder_date(o.refund_reminder_date.as_deref()?))
                .filter(|date| *date <= week_out)
                .count(),
        })
    }
}

/// Reminder dates are stored as `YYYY-MM-DD`, optionally followed by a time.
fn reminder_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.get(..10)?, "%Y-%m-%d").ok()
}

fn stamp_creator(fields: &mut Snapshot, user_id: &str) {
    let meta = match fields {
        Snapshot::Identity(e) => e.meta_mut(),
        Snapshot::Website(e) => e.meta_mut(),
        Snapshot::Card(e) => e.meta_mut(),
        Snapshot::Advertiser(e) => e.meta_mut(),
        Snapshot::Account(e) => e.meta_mut(),
        Snapshot::Order(e) => e.meta_mut(),
    };
    if meta.created_by.is_empty() {
        meta.created_by = user_id.to_string();
    }
}

fn create_in<T: Entity, C: Collection<T> + ?Sized>(store: &C, row: T) -> Result<Snapshot> {
    Ok(store.create(row)?.into_snapshot())
}

fn update_in<T: Entity, C: Collection<T> + ?Sized>(store: &C, id: &str, row: T) -> Result<Snapshot> {
    store
        .update(id, row)?
        .map(T::into_snapshot)
        .ok_or_else(|| TrackerError::EntityNotFound {
            kind: T::KIND,
            id: id.to_string(),
        })
}

fn get_in<T: Entity, C: Collection<T> + ?Sized>(store: &C, id: &str) -> Result<Option<Snapshot>> {
    Ok(store.get(id)?.map(T::into_snapshot))
}

fn list_in<T: Entity, C: Collection<T> + ?Sized>(store: &C) -> Result<Vec<Snapshot>> {
    Ok(store.list()?.into_iter().map(T::into_snapshot).collect())
}
