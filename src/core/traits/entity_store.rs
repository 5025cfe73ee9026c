use crate::core::errors::Result;
use crate::core::models::assets::{Advertiser, Card, Identity, Order, PlatformAccount, Website};
use crate::core::models::entity::Entity;

/// Port for one typed collection of the entity store.
///
/// Implementations live in `adapters::stores` (e.g. MemoryEntityStore,
/// JsonFileStore). The core layer only depends on this trait.
pub trait Collection<T: Entity>: Send + Sync {
    /// Insert a new row and return it as stored (id and timestamps filled in).
    fn create(&self, fields: T) -> Result<T>;

    /// Replace the fields of an existing row. Returns `None` if `id` is unknown.
    fn update(&self, id: &str, fields: T) -> Result<Option<T>>;

    /// Remove a row. Returns `false` if `id` is unknown.
    fn delete(&self, id: &str) -> Result<bool>;

    /// Look up a row by id.
    fn get(&self, id: &str) -> Result<Option<T>>;

    /// All rows, newest first.
    fn list(&self) -> Result<Vec<T>>;
}

/// The full entity store: one collection per tracked schema.
pub trait EntityStore:
    Collection<Identity>
    + Collection<Website>
    + Collection<Card>
    + Collection<Advertiser>
    + Collection<PlatformAccount>
    + Collection<Order>
{
}

impl<S> EntityStore for S where
    S: Collection<Identity>
        + Collection<Website>
        + Collection<Card>
        + Collection<Advertiser>
        + Collection<PlatformAccount>
        + Collection<Order>
{
}
