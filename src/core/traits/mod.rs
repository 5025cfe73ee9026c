pub mod entity_store;
pub mod history_store;
