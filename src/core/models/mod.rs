pub mod action_record;
pub mod assets;
pub mod entity;
pub mod list_filter;
pub mod overview;
pub mod snapshot;
