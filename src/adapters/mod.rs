pub mod dir_lock;
pub mod history;
pub mod stores;
