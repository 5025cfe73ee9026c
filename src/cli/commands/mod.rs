pub mod add;
pub mod delete;
pub mod export;
pub mod history;
pub mod init;
pub mod list;
pub mod reminders;
pub mod session_helpers;
pub mod show;
pub mod stats;
pub mod undo;
pub mod update;
