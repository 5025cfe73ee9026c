pub mod action_log;
pub mod asset_service;
pub mod export_service;
pub mod revert_service;
pub mod validation_service;
