pub mod json_history_file;
