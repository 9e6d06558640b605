pub mod event_expiry_runner;
pub mod session_watcher;
