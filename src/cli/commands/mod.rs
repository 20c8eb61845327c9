pub mod add;
pub mod backup;
pub mod charts;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod metrics;
pub mod report;
