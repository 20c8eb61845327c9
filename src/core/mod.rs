pub mod add;
pub mod backup;
pub mod charts;
pub mod log;
pub mod predict;
