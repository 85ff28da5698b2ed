//! Foundation module - logging and other process-wide utilities

pub mod logging;
