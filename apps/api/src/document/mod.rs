//! The resume document model and everything that mutates or renders it.

pub mod handlers;
pub mod model;
pub mod patch;
pub mod preview;
pub mod reconcile;
pub mod theme;
