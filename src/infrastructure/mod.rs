//! Infrastructure layer - Record store backends and service implementations

pub mod budget;
pub mod logging;
pub mod metrics;
pub mod storage;
pub mod trip;
pub mod unwired;
pub mod user;
pub mod vehicle;
