//! Budget accounting infrastructure

mod service;

pub use service::{BudgetService, BudgetServiceTrait};
