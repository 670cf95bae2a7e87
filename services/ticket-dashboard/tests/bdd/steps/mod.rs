//! BDD step definitions for the ticket dashboard

pub mod backend_steps;
pub mod bootstrap_steps;
pub mod chart_steps;
pub mod page_steps;
pub mod status_steps;
