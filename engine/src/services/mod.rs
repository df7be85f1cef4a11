// Report assembly for the order dashboard
pub mod dashboard;

pub use dashboard::{DashboardReport, Distribution};
