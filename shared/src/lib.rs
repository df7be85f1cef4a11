pub mod models;
pub mod utils;

// Models and formatting helpers shared by the metrics engine and whatever
// renders its output. No computation lives here beyond field access.
