pub mod demand;
pub mod reporting;
