pub mod cache;
pub mod date;
pub mod validation;
