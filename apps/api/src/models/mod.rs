pub mod account;
pub mod transformation;
