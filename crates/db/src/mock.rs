//! `mockall` doubles of the repository traits, for tests in dependent crates.

pub mod repositories;
