pub mod integration;
pub mod statistics;
