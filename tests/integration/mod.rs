//! Integration test modules for ampslot

pub mod config;
pub mod lifecycle;
pub mod models;
pub mod processing;
