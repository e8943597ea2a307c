//! Core page logic, independent of how pages are displayed.

pub mod models;
pub mod services;
