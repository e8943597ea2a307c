//! Presentation of page state as text.

pub mod views;
