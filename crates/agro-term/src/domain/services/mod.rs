//! Translation lookup and page controllers.

pub mod i18n;
pub mod pages;
