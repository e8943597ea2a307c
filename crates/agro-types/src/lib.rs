//! Type definitions shared by every part of the agro advisory client
//!
//! This crate is the contract between the API client, the page controllers and
//! the mock API used in tests. Wire names follow the remote API (Spanish field
//! names); Rust names describe what the field holds.
//!
//! ## Contents
//!
//! - **Identity**: [`Session`], [`Role`], login and profile payloads
//! - **Status mapping**: one enumeration per domain with a single exhaustive
//!   `view()` function returning a [`StatusView`]
//! - **Plans**: cultivation plans, tasks, pest reports, performance aggregates
//! - **Requests**: advisory and workshop requests (solicitudes), workshops
//! - **Validation**: local form checks that never touch the network
//!
//! ## Example
//!
//! ```rust
//! use agro_types::{RequestStatus, TaskState, TaskStatus};
//! use chrono::NaiveDate;
//!
//! let view = RequestStatus::from(1).view();
//! assert_eq!(view.css_class, "estado-pendiente");
//!
//! let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
//! let due = NaiveDate::from_ymd_opt(2024, 1, 1);
//! assert_eq!(TaskState::classify(TaskStatus::Pending, due, today), TaskState::Overdue);
//! ```

pub mod catalog;
pub mod dates;
pub mod error;
pub mod plans;
pub mod requests;
pub mod status;
pub mod types;
pub mod validation;

pub use catalog::*;
pub use error::*;
pub use plans::*;
pub use requests::*;
pub use status::*;
pub use types::*;
pub use validation::*;
