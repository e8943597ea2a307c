//! Page controllers and text views of the agro advisory client.
//!
//! Every screen of the client is a controller holding a [`PageState`]. A
//! controller checks the stored session before doing anything else, loads its
//! data through [`agro_client::AgroApi`], and reports navigation as an
//! [`Outcome`]. Rendering is a pure function of the page state.

pub mod application;
pub mod configuration;
pub mod domain;

pub use application::views::{render_page, Render};
pub use configuration::{Config, ConfigKey};
pub use domain::models::{
    Feedback, Language, Notice, NoticeKind, Outcome, PageError, PageState, Route,
};
pub use domain::services::i18n::Translations;
pub use domain::services::pages::{Page, PageContext};
