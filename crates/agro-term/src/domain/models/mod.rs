mod language;
mod page;
mod route;

pub use language::*;
pub use page::*;
pub use route::*;
