use super::Route;
use agro_types::FieldError;

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;

/// Navigation requested by a page after an operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Stay,
    Redirect(Route),
}

/// A load failure shown instead of the page body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageError {
    pub message: String,
    pub back_link: Option<Route>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Result banner of the last action, shown above a rendered page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Inline feedback every form-bearing view carries.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Feedback {
    pub errors: Vec<FieldError>,
    pub notice: Option<Notice>,
}

impl Feedback {
    pub fn clear(&mut self) {
        self.errors.clear();
        self.notice = None;
    }

    pub fn fields(&mut self, errors: Vec<FieldError>) {
        self.errors = errors;
        self.notice = None;
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.errors.clear();
        self.notice = Some(Notice::success(text));
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::error(text));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PageState<V> {
    Init,
    AuthChecking,
    Loading,
    Rendered(V),
    ActionInFlight(V),
    Error(PageError),
}

impl<V> Default for PageState<V> {
    fn default() -> Self {
        PageState::Init
    }
}

impl<V> PageState<V> {
    pub fn view(&self) -> Option<&V> {
        match self {
            PageState::Rendered(view) | PageState::ActionInFlight(view) => Some(view),
            _ => None,
        }
    }

    pub fn view_mut(&mut self) -> Option<&mut V> {
        match self {
            PageState::Rendered(view) | PageState::ActionInFlight(view) => Some(view),
            _ => None,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, PageState::Rendered(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PageState::Error(_))
    }

    /// Moves a rendered page into `ActionInFlight`. Refused (returns `false`)
    /// when the page is not rendered, including while another action runs.
    pub fn begin_action(&mut self) -> bool {
        match std::mem::take(self) {
            PageState::Rendered(view) => {
                *self = PageState::ActionInFlight(view);
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Returns from `ActionInFlight` to `Rendered`, applying `update` to the view.
    pub fn finish_action(&mut self, update: impl FnOnce(&mut V)) {
        match std::mem::take(self) {
            PageState::ActionInFlight(mut view) | PageState::Rendered(mut view) => {
                update(&mut view);
                *self = PageState::Rendered(view);
            }
            other => *self = other,
        }
    }

    pub fn fail(&mut self, message: impl Into<String>, back_link: Option<Route>) {
        *self = PageState::Error(PageError {
            message: message.into(),
            back_link,
        });
    }
}
