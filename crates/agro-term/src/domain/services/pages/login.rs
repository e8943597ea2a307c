use agro_types::{LoginForm, Session};
use async_trait::async_trait;

use super::{Failure, Page, PageContext};
use crate::domain::models::{Feedback, Outcome, PageState, Route};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginView {
    pub form: LoginForm,
    pub feedback: Feedback,
}

pub struct LoginPage {
    ctx: PageContext,
    state: PageState<LoginView>,
}

impl LoginPage {
    pub fn new(ctx: PageContext) -> LoginPage {
        return LoginPage {
            ctx,
            state: PageState::Init,
        };
    }

    /// Validates locally, then signs in. A successful login persists the
    /// session and redirects to the home page of the returned role.
    pub async fn submit(&mut self, form: LoginForm) -> Outcome {
        if !self.state.is_rendered() {
            return Outcome::Stay;
        }

        let request = match form.clone().into_request() {
            Ok(request) => request,
            Err(errors) => {
                self.state.finish_action(|view| {
                    view.form = form;
                    view.feedback.fields(errors.0);
                });
                return Outcome::Stay;
            }
        };

        self.state.begin_action();
        let result = self.ctx.api.login(&request).await;

        let failure = match result {
            Ok(response) => {
                let session = Session::from(response);
                if !session.is_complete() {
                    Failure::Message(self.ctx.t("error.generic"))
                } else if let Err(err) = self.ctx.sessions.save(&session) {
                    tracing::error!(error = %err, "could not persist session");
                    Failure::Message(self.ctx.t("error.storage"))
                } else {
                    tracing::info!(user_id = session.user_id, role = %session.role, "signed in");
                    self.state.finish_action(|view| *view = LoginView::default());
                    return Outcome::Redirect(Route::home_for(session.role));
                }
            }
            Err(err) => self.ctx.explain(&err),
        };

        let text = match failure {
            Failure::Message(text) => text,
            Failure::Login => self.ctx.t("error.generic"),
        };
        self.state.finish_action(|view| {
            view.form = LoginForm {
                email: form.email,
                password: String::new(),
            };
            view.feedback.errors.clear();
            view.feedback.error(text);
        });

        return Outcome::Stay;
    }
}

#[async_trait]
impl Page for LoginPage {
    type View = LoginView;

    async fn load(&mut self) -> Outcome {
        self.state = PageState::Rendered(LoginView::default());
        return Outcome::Stay;
    }

    fn state(&self) -> &PageState<LoginView> {
        return &self.state;
    }
}
