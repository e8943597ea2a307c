use agro_types::RegistrationForm;
use async_trait::async_trait;

use super::{Failure, Page, PageContext};
use crate::domain::models::{Feedback, Outcome, PageState, Route};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterView {
    pub form: RegistrationForm,
    pub feedback: Feedback,
}

/// Self-service sign up. New accounts are farmers.
pub struct RegisterPage {
    ctx: PageContext,
    state: PageState<RegisterView>,
}

impl RegisterPage {
    pub fn new(ctx: PageContext) -> RegisterPage {
        return RegisterPage {
            ctx,
            state: PageState::Init,
        };
    }

    pub async fn submit(&mut self, form: RegistrationForm) -> Outcome {
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
        match self.ctx.api.register(&request).await {
            Ok(()) => {
                self.state.finish_action(|view| *view = RegisterView::default());
                return Outcome::Redirect(Route::Login);
            }
            Err(err) => {
                let text = match self.ctx.explain(&err) {
                    Failure::Message(text) => text,
                    Failure::Login => self.ctx.t("error.generic"),
                };
                self.state.finish_action(|view| {
                    view.form = RegistrationForm {
                        password: String::new(),
                        confirmation: String::new(),
                        ..form
                    };
                    view.feedback.errors.clear();
                    view.feedback.error(text);
                });
                return Outcome::Stay;
            }
        }
    }
}

#[async_trait]
impl Page for RegisterPage {
    type View = RegisterView;

    async fn load(&mut self) -> Outcome {
        self.state = PageState::Rendered(RegisterView::default());
        return Outcome::Stay;
    }

    fn state(&self) -> &PageState<RegisterView> {
        return &self.state;
    }
}

#[cfg(test)]
mod tests {
    use super::super::fake::{context, FakeApi};
    use super::*;
    use agro_client::ApiError;

    fn form() -> RegistrationForm {
        RegistrationForm {
            name: "Lucía Pérez".to_string(),
            email: "lucia@agro.test".to_string(),
            phone: "5551234567".to_string(),
            password: "cosecha2024".to_string(),
            confirmation: "cosecha2024".to_string(),
        }
    }

    #[tokio::test]
    async fn it_redirects_to_login_after_registering() {
        let (ctx, api) = context(FakeApi::default(), None);
        let mut page = RegisterPage::new(ctx);
        page.load().await;

        assert_eq!(page.submit(form()).await, Outcome::Redirect(Route::Login));
        assert_eq!(api.calls(), vec!["register lucia@agro.test"]);
    }

    #[tokio::test]
    async fn it_rejects_mismatched_passwords_locally() {
        let (ctx, api) = context(FakeApi::default(), None);
        let mut page = RegisterPage::new(ctx);
        page.load().await;

        let outcome = page
            .submit(RegistrationForm {
                confirmation: "otra-clave".to_string(),
                ..form()
            })
            .await;

        assert_eq!(outcome, Outcome::Stay);
        let errors = &page.state().view().unwrap().feedback.errors;
        assert_eq!(errors[0].field, "confirmacion");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn it_shows_duplicate_email_message() {
        let api = FakeApi::default().failing(
            "register",
            ApiError::Api {
                status: 409,
                message: Some("El correo ya está registrado".to_string()),
            },
        );
        let (ctx, _) = context(api, None);
        let mut page = RegisterPage::new(ctx);
        page.load().await;

        page.submit(form()).await;

        let view = page.state().view().unwrap();
        assert_eq!(view.feedback.notice.as_ref().unwrap().text, "El correo ya está registrado");
        assert!(view.form.password.is_empty());
    }
}
