use agro_types::{PasswordRecoveryForm, PasswordUpdateForm, Session};
use async_trait::async_trait;

use super::{redirect_to_login, Failure, Page, PageContext};
use crate::domain::models::{Feedback, Outcome, PageState};

/// Recovery by email for anonymous users, password change for signed-in ones.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PasswordMode {
    Recover,
    Change,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PasswordView {
    pub mode: PasswordMode,
    pub intro: String,
    pub feedback: Feedback,
}

pub struct PasswordPage {
    ctx: PageContext,
    state: PageState<PasswordView>,
    session: Option<Session>,
}

impl PasswordPage {
    pub fn new(ctx: PageContext) -> PasswordPage {
        return PasswordPage {
            ctx,
            state: PageState::Init,
            session: None,
        };
    }

    fn mode(&self) -> Option<PasswordMode> {
        return self.state.view().map(|view| view.mode);
    }

    pub async fn request_recovery(&mut self, form: PasswordRecoveryForm) -> Outcome {
        if self.mode() != Some(PasswordMode::Recover) || !self.state.is_rendered() {
            return Outcome::Stay;
        }
        let request = match form.into_request() {
            Ok(request) => request,
            Err(errors) => {
                self.state.finish_action(|view| view.feedback.fields(errors.0));
                return Outcome::Stay;
            }
        };

        self.state.begin_action();
        let result = self.ctx.api.recover_password(&request).await;
        let result = result.map_err(|err| self.ctx.explain(&err));
        return self.finish(result, "password.recovery_sent");
    }

    pub async fn change_password(&mut self, form: PasswordUpdateForm) -> Outcome {
        if self.mode() != Some(PasswordMode::Change) || !self.state.is_rendered() {
            return Outcome::Stay;
        }
        let Some(session) = self.session.clone() else {
            return redirect_to_login(&mut self.state);
        };
        let update = match form.into_update() {
            Ok(update) => update,
            Err(errors) => {
                self.state.finish_action(|view| view.feedback.fields(errors.0));
                return Outcome::Stay;
            }
        };

        self.state.begin_action();
        let result = self.ctx.api.update_profile(session.user_id, &update).await;
        let result = result.map_err(|err| self.ctx.explain(&err));
        return self.finish(result, "password.updated");
    }

    fn finish(&mut self, result: Result<(), Failure>, success_key: &str) -> Outcome {
        match result {
            Ok(()) => {
                let text = self.ctx.t(success_key);
                self.state.finish_action(|view| view.feedback.success(text));
            }
            Err(Failure::Login) => return redirect_to_login(&mut self.state),
            Err(Failure::Message(text)) => {
                self.state.finish_action(|view| view.feedback.error(text));
            }
        }

        return Outcome::Stay;
    }
}

#[async_trait]
impl Page for PasswordPage {
    type View = PasswordView;

    async fn load(&mut self) -> Outcome {
        self.state = PageState::AuthChecking;
        self.session = self.ctx.sessions.load();

        let (mode, intro) = match self.session {
            Some(_) => (PasswordMode::Change, "password.change_intro"),
            None => (PasswordMode::Recover, "password.recover_intro"),
        };
        self.state = PageState::Rendered(PasswordView {
            mode,
            intro: self.ctx.t(intro),
            feedback: Feedback::default(),
        });

        return Outcome::Stay;
    }

    fn state(&self) -> &PageState<PasswordView> {
        return &self.state;
    }
}

#[cfg(test)]
mod tests {
    use super::super::fake::{context, farmer, FakeApi};
    use super::*;
    use agro_client::ApiError;
    use crate::domain::models::Route;

    #[tokio::test]
    async fn it_recovers_without_a_session() {
        let (ctx, api) = context(FakeApi::default(), None);
        let mut page = PasswordPage::new(ctx);
        page.load().await;
        assert_eq!(page.state().view().unwrap().mode, PasswordMode::Recover);

        page.request_recovery(PasswordRecoveryForm {
            email: "lucia@agro.test".to_string(),
        })
        .await;

        assert_eq!(api.calls(), vec!["recover_password lucia@agro.test"]);
        let notice = page.state().view().unwrap().feedback.notice.clone().unwrap();
        assert!(notice.text.contains("recibirás instrucciones"));
    }

    #[tokio::test]
    async fn it_changes_the_password_of_the_signed_in_user() {
        let (ctx, api) = context(FakeApi::default(), Some(farmer()));
        let mut page = PasswordPage::new(ctx);
        page.load().await;
        assert_eq!(page.state().view().unwrap().mode, PasswordMode::Change);

        page.change_password(PasswordUpdateForm {
            password: "nuevaClave1".to_string(),
            confirmation: "nuevaClave1".to_string(),
        })
        .await;

        assert_eq!(api.calls(), vec![r#"update_profile 7 {"contrasena":"nuevaClave1"}"#]);
    }

    #[tokio::test]
    async fn it_refuses_recovery_in_change_mode() {
        let (ctx, api) = context(FakeApi::default(), Some(farmer()));
        let mut page = PasswordPage::new(ctx);
        page.load().await;

        page.request_recovery(PasswordRecoveryForm {
            email: "lucia@agro.test".to_string(),
        })
        .await;

        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn it_redirects_when_the_session_is_rejected() {
        let api = FakeApi::default().failing("update_profile", ApiError::Unauthorized { status: 401 });
        let (ctx, _) = context(api, Some(farmer()));
        let sessions = ctx.sessions.clone();
        let mut page = PasswordPage::new(ctx);
        page.load().await;

        let outcome = page
            .change_password(PasswordUpdateForm {
                password: "nuevaClave1".to_string(),
                confirmation: "nuevaClave1".to_string(),
            })
            .await;

        assert_eq!(outcome, Outcome::Redirect(Route::Login));
        assert!(sessions.load().is_none());
        assert!(!page.state().is_error());
    }
}
