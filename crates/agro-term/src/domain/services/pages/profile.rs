use agro_types::{ContactForm, Profile, Session};
use async_trait::async_trait;

use super::{redirect_to_login, Failure, Page, PageContext};
use crate::domain::models::{Feedback, Outcome, PageState};

#[derive(Clone, Debug, PartialEq)]
pub struct ProfileView {
    pub profile: Profile,
    pub form: ContactForm,
    pub feedback: Feedback,
}

fn form_for(profile: &Profile) -> ContactForm {
    return ContactForm {
        name: profile.name.clone(),
        email: profile.email.clone(),
        phone: profile.phone.clone().unwrap_or_default(),
    };
}

pub struct ProfilePage {
    ctx: PageContext,
    state: PageState<ProfileView>,
    session: Option<Session>,
}

impl ProfilePage {
    pub fn new(ctx: PageContext) -> ProfilePage {
        return ProfilePage {
            ctx,
            state: PageState::Init,
            session: None,
        };
    }

    /// Saves the contact data. On success the stored display name follows.
    pub async fn save(&mut self, form: ContactForm) -> Outcome {
        if !self.state.is_rendered() {
            return Outcome::Stay;
        }
        let Some(session) = self.session.clone() else {
            return redirect_to_login(&mut self.state);
        };
        let update = match form.clone().into_profile_update() {
            Ok(update) => update,
            Err(errors) => {
                self.state.finish_action(|view| {
                    view.form = form;
                    view.feedback.fields(errors.0);
                });
                return Outcome::Stay;
            }
        };

        self.state.begin_action();
        if let Err(err) = self.ctx.api.update_profile(session.user_id, &update).await {
            match self.ctx.explain(&err) {
                Failure::Login => return redirect_to_login(&mut self.state),
                Failure::Message(text) => self.state.finish_action(|view| {
                    view.form = form;
                    view.feedback.error(text);
                }),
            }
            return Outcome::Stay;
        }

        // The save went through; a failed refresh only keeps the submitted form.
        let refreshed = match self.ctx.api.profile(session.user_id).await {
            Ok(profile) => Some(profile),
            Err(err) if err.requires_login() => {
                self.ctx.sessions.clear();
                return redirect_to_login(&mut self.state);
            }
            Err(err) => {
                tracing::warn!(error = %err, "profile saved but could not be reloaded");
                None
            }
        };

        let name = match &refreshed {
            Some(profile) => profile.name.clone(),
            None => form.name.trim().to_string(),
        };
        if let Err(err) = self.ctx.sessions.update_display_name(&name) {
            tracing::warn!(error = %err, "could not store display name");
        }
        if let Some(profile) = &refreshed {
            if let Err(err) = self.ctx.sessions.cache_profile(profile) {
                tracing::warn!(error = %err, "could not cache profile");
            }
        }

        let text = self.ctx.t("profile.updated");
        self.state.finish_action(|view| {
            match refreshed {
                Some(profile) => {
                    view.form = form_for(&profile);
                    view.profile = profile;
                }
                None => view.form = form,
            }
            view.feedback.success(text);
        });

        return Outcome::Stay;
    }
}

#[async_trait]
impl Page for ProfilePage {
    type View = ProfileView;

    async fn load(&mut self) -> Outcome {
        self.state = PageState::AuthChecking;
        let Some(session) = self.ctx.guard(None) else {
            return redirect_to_login(&mut self.state);
        };
        self.state = PageState::Loading;

        let outcome = match self.ctx.api.profile(session.user_id).await {
            Ok(profile) => {
                if let Err(err) = self.ctx.sessions.cache_profile(&profile) {
                    tracing::warn!(error = %err, "could not cache profile");
                }
                self.state = PageState::Rendered(ProfileView {
                    form: form_for(&profile),
                    profile,
                    feedback: Feedback::default(),
                });
                Outcome::Stay
            }
            Err(err) => self.ctx.load_failed(&mut self.state, &err, None),
        };
        self.session = Some(session);

        return outcome;
    }

    fn state(&self) -> &PageState<ProfileView> {
        return &self.state;
    }
}

#[cfg(test)]
mod tests {
    use super::super::fake::{advisor, context, profile, FakeApi};
    use agro_client::ApiError;
    use super::*;

    #[tokio::test]
    async fn it_prefills_the_form() {
        let api = FakeApi {
            profile: Some(profile(5, "Marta Gómez")),
            ..Default::default()
        };
        let (ctx, _) = context(api, Some(advisor()));
        let mut page = ProfilePage::new(ctx);

        page.load().await;

        let view = page.state().view().unwrap();
        assert_eq!(view.form.name, "Marta Gómez");
        assert_eq!(view.form.email, "agronomo@agro.test");
    }

    #[tokio::test]
    async fn it_saves_and_refreshes_the_display_name() {
        let api = FakeApi {
            profile: Some(profile(5, "Marta Gómez")),
            ..Default::default()
        };
        let (ctx, api) = context(api, Some(advisor()));
        let sessions = ctx.sessions.clone();
        let mut page = ProfilePage::new(ctx);
        page.load().await;

        page.save(ContactForm {
            name: "Marta Gómez".to_string(),
            email: "marta@agro.test".to_string(),
            phone: String::new(),
        })
        .await;

        assert!(api.called("update_profile"));
        assert_eq!(sessions.load().unwrap().display_name.as_deref(), Some("Marta Gómez"));
        let view = page.state().view().unwrap();
        assert_eq!(view.feedback.notice.as_ref().unwrap().text, "Perfil actualizado.");
    }

    #[tokio::test]
    async fn it_reports_a_save_even_when_the_reload_fails() {
        let api = FakeApi {
            profile: Some(profile(5, "Marta Gómez")),
            ..Default::default()
        }
        .failing_after_first("profile", ApiError::Network("timeout".to_string()));
        let (ctx, api) = context(api, Some(advisor()));
        let sessions = ctx.sessions.clone();
        let mut page = ProfilePage::new(ctx);
        page.load().await;

        page.save(ContactForm {
            name: "Marta G.".to_string(),
            email: "marta@agro.test".to_string(),
            phone: String::new(),
        })
        .await;

        assert_eq!(api.calls().len(), 3);
        assert!(page.state().is_rendered());
        let view = page.state().view().unwrap();
        assert_eq!(view.feedback.notice.as_ref().unwrap().text, "Perfil actualizado.");
        assert_eq!(view.form.name, "Marta G.");
        assert_eq!(view.form.email, "marta@agro.test");
        assert_eq!(sessions.load().unwrap().display_name.as_deref(), Some("Marta G."));
    }

    #[tokio::test]
    async fn it_reports_invalid_email_inline() {
        let api = FakeApi {
            profile: Some(profile(5, "Marta Gómez")),
            ..Default::default()
        };
        let (ctx, api) = context(api, Some(advisor()));
        let mut page = ProfilePage::new(ctx);
        page.load().await;

        page.save(ContactForm {
            name: "Marta".to_string(),
            email: "marta".to_string(),
            phone: String::new(),
        })
        .await;

        assert!(!api.called("update_profile"));
        assert_eq!(page.state().view().unwrap().feedback.errors[0].field, "correo");
    }
}
