use agro_types::{Notification, Role};
use async_trait::async_trait;

use super::{redirect_to_login, Failure, Page, PageContext};
use crate::domain::models::{Feedback, Outcome, PageState, Route};

#[derive(Clone, Debug, PartialEq)]
pub struct HomeView {
    pub greeting: String,
    pub notifications: Vec<Notification>,
    pub unread: usize,
    pub menu: Vec<Route>,
    pub feedback: Feedback,
}

/// Landing page of each role: greeting first, then the notification feed.
pub struct HomePage {
    ctx: PageContext,
    role: Role,
    state: PageState<HomeView>,
}

impl HomePage {
    pub fn new(ctx: PageContext, role: Role) -> HomePage {
        return HomePage {
            ctx,
            role,
            state: PageState::Init,
        };
    }
}

#[async_trait]
impl Page for HomePage {
    type View = HomeView;

    async fn load(&mut self) -> Outcome {
        self.state = PageState::AuthChecking;
        let Some(session) = self.ctx.guard(Some(self.role)) else {
            return redirect_to_login(&mut self.state);
        };
        self.state = PageState::Loading;

        // Without a profile there is nobody to greet: the session is dropped.
        let profile = match self.ctx.api.profile(session.user_id).await {
            Ok(profile) => profile,
            Err(err) => {
                tracing::warn!(error = %err, "profile load failed, signing out");
                self.ctx.sessions.clear();
                return redirect_to_login(&mut self.state);
            }
        };
        if let Err(err) = self.ctx.sessions.update_display_name(&profile.name) {
            tracing::warn!(error = %err, "could not store display name");
        }
        if let Err(err) = self.ctx.sessions.cache_profile(&profile) {
            tracing::warn!(error = %err, "could not cache profile");
        }

        let mut view = HomeView {
            greeting: self.ctx.i18n.t_with("home.greeting", &[("name", profile.name.as_str())]),
            notifications: Vec::new(),
            unread: 0,
            menu: Route::menu_for(self.role),
            feedback: Feedback::default(),
        };

        match self.ctx.api.notifications(self.role).await {
            Ok(notifications) => {
                view.unread = notifications.iter().filter(|n| !n.read).count();
                view.notifications = notifications;
            }
            Err(err) => match self.ctx.explain(&err) {
                Failure::Login => return redirect_to_login(&mut self.state),
                Failure::Message(text) => view.feedback.error(text),
            },
        }

        self.state = PageState::Rendered(view);
        return Outcome::Stay;
    }

    fn state(&self) -> &PageState<HomeView> {
        return &self.state;
    }
}
