use agro_types::Notification;
use async_trait::async_trait;

use super::{redirect_to_login, Page, PageContext};
use crate::domain::models::{Outcome, PageState};

#[derive(Clone, Debug, PartialEq)]
pub struct NotificationsView {
    pub notifications: Vec<Notification>,
    pub unread: usize,
}

pub struct NotificationsPage {
    ctx: PageContext,
    state: PageState<NotificationsView>,
}

impl NotificationsPage {
    pub fn new(ctx: PageContext) -> NotificationsPage {
        return NotificationsPage {
            ctx,
            state: PageState::Init,
        };
    }
}

#[async_trait]
impl Page for NotificationsPage {
    type View = NotificationsView;

    async fn load(&mut self) -> Outcome {
        self.state = PageState::AuthChecking;
        let Some(session) = self.ctx.guard(None) else {
            return redirect_to_login(&mut self.state);
        };
        self.state = PageState::Loading;

        match self.ctx.api.notifications(session.role).await {
            Ok(notifications) => {
                let unread = notifications.iter().filter(|n| !n.read).count();
                self.state = PageState::Rendered(NotificationsView {
                    notifications,
                    unread,
                });
                Outcome::Stay
            }
            Err(err) => self.ctx.load_failed(&mut self.state, &err, None),
        }
    }

    fn state(&self) -> &PageState<NotificationsView> {
        return &self.state;
    }
}

#[cfg(test)]
mod tests {
    use super::super::fake::{context, farmer, FakeApi};
    use super::*;
    use agro_client::ApiError;

    #[tokio::test]
    async fn it_uses_the_feed_of_the_session_role() {
        let (ctx, api) = context(FakeApi::default(), Some(farmer()));
        let mut page = NotificationsPage::new(ctx);

        page.load().await;

        assert_eq!(api.calls(), vec!["notifications 2"]);
        assert_eq!(page.state().view().unwrap().unread, 0);
    }

    #[tokio::test]
    async fn it_shows_an_error_page_on_network_failure() {
        let api = FakeApi::default().failing("notifications", ApiError::Network("timeout".to_string()));
        let (ctx, _) = context(api, Some(farmer()));
        let mut page = NotificationsPage::new(ctx);

        assert_eq!(page.load().await, Outcome::Stay);
        match page.state() {
            PageState::Error(error) => {
                assert_eq!(error.message, "No se pudo conectar con el servidor.")
            }
            other => panic!("unexpected state {other:?}"),
        }
    }
}
