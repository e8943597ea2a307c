use agro_types::{Client, ContactForm, Role};
use async_trait::async_trait;

use super::{redirect_to_login, Failure, Page, PageContext};
use crate::domain::models::{Feedback, Outcome, PageState};

#[derive(Clone, Debug, PartialEq)]
pub struct ClientListView {
    pub clients: Vec<Client>,
    pub query: String,
    pub feedback: Feedback,
}

impl ClientListView {
    /// Clients matching the search text on name, email or location.
    pub fn visible(&self) -> Vec<&Client> {
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return self.clients.iter().collect();
        }

        return self
            .clients
            .iter()
            .filter(|client| {
                client.name.to_lowercase().contains(&query)
                    || client.email.to_lowercase().contains(&query)
                    || client
                        .location
                        .as_deref()
                        .is_some_and(|l| l.to_lowercase().contains(&query))
            })
            .collect();
    }
}

/// Advisor's client administration.
pub struct ClientListPage {
    ctx: PageContext,
    state: PageState<ClientListView>,
}

impl ClientListPage {
    pub fn new(ctx: PageContext) -> ClientListPage {
        return ClientListPage {
            ctx,
            state: PageState::Init,
        };
    }

    /// Local filter, no request is made.
    pub fn search(&mut self, query: &str) {
        if let Some(view) = self.state.view_mut() {
            view.query = query.to_string();
        }
    }

    pub async fn update(&mut self, client_id: i64, form: ContactForm) -> Outcome {
        if !self.state.is_rendered() {
            return Outcome::Stay;
        }
        let update = match form.into_client_update() {
            Ok(update) => update,
            Err(errors) => {
                self.state.finish_action(|view| view.feedback.fields(errors.0));
                return Outcome::Stay;
            }
        };

        self.state.begin_action();
        let result = self.ctx.api.update_client(client_id, &update).await;
        return self.refresh_after(result, "clients.updated").await;
    }

    pub async fn delete(&mut self, client_id: i64) -> Outcome {
        if !self.state.begin_action() {
            return Outcome::Stay;
        }
        let result = self.ctx.api.delete_client(client_id).await;
        return self.refresh_after(result, "clients.deleted").await;
    }

    async fn refresh_after(&mut self, result: agro_client::ApiResult<()>, success_key: &str) -> Outcome {
        let result = match result {
            Ok(()) => self.ctx.api.clients().await,
            Err(err) => Err(err),
        };

        match result {
            Ok(clients) => {
                let text = self.ctx.t(success_key);
                self.state.finish_action(|view| {
                    view.clients = clients;
                    view.feedback.success(text);
                });
            }
            Err(err) => match self.ctx.explain(&err) {
                Failure::Login => return redirect_to_login(&mut self.state),
                Failure::Message(text) => self.state.finish_action(|view| view.feedback.error(text)),
            },
        }

        return Outcome::Stay;
    }
}

#[async_trait]
impl Page for ClientListPage {
    type View = ClientListView;

    async fn load(&mut self) -> Outcome {
        self.state = PageState::AuthChecking;
        if self.ctx.guard(Some(Role::Advisor)).is_none() {
            return redirect_to_login(&mut self.state);
        }
        self.state = PageState::Loading;

        match self.ctx.api.clients().await {
            Ok(clients) => {
                self.state = PageState::Rendered(ClientListView {
                    clients,
                    query: String::new(),
                    feedback: Feedback::default(),
                });
                Outcome::Stay
            }
            Err(err) => self.ctx.load_failed(&mut self.state, &err, None),
        }
    }

    fn state(&self) -> &PageState<ClientListView> {
        return &self.state;
    }
}
