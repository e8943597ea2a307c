use agro_types::Role;

/// Every screen of the client.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Route {
    Login,
    Register,
    Password,
    AdvisorHome,
    ClientHome,
    Clients,
    Projects,
    ProjectDetail(i64),
    Requests,
    WorkshopCatalog,
    WorkshopHistory,
    WorkshopAdmin,
    Profile,
    Notifications,
}

impl Route {
    pub fn home_for(role: Role) -> Route {
        match role {
            Role::Advisor => Route::AdvisorHome,
            Role::Farmer => Route::ClientHome,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/registro".to_string(),
            Route::Password => "/contrasena".to_string(),
            Route::AdvisorHome => "/agronomo/inicio".to_string(),
            Route::ClientHome => "/agricultor/inicio".to_string(),
            Route::Clients => "/agronomo/clientes".to_string(),
            Route::Projects => "/proyectos".to_string(),
            Route::ProjectDetail(id) => format!("/proyectos/{id}"),
            Route::Requests => "/agronomo/solicitudes".to_string(),
            Route::WorkshopCatalog => "/agricultor/talleres".to_string(),
            Route::WorkshopHistory => "/agricultor/mis-talleres".to_string(),
            Route::WorkshopAdmin => "/agronomo/talleres".to_string(),
            Route::Profile => "/perfil".to_string(),
            Route::Notifications => "/notificaciones".to_string(),
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            Route::Login => "page.login",
            Route::Register => "page.register",
            Route::Password => "page.password",
            Route::AdvisorHome | Route::ClientHome => "page.home",
            Route::Clients => "page.clients",
            Route::Projects => "page.projects",
            Route::ProjectDetail(_) => "page.project_detail",
            Route::Requests => "page.requests",
            Route::WorkshopCatalog => "page.workshop_catalog",
            Route::WorkshopHistory => "page.workshop_history",
            Route::WorkshopAdmin => "page.workshop_admin",
            Route::Profile => "page.profile",
            Route::Notifications => "page.notifications",
        }
    }

    /// Screens listed in the home menu for a role.
    pub fn menu_for(role: Role) -> Vec<Route> {
        match role {
            Role::Advisor => vec![
                Route::Clients,
                Route::Projects,
                Route::Requests,
                Route::WorkshopAdmin,
                Route::Notifications,
                Route::Profile,
            ],
            Role::Farmer => vec![
                Route::Projects,
                Route::WorkshopCatalog,
                Route::WorkshopHistory,
                Route::Notifications,
                Route::Profile,
            ],
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
