//! Subcommands, one per screen, and how their outcome reaches the terminal.

use agro_term::domain::services::pages::{
    ClientListPage, HomePage, LoginPage, NotificationsPage, PasswordPage, ProfilePage,
    ProjectDetailPage, ProjectListPage, RegisterPage, RequestListPage, RequestTab,
    WorkshopAdminPage, WorkshopCatalogPage, WorkshopHistoryPage,
};
use agro_term::{render_page, Language, Outcome, Page, PageContext, Render, Route, Translations};
use agro_types::{
    ContactForm, LoginForm, PasswordRecoveryForm, PasswordUpdateForm, PaymentProofForm,
    PestReportForm, RegistrationForm, RequestAction, RequestStatus, Role, TaskForm, WorkshopForm,
    WorkshopStatus,
};
use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

/// Exit status when the user has to sign in again.
const EXIT_LOGIN_REQUIRED: i32 = 2;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        #[clap(long)]
        email: String,
        #[clap(long, env = "AGRO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a farmer account
    Register {
        #[clap(long)]
        name: String,
        #[clap(long)]
        email: String,
        #[clap(long, default_value = "")]
        phone: String,
        #[clap(long)]
        password: String,
        #[clap(long)]
        confirmation: String,
    },
    /// Recover or change the password
    Password {
        #[clap(subcommand)]
        action: PasswordCommands,
    },
    /// Forget the stored session
    Logout,
    /// Home page of the signed-in role
    Home,
    /// Advisor: manage clients
    Clients {
        #[clap(long, help = "Filter by name, email or location")]
        search: Option<String>,
        #[clap(subcommand)]
        action: Option<ClientCommands>,
    },
    /// Cultivation plans
    Projects {
        #[clap(long, help = "Only plans growing this crop id")]
        crop: Option<i64>,
    },
    /// One cultivation plan with its tasks and pest reports
    Project {
        id: i64,
        #[clap(subcommand)]
        action: Option<ProjectCommands>,
    },
    /// Advisor: advisory and workshop requests
    Requests {
        #[clap(long, value_enum, default_value = "all")]
        tab: TabArg,
        #[clap(long, help = "Only requests with this status code")]
        status: Option<i64>,
        #[clap(subcommand)]
        action: Option<RequestCommands>,
    },
    /// Workshops
    Workshops {
        #[clap(subcommand)]
        action: WorkshopCommands,
    },
    /// Own profile
    Profile {
        #[clap(subcommand)]
        action: Option<ProfileCommands>,
    },
    /// Notification feed
    Notifications,
    /// Store the preferred interface language
    Language {
        #[clap(value_parser = ["es", "en"])]
        code: String,
    },
    /// Print a config file with every default
    Config,
}

#[derive(Subcommand, Debug)]
pub enum PasswordCommands {
    /// Ask for a recovery email
    Recover {
        #[clap(long)]
        email: String,
    },
    /// Set a new password for the signed-in user
    Change {
        #[clap(long)]
        password: String,
        #[clap(long)]
        confirmation: String,
    },
}

#[derive(Args, Debug)]
pub struct ContactArgs {
    #[clap(long)]
    name: String,
    #[clap(long)]
    email: String,
    #[clap(long, default_value = "")]
    phone: String,
}

impl From<ContactArgs> for ContactForm {
    fn from(args: ContactArgs) -> Self {
        ContactForm {
            name: args.name,
            email: args.email,
            phone: args.phone,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ClientCommands {
    Update {
        id: i64,
        #[clap(flatten)]
        contact: ContactArgs,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
pub struct TaskArgs {
    #[clap(long)]
    title: String,
    #[clap(long, default_value = "")]
    description: String,
    #[clap(long, default_value = "", help = "Due date, YYYY-MM-DD")]
    due: String,
}

impl From<TaskArgs> for TaskForm {
    fn from(args: TaskArgs) -> Self {
        TaskForm {
            title: args.title,
            description: args.description,
            due_date: args.due,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Open the task editor on a task and show it
    Edit { task: i64 },
    TaskAdd {
        #[clap(flatten)]
        task: TaskArgs,
    },
    TaskUpdate {
        id: i64,
        #[clap(flatten)]
        task: TaskArgs,
    },
    /// Switch a task between pending and completed
    TaskToggle { id: i64 },
    TaskDelete { id: i64 },
    /// Report a pest on this plan
    Pest {
        #[clap(long)]
        pest: String,
        #[clap(long, default_value = "")]
        description: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TabArg {
    All,
    Advisory,
    Workshop,
}

impl From<TabArg> for RequestTab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::All => RequestTab::All,
            TabArg::Advisory => RequestTab::Advisory,
            TabArg::Workshop => RequestTab::Workshop,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum RequestCommands {
    Accept { id: i64 },
    Reject { id: i64 },
    /// Validate the payment proof of a workshop request
    Validate { id: i64 },
}

#[derive(Args, Debug)]
pub struct WorkshopArgs {
    #[clap(long)]
    name: String,
    #[clap(long, default_value = "")]
    description: String,
    #[clap(long, default_value = "", help = "Date, YYYY-MM-DD")]
    date: String,
    #[clap(long, default_value = "")]
    cost: String,
}

impl From<WorkshopArgs> for WorkshopForm {
    fn from(args: WorkshopArgs) -> Self {
        WorkshopForm {
            name: args.name,
            description: args.description,
            date: args.date,
            cost: args.cost,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum WorkshopCommands {
    /// Farmer: workshops open for enrollment
    Catalog,
    /// Farmer: request enrollment in the given workshops
    Enroll { ids: Vec<i64> },
    /// Farmer: own workshop requests
    History,
    /// Farmer: send the payment proof of an accepted request
    Proof {
        request: i64,
        #[clap(long)]
        reference: String,
    },
    /// Advisor: all workshops, optionally by status code
    Admin {
        #[clap(long)]
        status: Option<i64>,
    },
    Create {
        #[clap(flatten)]
        workshop: WorkshopArgs,
    },
    Update {
        id: i64,
        #[clap(long, default_value_t = 1, help = "Status code")]
        status: i64,
        #[clap(flatten)]
        workshop: WorkshopArgs,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    Update {
        #[clap(flatten)]
        contact: ContactArgs,
    },
}

/// Prints the page and maps its final state to an exit status.
fn show<P>(page: &P, route: Route, outcome: Outcome, i18n: &Translations) -> i32
where
    P: Page,
    P::View: Render,
{
    if outcome == Outcome::Redirect(Route::Login) {
        eprintln!("{}", i18n.t("session.expired"));
        return EXIT_LOGIN_REQUIRED;
    }

    println!("{}", render_page(route, page.state(), i18n));
    if let Outcome::Redirect(next) = outcome {
        println!("-> {} ({next})", i18n.t(next.label_key()));
    }

    if page.state().is_error() {
        1
    } else {
        0
    }
}

/// True when the page loaded and an action may run on it.
fn ready<P: Page>(page: &P, outcome: &Outcome) -> bool {
    *outcome == Outcome::Stay && page.state().is_rendered()
}

async fn open<P>(mut page: P, route: Route, ctx: &PageContext) -> i32
where
    P: Page,
    P::View: Render,
{
    let outcome = page.load().await;
    show(&page, route, outcome, &ctx.i18n)
}

pub async fn run(command: Commands, ctx: PageContext) -> Result<i32> {
    let code = match command {
        Commands::Login { email, password } => {
            let mut page = LoginPage::new(ctx.clone());
            page.load().await;
            let outcome = page.submit(LoginForm { email, password }).await;
            match outcome {
                Outcome::Redirect(Route::AdvisorHome) => home(&ctx, Role::Advisor).await,
                Outcome::Redirect(Route::ClientHome) => home(&ctx, Role::Farmer).await,
                other => show(&page, Route::Login, other, &ctx.i18n),
            }
        }
        Commands::Register {
            name,
            email,
            phone,
            password,
            confirmation,
        } => {
            let form = RegistrationForm {
                name,
                email,
                phone,
                password,
                confirmation,
            };
            let mut page = RegisterPage::new(ctx.clone());
            page.load().await;
            let outcome = page.submit(form).await;
            if outcome == Outcome::Redirect(Route::Login) {
                println!("-> {} ({})", ctx.t("page.login"), Route::Login);
                0
            } else {
                show(&page, Route::Register, outcome, &ctx.i18n)
            }
        }
        Commands::Password { action } => {
            let mut page = PasswordPage::new(ctx.clone());
            let mut outcome = page.load().await;
            if ready(&page, &outcome) {
                outcome = match action {
                    PasswordCommands::Recover { email } => {
                        page.request_recovery(PasswordRecoveryForm { email }).await
                    }
                    PasswordCommands::Change {
                        password,
                        confirmation,
                    } => {
                        let form = PasswordUpdateForm {
                            password,
                            confirmation,
                        };
                        page.change_password(form).await
                    }
                };
            }
            show(&page, Route::Password, outcome, &ctx.i18n)
        }
        Commands::Logout => {
            ctx.sessions.clear();
            println!("{}", ctx.t("session.logged_out"));
            0
        }
        Commands::Home => match ctx.sessions.load() {
            Some(session) => home(&ctx, session.role).await,
            None => {
                eprintln!("{}", ctx.t("session.expired"));
                EXIT_LOGIN_REQUIRED
            }
        },
        Commands::Clients { search, action } => {
            let mut page = ClientListPage::new(ctx.clone());
            let mut outcome = page.load().await;
            if ready(&page, &outcome) {
                if let Some(query) = search {
                    page.search(&query);
                }
                outcome = match action {
                    Some(ClientCommands::Update { id, contact }) => {
                        page.update(id, contact.into()).await
                    }
                    Some(ClientCommands::Delete { id }) => page.delete(id).await,
                    None => Outcome::Stay,
                };
            }
            show(&page, Route::Clients, outcome, &ctx.i18n)
        }
        Commands::Projects { crop } => {
            let mut page = ProjectListPage::new(ctx.clone());
            let outcome = page.load().await;
            page.filter_by_crop(crop);
            show(&page, Route::Projects, outcome, &ctx.i18n)
        }
        Commands::Project { id, action } => project(&ctx, id, action).await,
        Commands::Requests {
            tab,
            status,
            action,
        } => {
            let mut page = RequestListPage::with_tab(ctx.clone(), tab.into());
            let mut outcome = page.load().await;
            if ready(&page, &outcome) {
                let requested = match action {
                    Some(RequestCommands::Accept { id }) => Some((id, RequestAction::Accept)),
                    Some(RequestCommands::Reject { id }) => Some((id, RequestAction::Reject)),
                    Some(RequestCommands::Validate { id }) => {
                        Some((id, RequestAction::ValidatePayment))
                    }
                    None => None,
                };
                if let Some((id, request_action)) = requested {
                    outcome = page.apply(id, request_action).await;
                }
                page.filter_by_status(status.map(RequestStatus::from));
            }
            show(&page, Route::Requests, outcome, &ctx.i18n)
        }
        Commands::Workshops { action } => workshops(&ctx, action).await,
        Commands::Profile { action } => {
            let mut page = ProfilePage::new(ctx.clone());
            let mut outcome = page.load().await;
            if ready(&page, &outcome) {
                if let Some(ProfileCommands::Update { contact }) = action {
                    outcome = page.save(contact.into()).await;
                }
            }
            show(&page, Route::Profile, outcome, &ctx.i18n)
        }
        Commands::Notifications => {
            open(NotificationsPage::new(ctx.clone()), Route::Notifications, &ctx).await
        }
        Commands::Language { code } => {
            let language: Language = code.parse()?;
            ctx.sessions.set_language(&language.to_string())?;
            println!("{}", Translations::new(language).t("language.changed"));
            0
        }
        Commands::Config => 0,
    };

    Ok(code)
}

async fn home(ctx: &PageContext, role: Role) -> i32 {
    open(HomePage::new(ctx.clone(), role), Route::home_for(role), ctx).await
}

async fn project(ctx: &PageContext, id: i64, action: Option<ProjectCommands>) -> i32 {
    let mut page = ProjectDetailPage::new(ctx.clone(), id);
    let mut outcome = page.load().await;
    if ready(&page, &outcome) {
        outcome = match action {
            None => Outcome::Stay,
            Some(ProjectCommands::Edit { task }) => {
                page.open_editor(Some(task));
                Outcome::Stay
            }
            Some(ProjectCommands::TaskAdd { task }) => page.save_task(None, task.into()).await,
            Some(ProjectCommands::TaskUpdate { id, task }) => {
                page.save_task(Some(id), task.into()).await
            }
            Some(ProjectCommands::TaskToggle { id }) => page.toggle_task(id).await,
            Some(ProjectCommands::TaskDelete { id }) => page.delete_task(id).await,
            Some(ProjectCommands::Pest { pest, description }) => {
                page.report_pest(PestReportForm { pest, description }).await
            }
        };
    }

    show(&page, Route::ProjectDetail(id), outcome, &ctx.i18n)
}

async fn workshops(ctx: &PageContext, action: WorkshopCommands) -> i32 {
    match action {
        WorkshopCommands::Catalog => {
            open(WorkshopCatalogPage::new(ctx.clone()), Route::WorkshopCatalog, ctx).await
        }
        WorkshopCommands::Enroll { ids } => {
            let mut page = WorkshopCatalogPage::new(ctx.clone());
            let mut outcome = page.load().await;
            if ready(&page, &outcome) {
                for id in ids {
                    page.toggle(id);
                }
                outcome = page.submit().await;
            }
            show(&page, Route::WorkshopCatalog, outcome, &ctx.i18n)
        }
        WorkshopCommands::History => {
            open(WorkshopHistoryPage::new(ctx.clone()), Route::WorkshopHistory, ctx).await
        }
        WorkshopCommands::Proof { request, reference } => {
            let mut page = WorkshopHistoryPage::new(ctx.clone());
            let mut outcome = page.load().await;
            if ready(&page, &outcome) {
                outcome = page
                    .submit_proof(request, PaymentProofForm { reference })
                    .await;
            }
            show(&page, Route::WorkshopHistory, outcome, &ctx.i18n)
        }
        WorkshopCommands::Admin { status } => {
            let mut page = WorkshopAdminPage::new(ctx.clone());
            let mut outcome = page.load().await;
            if ready(&page, &outcome) {
                if let Some(code) = status {
                    outcome = page
                        .filter_by_status(Some(WorkshopStatus::from(code)))
                        .await;
                }
            }
            show(&page, Route::WorkshopAdmin, outcome, &ctx.i18n)
        }
        WorkshopCommands::Create { workshop } => {
            let mut page = WorkshopAdminPage::new(ctx.clone());
            let mut outcome = page.load().await;
            if ready(&page, &outcome) {
                outcome = page.create(workshop.into()).await;
            }
            show(&page, Route::WorkshopAdmin, outcome, &ctx.i18n)
        }
        WorkshopCommands::Update {
            id,
            status,
            workshop,
        } => {
            let mut page = WorkshopAdminPage::new(ctx.clone());
            let mut outcome = page.load().await;
            if ready(&page, &outcome) {
                outcome = page
                    .update(id, workshop.into(), WorkshopStatus::from(status))
                    .await;
            }
            show(&page, Route::WorkshopAdmin, outcome, &ctx.i18n)
        }
        WorkshopCommands::Delete { id } => {
            let mut page = WorkshopAdminPage::new(ctx.clone());
            let mut outcome = page.load().await;
            if ready(&page, &outcome) {
                outcome = page.delete(id).await;
            }
            show(&page, Route::WorkshopAdmin, outcome, &ctx.i18n)
        }
    }
}
