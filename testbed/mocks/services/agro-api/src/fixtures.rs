use agro_types::{
    Client, Crop, CultivationPlan, Notification, PestReport, Profile, RequestKind, RequestStatus,
    Role, Solicitud, SoilType, Task, TaskStatus, Workshop, WorkshopStatus,
};
use chrono::NaiveDate;

/// An account known to the mock, with the token it receives on login.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub role: Role,
    pub token: String,
    pub location: Option<String>,
}

impl User {
    pub fn profile(&self) -> Profile {
        Profile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: Some(self.role),
        }
    }

    pub fn client(&self) -> Client {
        Client {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            location: self.location.clone(),
        }
    }
}

/// The whole data set served by the mock. Handlers mutate it in place.
#[derive(Debug, Clone, Default)]
pub struct ApiFixture {
    pub users: Vec<User>,
    pub plans: Vec<CultivationPlan>,
    pub tasks: Vec<Task>,
    pub pest_reports: Vec<PestReport>,
    pub requests: Vec<Solicitud>,
    pub workshops: Vec<Workshop>,
    pub crops: Vec<Crop>,
    pub soil_types: Vec<SoilType>,
    pub notifications: Vec<(Role, Notification)>,
    /// Expected yield per plan id, reported by the performance endpoint.
    pub expected_yields: Vec<(i64, f64)>,
    next_id: i64,
}

pub const ADVISOR_EMAIL: &str = "agronomo@agro.test";
pub const ADVISOR_PASSWORD: &str = "secreta";
pub const ADVISOR_TOKEN: &str = "abc";
pub const ADVISOR_ID: i64 = 5;
pub const FARMER_EMAIL: &str = "lucia@agro.test";
pub const FARMER_PASSWORD: &str = "cosecha2024";
pub const FARMER_TOKEN: &str = "xyz";
pub const FARMER_ID: i64 = 7;

fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

impl ApiFixture {
    pub fn empty() -> Self {
        Self {
            next_id: 100,
            ..Default::default()
        }
    }

    pub fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn user_by_token(&self, token: &str) -> Option<&User> {
        self.users.iter().find(|u| u.token == token)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }

    pub fn user_mut(&mut self, id: i64) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    /// One advisor, two farmers, a plan with an overdue task, and requests in
    /// every state the advisor screens act on.
    pub fn create_test_fixture() -> Self {
        let mut fixture = Self::empty();

        fixture.users = vec![
            User {
                id: ADVISOR_ID,
                name: "Ana Gómez".to_string(),
                email: ADVISOR_EMAIL.to_string(),
                phone: Some("5551234567".to_string()),
                password: ADVISOR_PASSWORD.to_string(),
                role: Role::Advisor,
                token: ADVISOR_TOKEN.to_string(),
                location: None,
            },
            User {
                id: FARMER_ID,
                name: "Lucía Pérez".to_string(),
                email: FARMER_EMAIL.to_string(),
                phone: None,
                password: FARMER_PASSWORD.to_string(),
                role: Role::Farmer,
                token: FARMER_TOKEN.to_string(),
                location: Some("Valle de Guadalupe".to_string()),
            },
            User {
                id: 8,
                name: "Jorge Ruiz".to_string(),
                email: "jorge@agro.test".to_string(),
                phone: Some("5559876543".to_string()),
                password: "maizal2024".to_string(),
                role: Role::Farmer,
                token: "jr-token".to_string(),
                location: Some("Tlaxcala".to_string()),
            },
        ];

        fixture.crops = vec![
            Crop { id: 1, name: "Maíz".to_string() },
            Crop { id: 2, name: "Frijol".to_string() },
            Crop { id: 3, name: "Vid".to_string() },
        ];
        fixture.soil_types = vec![
            SoilType {
                id: 1,
                name: "Temporal".to_string(),
                description: Some("Depende de la lluvia".to_string()),
            },
            SoilType {
                id: 2,
                name: "Riego por goteo".to_string(),
                description: None,
            },
        ];

        fixture.plans = vec![
            CultivationPlan {
                id: 1,
                name: "Viñedo norte".to_string(),
                owner_id: FARMER_ID,
                owner_name: Some("Lucía Pérez".to_string()),
                crops: vec![3],
                soil_type_id: Some(2),
                hectares: Some(4.5),
                start_date: day(2023, 11, 1),
            },
            CultivationPlan {
                id: 2,
                name: "Milpa".to_string(),
                owner_id: 8,
                owner_name: Some("Jorge Ruiz".to_string()),
                crops: vec![1, 2],
                soil_type_id: Some(1),
                hectares: Some(2.0),
                start_date: day(2024, 3, 15),
            },
        ];
        fixture.expected_yields = vec![(1, 12.5)];

        fixture.tasks = vec![
            Task {
                id: 1,
                plan_id: 1,
                title: "Fertilizar".to_string(),
                description: Some("Aplicar composta".to_string()),
                due_date: day(2024, 1, 1),
                status: TaskStatus::Pending,
            },
            Task {
                id: 2,
                plan_id: 1,
                title: "Poda".to_string(),
                description: None,
                due_date: day(2023, 12, 10),
                status: TaskStatus::Completed,
            },
            Task {
                id: 3,
                plan_id: 2,
                title: "Siembra".to_string(),
                description: None,
                due_date: day(2024, 4, 1),
                status: TaskStatus::Pending,
            },
        ];

        fixture.pest_reports = vec![PestReport {
            id: 1,
            plan_id: 1,
            pest: "Filoxera".to_string(),
            description: Some("Hojas con agallas".to_string()),
            reported_on: day(2024, 1, 20),
        }];

        fixture.workshops = vec![
            Workshop {
                id: 1,
                name: "Manejo integrado de plagas".to_string(),
                description: Some("Control biológico y monitoreo".to_string()),
                date: day(2024, 6, 1),
                cost: Some(350.0),
                capacity: Some(20),
                status: WorkshopStatus::Upcoming,
            },
            Workshop {
                id: 2,
                name: "Riego eficiente".to_string(),
                description: None,
                date: day(2024, 2, 10),
                cost: Some(200.0),
                capacity: Some(15),
                status: WorkshopStatus::InProgress,
            },
            Workshop {
                id: 3,
                name: "Suelos vivos".to_string(),
                description: None,
                date: day(2023, 9, 5),
                cost: None,
                capacity: None,
                status: WorkshopStatus::Completed,
            },
        ];

        fixture.requests = vec![
            Solicitud {
                id: 1,
                kind: RequestKind::Advisory,
                status: RequestStatus::Pending,
                requester: "Lucía Pérez".to_string(),
                requester_id: Some(FARMER_ID),
                workshop_id: None,
                workshop_name: None,
                details: Some("Manchas en las hojas de la vid".to_string()),
                created_at: Some("2024-01-22".to_string()),
                payment_proof: None,
            },
            Solicitud {
                id: 2,
                kind: RequestKind::Workshop,
                status: RequestStatus::InReview,
                requester: "Jorge Ruiz".to_string(),
                requester_id: Some(8),
                workshop_id: Some(1),
                workshop_name: Some("Manejo integrado de plagas".to_string()),
                details: None,
                created_at: Some("2024-01-25".to_string()),
                payment_proof: Some("SPEI-0042".to_string()),
            },
            Solicitud {
                id: 3,
                kind: RequestKind::Workshop,
                status: RequestStatus::Accepted,
                requester: "Lucía Pérez".to_string(),
                requester_id: Some(FARMER_ID),
                workshop_id: Some(2),
                workshop_name: Some("Riego eficiente".to_string()),
                details: None,
                created_at: Some("2024-01-28".to_string()),
                payment_proof: None,
            },
            Solicitud {
                id: 4,
                kind: RequestKind::Advisory,
                status: RequestStatus::Completed,
                requester: "Jorge Ruiz".to_string(),
                requester_id: Some(8),
                workshop_id: None,
                workshop_name: None,
                details: Some("Plan de fertilización".to_string()),
                created_at: Some("2023-12-02".to_string()),
                payment_proof: None,
            },
        ];

        fixture.notifications = vec![
            (
                Role::Advisor,
                Notification {
                    id: 1,
                    message: "Nueva solicitud de asesoría de Lucía Pérez".to_string(),
                    date: Some("2024-01-22".to_string()),
                    read: false,
                },
            ),
            (
                Role::Advisor,
                Notification {
                    id: 2,
                    message: "Jorge Ruiz envió un comprobante de pago".to_string(),
                    date: Some("2024-01-25".to_string()),
                    read: true,
                },
            ),
            (
                Role::Farmer,
                Notification {
                    id: 3,
                    message: "Tu solicitud al taller Riego eficiente fue aceptada".to_string(),
                    date: Some("2024-01-28".to_string()),
                    read: false,
                },
            ),
        ];

        fixture
    }
}
