//! Identity, profile and account types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role as encoded by the API (`rol`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Role {
    /// Agrónomo (role id 1).
    Advisor,
    /// Cliente / agricultor (role id 2).
    Farmer,
}

impl Role {
    pub fn code(self) -> i64 {
        match self {
            Role::Advisor => 1,
            Role::Farmer => 2,
        }
    }
}

impl TryFrom<i64> for Role {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Role::Advisor),
            2 => Ok(Role::Farmer),
            other => Err(format!("unknown role code {other}")),
        }
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> Self {
        role.code()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Advisor => write!(f, "agronomo"),
            Role::Farmer => write!(f, "agricultor"),
        }
    }
}

/// The authenticated identity persisted between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "id")]
    pub user_id: i64,
    #[serde(rename = "rol")]
    pub role: Role,
    pub token: String,
    /// Cached display name, refreshed from the profile.
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Session {
    pub fn new(user_id: i64, role: Role, token: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            token: token.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// A session is usable only with a positive id and a non-blank token.
    pub fn is_complete(&self) -> bool {
        self.user_id > 0 && !self.token.trim().is_empty()
    }
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            user_id: response.user_id,
            role: response.role,
            token: response.token,
            display_name: response.display_name,
        }
    }
}

/// Credentials sent to `POST /login` as a URL-encoded form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub correo: String,
    pub contrasena: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "id")]
    pub user_id: i64,
    #[serde(rename = "nombre", default)]
    pub display_name: Option<String>,
}

/// Body of `POST /registro`. New accounts are always farmers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub nombre: String,
    pub correo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    pub contrasena: String,
    pub rol: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordRecoveryRequest {
    pub correo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "rol", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Body of `PUT /perfil/{id}`. Absent fields are left untouched by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "correo", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "contrasena", default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// A farmer account as seen by the advisor (`/administrarClientes`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "ubicacion", default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientUpdate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
    #[serde(rename = "leida", default)]
    pub read: bool,
}
