//! Local form validation.
//!
//! Each form checks its raw input and, when valid, converts into the payload
//! sent to the API. A failing form yields [`ValidationErrors`] and must never
//! reach the network.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::dates::parse_form_day;
use crate::error::{ErrorCollector, ValidationErrors};
use crate::plans::{PestReportInput, TaskInput};
use crate::requests::{PaymentProof, WorkshopInput, WorkshopRequestInput};
use crate::status::{TaskStatus, WorkshopStatus};
use crate::types::{
    ClientUpdate, LoginRequest, PasswordRecoveryRequest, ProfileUpdate, RegistrationRequest, Role,
};

pub const REQUIRED: &str = "validation.required";
pub const INVALID_EMAIL: &str = "validation.email";
pub const INVALID_PHONE: &str = "validation.phone";
pub const INVALID_DATE: &str = "validation.date";
pub const INVALID_AMOUNT: &str = "validation.amount";
pub const PASSWORD_TOO_SHORT: &str = "validation.password_length";
pub const PASSWORD_MISMATCH: &str = "validation.password_mismatch";
pub const NO_WORKSHOP_SELECTED: &str = "validation.select_workshop";

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^\+?[0-9 \-]{7,15}$").expect("phone pattern is valid"))
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn check_email(errors: &mut ErrorCollector, field: &'static str, value: &str) {
    if blank(value) {
        errors.push(field, REQUIRED);
    } else if !email_regex().is_match(value.trim()) {
        errors.push(field, INVALID_EMAIL);
    }
}

fn check_optional_phone(errors: &mut ErrorCollector, field: &'static str, value: &str) {
    if !blank(value) && !phone_regex().is_match(value.trim()) {
        errors.push(field, INVALID_PHONE);
    }
}

fn check_new_password(errors: &mut ErrorCollector, password: &str, confirmation: &str) {
    if password.is_empty() {
        errors.push("contrasena", REQUIRED);
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push("contrasena", PASSWORD_TOO_SHORT);
    }
    if password != confirmation {
        errors.push("confirmacion", PASSWORD_MISMATCH);
    }
}

fn check_optional_day(errors: &mut ErrorCollector, field: &'static str, value: &str) {
    if !blank(value) && parse_form_day(value).is_none() {
        errors.push(field, INVALID_DATE);
    }
}

fn optional_day(value: &str) -> Option<NaiveDate> {
    if blank(value) {
        None
    } else {
        parse_form_day(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ErrorCollector::default();
        check_email(&mut errors, "correo", &self.email);
        if self.password.is_empty() {
            errors.push("contrasena", REQUIRED);
        }
        errors.finish()
    }
}

impl LoginForm {
    pub fn into_request(self) -> Result<LoginRequest, ValidationErrors> {
        self.validate()?;
        Ok(LoginRequest {
            correo: self.email.trim().to_string(),
            contrasena: self.password,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirmation: String,
}

impl Validate for RegistrationForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ErrorCollector::default();
        if blank(&self.name) {
            errors.push("nombre", REQUIRED);
        }
        check_email(&mut errors, "correo", &self.email);
        check_optional_phone(&mut errors, "telefono", &self.phone);
        check_new_password(&mut errors, &self.password, &self.confirmation);
        errors.finish()
    }
}

impl RegistrationForm {
    pub fn into_request(self) -> Result<RegistrationRequest, ValidationErrors> {
        self.validate()?;
        Ok(RegistrationRequest {
            nombre: self.name.trim().to_string(),
            correo: self.email.trim().to_string(),
            telefono: optional_text(&self.phone),
            contrasena: self.password,
            rol: Role::Farmer,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordRecoveryForm {
    pub email: String,
}

impl Validate for PasswordRecoveryForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ErrorCollector::default();
        check_email(&mut errors, "correo", &self.email);
        errors.finish()
    }
}

impl PasswordRecoveryForm {
    pub fn into_request(self) -> Result<PasswordRecoveryRequest, ValidationErrors> {
        self.validate()?;
        Ok(PasswordRecoveryRequest {
            correo: self.email.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordUpdateForm {
    pub password: String,
    pub confirmation: String,
}

impl Validate for PasswordUpdateForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ErrorCollector::default();
        check_new_password(&mut errors, &self.password, &self.confirmation);
        errors.finish()
    }
}

impl PasswordUpdateForm {
    pub fn into_update(self) -> Result<ProfileUpdate, ValidationErrors> {
        self.validate()?;
        Ok(ProfileUpdate {
            password: Some(self.password),
            ..Default::default()
        })
    }
}

/// Shared by the profile page and the advisor's client editor. The phone is
/// always sent, an empty string clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Validate for ContactForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ErrorCollector::default();
        if blank(&self.name) {
            errors.push("nombre", REQUIRED);
        }
        check_email(&mut errors, "correo", &self.email);
        check_optional_phone(&mut errors, "telefono", &self.phone);
        errors.finish()
    }
}

impl ContactForm {
    pub fn into_profile_update(self) -> Result<ProfileUpdate, ValidationErrors> {
        self.validate()?;
        Ok(ProfileUpdate {
            name: Some(self.name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            phone: Some(self.phone.trim().to_string()),
            password: None,
        })
    }

    pub fn into_client_update(self) -> Result<ClientUpdate, ValidationErrors> {
        self.validate()?;
        Ok(ClientUpdate {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: Some(self.phone.trim().to_string()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`, may be empty.
    pub due_date: String,
}

impl Validate for TaskForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ErrorCollector::default();
        if blank(&self.title) {
            errors.push("titulo", REQUIRED);
        }
        check_optional_day(&mut errors, "fecha_vencimiento", &self.due_date);
        errors.finish()
    }
}

impl TaskForm {
    pub fn into_input(self, plan_id: i64, status: TaskStatus) -> Result<TaskInput, ValidationErrors> {
        self.validate()?;
        Ok(TaskInput {
            plan_id,
            title: self.title.trim().to_string(),
            description: optional_text(&self.description),
            due_date: optional_day(&self.due_date),
            status,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PestReportForm {
    pub pest: String,
    pub description: String,
}

impl Validate for PestReportForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ErrorCollector::default();
        if blank(&self.pest) {
            errors.push("plaga", REQUIRED);
        }
        errors.finish()
    }
}

impl PestReportForm {
    pub fn into_input(self, plan_id: i64) -> Result<PestReportInput, ValidationErrors> {
        self.validate()?;
        Ok(PestReportInput {
            plan_id,
            pest: self.pest.trim().to_string(),
            description: optional_text(&self.description),
        })
    }
}

/// Workshops ticked in the catalog before submitting an enrollment request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkshopSelection {
    pub workshop_ids: Vec<i64>,
}

impl Validate for WorkshopSelection {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ErrorCollector::default();
        if self.workshop_ids.is_empty() {
            errors.push("talleres", NO_WORKSHOP_SELECTED);
        }
        errors.finish()
    }
}

impl WorkshopSelection {
    pub fn into_input(self) -> Result<WorkshopRequestInput, ValidationErrors> {
        self.validate()?;
        Ok(WorkshopRequestInput {
            workshop_ids: self.workshop_ids,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkshopForm {
    pub name: String,
    pub description: String,
    pub date: String,
    pub cost: String,
}

impl WorkshopForm {
    fn parsed_cost(&self) -> Option<Result<f64, ()>> {
        if blank(&self.cost) {
            return None;
        }
        Some(
            self.cost
                .trim()
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|c| c.is_finite() && *c >= 0.0)
                .ok_or(()),
        )
    }

    pub fn into_input(self, status: WorkshopStatus) -> Result<WorkshopInput, ValidationErrors> {
        self.validate()?;
        let cost = self.parsed_cost().and_then(Result::ok);
        Ok(WorkshopInput {
            name: self.name.trim().to_string(),
            description: optional_text(&self.description),
            date: optional_day(&self.date),
            cost,
            status,
        })
    }
}

impl Validate for WorkshopForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ErrorCollector::default();
        if blank(&self.name) {
            errors.push("nombre", REQUIRED);
        }
        check_optional_day(&mut errors, "fecha", &self.date);
        if let Some(Err(())) = self.parsed_cost() {
            errors.push("costo", INVALID_AMOUNT);
        }
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentProofForm {
    pub reference: String,
}

impl Validate for PaymentProofForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ErrorCollector::default();
        if blank(&self.reference) {
            errors.push("comprobante", REQUIRED);
        }
        errors.finish()
    }
}

impl PaymentProofForm {
    pub fn into_proof(self, request_id: i64) -> Result<PaymentProof, ValidationErrors> {
        self.validate()?;
        Ok(PaymentProof {
            request_id,
            reference: self.reference.trim().to_string(),
        })
    }
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
