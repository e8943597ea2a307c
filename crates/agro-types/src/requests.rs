//! Advisory and workshop requests (solicitudes) and workshop offerings (talleres).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::status::{RequestStatus, WorkshopStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    #[serde(rename = "asesoria")]
    Advisory,
    #[serde(rename = "taller")]
    Workshop,
}

impl RequestKind {
    pub fn label_key(self) -> &'static str {
        match self {
            RequestKind::Advisory => "request.kind.advisory",
            RequestKind::Workshop => "request.kind.workshop",
        }
    }
}

/// A request record awaiting processing by an advisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solicitud {
    pub id: i64,
    #[serde(rename = "tipo")]
    pub kind: RequestKind,
    #[serde(rename = "estado")]
    pub status: RequestStatus,
    /// Display name of the requesting client.
    #[serde(rename = "solicitante")]
    pub requester: String,
    #[serde(rename = "id_cliente", default, skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<i64>,
    #[serde(rename = "id_taller", default, skip_serializing_if = "Option::is_none")]
    pub workshop_id: Option<i64>,
    #[serde(rename = "taller", default, skip_serializing_if = "Option::is_none")]
    pub workshop_name: Option<String>,
    /// Free text of an advisory request.
    #[serde(rename = "detalle", default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(rename = "fecha", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "comprobante", default, skip_serializing_if = "Option::is_none")]
    pub payment_proof: Option<String>,
}

/// Status transitions an advisor can trigger from the request list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestAction {
    Accept,
    Reject,
    ValidatePayment,
}

impl RequestAction {
    pub fn target_status(self) -> RequestStatus {
        match self {
            RequestAction::Accept => RequestStatus::Accepted,
            RequestAction::Reject => RequestStatus::Rejected,
            RequestAction::ValidatePayment => RequestStatus::Completed,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            RequestAction::Accept => "action.accept",
            RequestAction::Reject => "action.reject",
            RequestAction::ValidatePayment => "action.validate_payment",
        }
    }
}

impl Solicitud {
    /// Actions that make sense for this request in its current status.
    pub fn available_actions(&self) -> Vec<RequestAction> {
        match (self.kind, self.status) {
            (_, RequestStatus::Pending) => vec![RequestAction::Accept, RequestAction::Reject],
            (RequestKind::Workshop, RequestStatus::InReview) => {
                vec![RequestAction::ValidatePayment, RequestAction::Reject]
            }
            _ => vec![],
        }
    }

    /// Workshop requests accepted by the advisor wait for a payment proof.
    pub fn awaits_payment(&self) -> bool {
        self.kind == RequestKind::Workshop && self.status == RequestStatus::Accepted
    }
}

/// A workshop offering from `/talleres`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workshop {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "fecha", default, with = "crate::dates::optional")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "costo", default)]
    pub cost: Option<f64>,
    #[serde(rename = "cupo", default)]
    pub capacity: Option<u32>,
    #[serde(rename = "estado")]
    pub status: WorkshopStatus,
}

/// Body of `POST /talleres` and `PUT /talleres/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopInput {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "fecha", default, with = "crate::dates::optional")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "costo", default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(rename = "estado")]
    pub status: WorkshopStatus,
}

/// Body of `POST /solicitudtaller`: the workshops a client enrolls in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkshopRequestInput {
    #[serde(rename = "talleres")]
    pub workshop_ids: Vec<i64>,
}

/// Body of `POST /solicitudtaller/comprobante`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProof {
    #[serde(rename = "id_solicitud")]
    pub request_id: i64,
    /// Transfer reference or link to the uploaded receipt.
    #[serde(rename = "comprobante")]
    pub reference: String,
}
