use chrono::NaiveDate;
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

use std::future::Future;

use crate::common::{LeadError, non_empty, validate_email};
use crate::db;
use crate::models::{Lead, LeadCreate, LeadStatus};

pub const CONTACT_SOURCE: &str = "website_contact_form";
pub const RESERVATION_SOURCE: &str = "website_form";

/// Persists a new lead.
pub trait LeadStore {
    fn insert_lead(
        &self,
        data: &LeadCreate,
    ) -> impl Future<Output = Result<Lead, sqlx::Error>> + Send;
}

impl LeadStore for PgPool {
    async fn insert_lead(&self, data: &LeadCreate) -> Result<Lead, sqlx::Error> {
        db::create_lead(self, data).await
    }
}

/// Which outbound hook a submission goes to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LeadTarget {
    Contact,
    Reservation,
}

/// Best-effort delivery of a stored lead. Must not block or fail the
/// caller.
pub trait LeadNotifier {
    fn notify(&self, target: LeadTarget, payload: Value);
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    pub date: Option<NaiveDate>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ReservationRequest {
    pub space_id: Uuid,
    pub space_name: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub entity_name: String,
    pub date: Option<NaiveDate>,
    pub observations: String,
}

#[derive(Debug, Clone)]
pub enum LeadSubmission {
    Contact(ContactForm),
    Reservation(ReservationRequest),
}

impl LeadSubmission {
    pub fn target(&self) -> LeadTarget {
        match self {
            Self::Contact(_) => LeadTarget::Contact,
            Self::Reservation(_) => LeadTarget::Reservation,
        }
    }

    pub fn validate(&self, today: NaiveDate) -> Result<(), LeadError> {
        let (name, email, phone) = match self {
            Self::Contact(c) => (&c.name, &c.email, &c.phone),
            Self::Reservation(r) => (&r.name, &r.email, &r.whatsapp),
        };

        if non_empty(name).is_none() {
            return Err(LeadError::Invalid("Informe seu nome."));
        }
        if !validate_email(email) {
            return Err(LeadError::Invalid("Informe um e-mail válido."));
        }
        if non_empty(phone).is_none() {
            return Err(LeadError::Invalid("Informe um telefone para contato."));
        }

        if let Self::Reservation(r) = self {
            match r.date {
                None => return Err(LeadError::Invalid("Selecione uma data no calendário.")),
                Some(d) if d < today => {
                    return Err(LeadError::Invalid("A data selecionada já passou."));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    pub fn to_lead(&self, today: NaiveDate) -> LeadCreate {
        match self {
            Self::Contact(c) => LeadCreate {
                name: c.name.trim().to_string(),
                email: c.email.trim().to_string(),
                phone: c.phone.trim().to_string(),
                interest: format!("{} - {}", c.event_type.trim(), c.message.trim()),
                date: c.date.unwrap_or(today),
                status: LeadStatus::New,
                source: Some(CONTACT_SOURCE.to_string()),
            },
            Self::Reservation(r) => {
                let date = r.date.unwrap_or(today);
                LeadCreate {
                    name: r.name.trim().to_string(),
                    email: r.email.trim().to_string(),
                    phone: r.whatsapp.trim().to_string(),
                    interest: reservation_summary(r, date),
                    date,
                    status: LeadStatus::New,
                    source: Some(RESERVATION_SOURCE.to_string()),
                }
            }
        }
    }

    pub fn webhook_payload(&self, lead: &LeadCreate) -> Value {
        let mut payload = json!({
            "name": lead.name,
            "email": lead.email,
            "phone": lead.phone,
            "interest": lead.interest,
            "date": lead.date.format("%Y-%m-%d").to_string(),
            "status": lead.status.as_str(),
            "source": lead.source,
        });

        if let (Self::Reservation(r), Value::Object(map)) = (self, &mut payload) {
            map.insert("space_id".into(), json!(r.space_id));
            map.insert("space_name".into(), json!(r.space_name));
        }

        payload
    }
}

fn reservation_summary(r: &ReservationRequest, date: NaiveDate) -> String {
    format!(
        "SOLICITAÇÃO DE RESERVA:\n\
         Espaço: {}\n\
         Data: {}\n\
         Responsável: {}\n\
         WhatsApp: {}\n\
         \n\
         Observações:\n\
         {}",
        r.space_name,
        date.format("%d/%m/%Y"),
        r.entity_name.trim(),
        r.whatsapp.trim(),
        r.observations.trim(),
    )
}

/// Validates, stores, then notifies. Nothing is written or sent for an
/// invalid submission, and a failed insert sends nothing.
pub async fn submit_lead<S, N>(
    store: &S,
    notifier: &N,
    submission: &LeadSubmission,
    today: NaiveDate,
) -> Result<Lead, LeadError>
where
    S: LeadStore,
    N: LeadNotifier,
{
    submission.validate(today)?;

    let data = submission.to_lead(today);
    let lead = store.insert_lead(&data).await?;

    notifier.notify(submission.target(), submission.webhook_payload(&data));

    Ok(lead)
}
