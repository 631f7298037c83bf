use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
pub mod billing;

pub use billing::{
    format_amount, AlreadyPaid, Invoice, InvoiceId, PaymentStatus, Service, ServiceId,
    ValidationError,
};

/// Body of `POST /api/servicio`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewService {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "costo")]
    pub cost: Decimal,
}

impl NewService {
    pub fn new(name: &str, cost: Decimal) -> Result<Self, ValidationError> {
        let service = NewService {
            name: name.trim().to_string(),
            cost,
        };
        service.validate()?;
        Ok(service)
    }

    /// Builds the request from raw form input. A cost that is not a decimal
    /// number fails the same way a non-positive one does.
    pub fn parse(name: &str, cost: &str) -> Result<Self, ValidationError> {
        let cost = cost
            .trim()
            .parse::<Decimal>()
            .map_err(|_| ValidationError::InvalidCost)?;
        NewService::new(name, cost)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName);
        }
        if self.cost <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveCost);
        }
        Ok(())
    }
}

/// Body of `POST /api/factura`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoice {
    #[serde(rename = "serviciosIds", default)]
    pub service_ids: Vec<ServiceId>,
}

impl NewInvoice {
    pub fn new(service_ids: impl IntoIterator<Item = ServiceId>) -> Result<Self, ValidationError> {
        let invoice = NewInvoice {
            service_ids: service_ids.into_iter().collect(),
        };
        invoice.validate()?;
        Ok(invoice)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.service_ids.is_empty() {
            return Err(ValidationError::NoServicesSelected);
        }
        Ok(())
    }
}
