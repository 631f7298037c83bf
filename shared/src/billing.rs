use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }
    };
}

identifier!(
    /// Server-assigned identifier of a [`Service`].
    ServiceId
);

identifier!(
    /// Server-assigned identifier of an [`Invoice`].
    InvoiceId
);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("El nombre es requerido y el costo debe ser mayor que cero")]
    BlankName,
    #[error("El nombre es requerido y el costo debe ser mayor que cero")]
    NonPositiveCost,
    #[error("El nombre es requerido y el costo debe ser mayor que cero")]
    InvalidCost,
    #[error("Debe seleccionar al menos un servicio")]
    NoServicesSelected,
    #[error("Ingrese un ID de factura")]
    BlankInvoiceId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("La factura ya ha sido pagada")]
pub struct AlreadyPaid;

/// A priced, named billable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "costo")]
    pub cost: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pendiente",
            PaymentStatus::Paid => "Pagada",
        }
    }
}

/// A bundle of services. The line items are fixed once the invoice exists
/// and `total` is always their summed cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    #[serde(rename = "servicios")]
    pub services: Vec<Service>,
    pub total: Decimal,
    #[serde(rename = "pagada")]
    pub paid: bool,
}

impl Invoice {
    pub fn new(id: InvoiceId, services: Vec<Service>) -> Self {
        let total = services.iter().map(|service| service.cost).sum();
        Invoice {
            id,
            services,
            total,
            paid: false,
        }
    }

    pub fn status(&self) -> PaymentStatus {
        if self.paid {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Pending
        }
    }

    /// Pending -> Paid. There is no way back.
    pub fn pay(&mut self) -> Result<(), AlreadyPaid> {
        if self.paid {
            return Err(AlreadyPaid);
        }
        self.paid = true;
        Ok(())
    }
}

/// Formats an amount the way every table and panel shows it: `$50.00`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn service(id: &str, name: &str, cost: &str) -> Service {
        Service {
            id: ServiceId::new(id),
            name: name.to_string(),
            cost: Decimal::from_str(cost).unwrap(),
        }
    }

    #[test]
    fn invoice_total_is_the_sum_of_its_services() {
        let invoice = Invoice::new(
            InvoiceId::new("f-1"),
            vec![service("s-1", "Consulta", "50.00"), service("s-2", "Vacuna", "12.35")],
        );

        assert_eq!(invoice.total, Decimal::from_str("62.35").unwrap());
        assert_eq!(invoice.status(), PaymentStatus::Pending);
    }

    #[test]
    fn paying_twice_is_rejected_and_stays_paid() {
        let mut invoice = Invoice::new(InvoiceId::new("f-1"), vec![service("s-1", "Consulta", "50")]);

        assert_eq!(invoice.pay(), Ok(()));
        assert_eq!(invoice.pay(), Err(AlreadyPaid));
        assert_eq!(invoice.status(), PaymentStatus::Paid);
    }

    #[test]
    fn amounts_are_shown_with_two_decimals() {
        assert_eq!(format_amount(Decimal::from(50)), "$50.00");
        assert_eq!(format_amount(Decimal::from_str("12.5").unwrap()), "$12.50");
        assert_eq!(format_amount(Decimal::from_str("1.005").unwrap()), "$1.01");
    }

    #[test]
    fn status_labels() {
        assert_eq!(PaymentStatus::Pending.label(), "Pendiente");
        assert_eq!(PaymentStatus::Paid.label(), "Pagada");
    }

    #[test]
    fn invoice_uses_the_spanish_wire_names() {
        let invoice = Invoice::new(InvoiceId::new("f-1"), vec![service("s-1", "Consulta", "50")]);
        let json = serde_json::to_value(&invoice).unwrap();

        assert_eq!(json["id"], "f-1");
        assert_eq!(json["pagada"], false);
        assert_eq!(json["total"], 50.0);
        assert_eq!(json["servicios"][0]["nombre"], "Consulta");
        assert_eq!(json["servicios"][0]["costo"], 50.0);
    }

    #[test]
    fn service_reads_numeric_costs() {
        let parsed: Service =
            serde_json::from_str(r#"{"id":"abc","nombre":"Consulta","costo":50.5}"#).unwrap();

        assert_eq!(parsed, service("abc", "Consulta", "50.5"));
    }
}
