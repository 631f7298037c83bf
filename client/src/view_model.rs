//! Render-ready views of the mirrored collections. Nothing here touches the
//! DOM, so every function is total and can be checked without a browser.

use shared::{format_amount, Invoice, InvoiceId, PaymentStatus, Service, ServiceId};
use std::collections::BTreeSet;

pub const NO_SERVICES: &str = "No hay servicios registrados";
pub const NO_SERVICES_AVAILABLE: &str = "No hay servicios disponibles";
pub const NO_INVOICES: &str = "No hay facturas generadas";

#[derive(Debug, Clone, PartialEq)]
pub enum Row<T> {
    Entry(T),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRow {
    pub id: ServiceId,
    pub name: String,
    pub cost: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOption {
    pub id: ServiceId,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub class: &'static str,
}

impl From<PaymentStatus> for Badge {
    fn from(status: PaymentStatus) -> Self {
        let class = match status {
            PaymentStatus::Pending => "badge bg-warning",
            PaymentStatus::Paid => "badge bg-success",
        };
        Badge {
            label: status.label(),
            class,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceRow {
    pub id: InvoiceId,
    pub total: String,
    pub badge: Badge,
    pub payable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub name: String,
    pub cost: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDetail {
    pub id: InvoiceId,
    pub badge: Badge,
    pub lines: Vec<LineItem>,
    pub total: String,
    pub payable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDetail {
    pub id: ServiceId,
    pub name: String,
    pub cost: String,
}

fn rows<T, R>(items: &[T], placeholder: &'static str, row: impl Fn(&T) -> R) -> Vec<Row<R>> {
    if items.is_empty() {
        return vec![Row::Placeholder(placeholder)];
    }
    items.iter().map(|item| Row::Entry(row(item))).collect()
}

pub fn service_rows(services: &[Service]) -> Vec<Row<ServiceRow>> {
    rows(services, NO_SERVICES, |service| ServiceRow {
        id: service.id.clone(),
        name: service.name.clone(),
        cost: format_amount(service.cost),
    })
}

/// The checkbox list used to compose an invoice.
pub fn service_options(
    services: &[Service],
    selected: &BTreeSet<ServiceId>,
) -> Vec<Row<ServiceOption>> {
    rows(services, NO_SERVICES_AVAILABLE, |service| ServiceOption {
        id: service.id.clone(),
        label: format!("{} - {}", service.name, format_amount(service.cost)),
        checked: selected.contains(&service.id),
    })
}

/// The checked ids in the order the options are listed.
pub fn selected_in_order(services: &[Service], selected: &BTreeSet<ServiceId>) -> Vec<ServiceId> {
    services
        .iter()
        .filter(|service| selected.contains(&service.id))
        .map(|service| service.id.clone())
        .collect()
}

pub fn invoice_rows(invoices: &[Invoice]) -> Vec<Row<InvoiceRow>> {
    rows(invoices, NO_INVOICES, |invoice| InvoiceRow {
        id: invoice.id.clone(),
        total: format_amount(invoice.total),
        badge: invoice.status().into(),
        payable: !invoice.paid,
    })
}

pub fn invoice_detail(invoice: &Invoice) -> InvoiceDetail {
    InvoiceDetail {
        id: invoice.id.clone(),
        badge: invoice.status().into(),
        lines: invoice
            .services
            .iter()
            .map(|service| LineItem {
                name: service.name.clone(),
                cost: format_amount(service.cost),
            })
            .collect(),
        total: format_amount(invoice.total),
        payable: !invoice.paid,
    }
}

pub fn service_detail(service: &Service) -> ServiceDetail {
    ServiceDetail {
        id: service.id.clone(),
        name: service.name.clone(),
        cost: format_amount(service.cost),
    }
}
