use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode, CONTROLS};
use seed::prelude::*;
use serde::de::DeserializeOwned;
use shared::{Invoice, InvoiceId, NewInvoice, NewService, Service, ServiceId};
use thiserror::Error;

pub const API_URL: &str = "/api";

/// Characters that would end or split a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

// ids typed by the user end up here, so they never reach the path raw
fn segment(id: &str) -> PercentEncode<'_> {
    utf8_percent_encode(id, SEGMENT)
}

pub fn services_url() -> String {
    format!("{}/servicio", API_URL)
}

pub fn service_url(id: &ServiceId) -> String {
    format!("{}/servicio/{}", API_URL, segment(id.as_str()))
}

pub fn invoices_url() -> String {
    format!("{}/factura", API_URL)
}

pub fn invoice_url(id: &InvoiceId) -> String {
    format!("{}/factura/{}", API_URL, segment(id.as_str()))
}

pub fn pay_invoice_url(id: &InvoiceId) -> String {
    format!("{}/factura/{}/pagar", API_URL, segment(id.as_str()))
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("la petición no pudo completarse: {0:?}")]
    Transport(fetch::FetchError),
    #[error("el servidor respondió {status}")]
    Server {
        status: u16,
        message: Option<String>,
    },
}

/// The user action a request was issued for. It decides which message the
/// alert shows when the request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadServices,
    CreateService,
    ShowService,
    LoadInvoices,
    CreateInvoice,
    ShowInvoice,
    PayInvoice,
}

impl Operation {
    pub fn generic_message(self) -> &'static str {
        match self {
            Operation::LoadServices => "Error al cargar servicios",
            Operation::CreateService => "Error al registrar el servicio",
            Operation::ShowService => "No se pudo obtener el detalle del servicio",
            Operation::LoadInvoices => "Error al cargar facturas",
            Operation::CreateInvoice => "Error al generar la factura",
            Operation::ShowInvoice => "No se pudo obtener el detalle de la factura",
            Operation::PayInvoice => "Error al pagar la factura",
        }
    }

    fn reports_server_message(self) -> bool {
        matches!(
            self,
            Operation::CreateService | Operation::CreateInvoice | Operation::PayInvoice
        )
    }
}

impl ApiError {
    pub fn alert_message(&self, operation: Operation) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } if operation.reports_server_message() => message.clone(),
            _ => operation.generic_message().to_string(),
        }
    }
}

async fn send<T: DeserializeOwned + 'static>(request: Request<'_>) -> Result<T, ApiError> {
    let response = request.fetch().await.map_err(ApiError::Transport)?;
    let status = response.status();
    if !status.is_ok() {
        // a failed body read just means there is no server message
        let message = response
            .text()
            .await
            .ok()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        return Err(ApiError::Server {
            status: status.code,
            message,
        });
    }
    response.json().await.map_err(ApiError::Transport)
}

pub async fn fetch_services() -> Result<Vec<Service>, ApiError> {
    send(Request::new(services_url())).await
}

pub async fn create_service(service: NewService) -> Result<Service, ApiError> {
    let request = Request::new(services_url())
        .method(Method::Post)
        .json(&service)
        .map_err(ApiError::Transport)?;
    send(request).await
}

pub async fn fetch_service(id: ServiceId) -> Result<Service, ApiError> {
    send(Request::new(service_url(&id))).await
}

pub async fn fetch_invoices() -> Result<Vec<Invoice>, ApiError> {
    send(Request::new(invoices_url())).await
}

pub async fn create_invoice(invoice: NewInvoice) -> Result<Invoice, ApiError> {
    let request = Request::new(invoices_url())
        .method(Method::Post)
        .json(&invoice)
        .map_err(ApiError::Transport)?;
    send(request).await
}

pub async fn fetch_invoice(id: InvoiceId) -> Result<Invoice, ApiError> {
    send(Request::new(invoice_url(&id))).await
}

pub async fn pay_invoice(id: InvoiceId) -> Result<Invoice, ApiError> {
    send(Request::new(pay_invoice_url(&id)).method(Method::Put)).await
}
