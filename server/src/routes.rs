use actix_web::{get, post, put, web, HttpResponse, Scope};
use shared::{InvoiceId, NewInvoice, NewService, ServiceId};

use crate::error::AppError;
use crate::store::{Billing, StoreError};

// ---- Apis ("/api/*") ----

pub fn api() -> Scope {
    web::scope("/api")
        .service(list_services)
        .service(add_service)
        .service(show_service)
        .service(list_invoices)
        .service(create_invoice)
        .service(show_invoice)
        .service(pay_invoice)
        .default_service(web::route().to(|| async { HttpResponse::NotFound().finish() }))
}

/// Runs a store operation on the blocking pool; jfs does plain file io.
async fn blocking<T, F>(store: web::Data<Billing>, op: F) -> Result<T, AppError>
where
    F: FnOnce(&Billing) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let result = web::block(move || op(store.get_ref())).await?;
    Ok(result?)
}

#[get("/servicio")]
async fn list_services(store: web::Data<Billing>) -> Result<HttpResponse, AppError> {
    let services = blocking(store, |store| store.services()).await?;
    Ok(HttpResponse::Ok().json(services))
}

#[post("/servicio")]
async fn add_service(
    store: web::Data<Billing>,
    body: web::Json<NewService>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let service = blocking(store, move |store| store.add_service(body)).await?;
    Ok(HttpResponse::Created().json(service))
}

#[get("/servicio/{id}")]
async fn show_service(
    store: web::Data<Billing>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = ServiceId::new(id.into_inner());
    let service = blocking(store, move |store| store.service(&id)).await?;
    Ok(HttpResponse::Ok().json(service))
}

#[get("/factura")]
async fn list_invoices(store: web::Data<Billing>) -> Result<HttpResponse, AppError> {
    let invoices = blocking(store, |store| store.invoices()).await?;
    Ok(HttpResponse::Ok().json(invoices))
}

#[post("/factura")]
async fn create_invoice(
    store: web::Data<Billing>,
    body: web::Json<NewInvoice>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let invoice = blocking(store, move |store| store.create_invoice(body)).await?;
    Ok(HttpResponse::Created().json(invoice))
}

#[get("/factura/{id}")]
async fn show_invoice(
    store: web::Data<Billing>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = InvoiceId::new(id.into_inner());
    let invoice = blocking(store, move |store| store.invoice(&id)).await?;
    Ok(HttpResponse::Ok().json(invoice))
}

#[put("/factura/{id}/pagar")]
async fn pay_invoice(
    store: web::Data<Billing>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = InvoiceId::new(id.into_inner());
    let invoice = blocking(store, move |store| store.pay_invoice(&id)).await?;
    Ok(HttpResponse::Ok().json(invoice))
}
