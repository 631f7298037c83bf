//! Client-side mirrors of the server's collections.
//!
//! A repository never talks to the network on its own: every operation
//! validates its input and hands back the request future, and the result is
//! applied to the mirror once the controller receives it. A request that
//! fails validation therefore never exists.

use crate::api::{self, ApiError};
use shared::{Invoice, InvoiceId, NewInvoice, NewService, Service, ServiceId, ValidationError};
use std::future::Future;

#[derive(Debug, Default)]
pub struct ServiceRepository {
    services: Vec<Service>,
}

impl ServiceRepository {
    pub fn all(&self) -> &[Service] {
        &self.services
    }

    pub fn fetch_all(&self) -> impl Future<Output = Result<Vec<Service>, ApiError>> {
        api::fetch_services()
    }

    /// Replaces the mirror with a freshly fetched collection.
    pub fn loaded(&mut self, services: Vec<Service>) {
        self.services = services;
    }

    pub fn create(
        &self,
        name: &str,
        cost: &str,
    ) -> Result<impl Future<Output = Result<Service, ApiError>>, ValidationError> {
        let service = NewService::parse(name, cost)?;
        Ok(api::create_service(service))
    }

    pub fn created(&mut self, service: Service) {
        self.services.push(service);
    }

    pub fn get_one(&self, id: ServiceId) -> impl Future<Output = Result<Service, ApiError>> {
        api::fetch_service(id)
    }
}

#[derive(Debug, Default)]
pub struct InvoiceRepository {
    invoices: Vec<Invoice>,
}

impl InvoiceRepository {
    pub fn all(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn fetch_all(&self) -> impl Future<Output = Result<Vec<Invoice>, ApiError>> {
        api::fetch_invoices()
    }

    pub fn loaded(&mut self, invoices: Vec<Invoice>) {
        self.invoices = invoices;
    }

    pub fn create(
        &self,
        service_ids: Vec<ServiceId>,
    ) -> Result<impl Future<Output = Result<Invoice, ApiError>>, ValidationError> {
        let invoice = NewInvoice::new(service_ids)?;
        Ok(api::create_invoice(invoice))
    }

    /// Appends the server's record as is; the total is never recomputed here.
    pub fn created(&mut self, invoice: Invoice) {
        self.invoices.push(invoice);
    }

    pub fn get_one(&self, id: InvoiceId) -> impl Future<Output = Result<Invoice, ApiError>> {
        api::fetch_invoice(id)
    }

    /// `get_one` for an id typed by the user.
    pub fn lookup(
        &self,
        raw_id: &str,
    ) -> Result<impl Future<Output = Result<Invoice, ApiError>>, ValidationError> {
        let raw_id = raw_id.trim();
        if raw_id.is_empty() {
            return Err(ValidationError::BlankInvoiceId);
        }
        Ok(api::fetch_invoice(InvoiceId::new(raw_id)))
    }

    pub fn mark_paid(&self, id: InvoiceId) -> impl Future<Output = Result<Invoice, ApiError>> {
        api::pay_invoice(id)
    }

    /// Swaps in the record returned by a payment. Returns `false` when the
    /// mirror holds no invoice with that id, in which case nothing changes.
    pub fn paid(&mut self, invoice: Invoice) -> bool {
        match self.invoices.iter_mut().find(|known| known.id == invoice.id) {
            Some(known) => {
                *known = invoice;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn service(id: &str, name: &str, cost: i64) -> Service {
        Service {
            id: ServiceId::new(id),
            name: name.to_string(),
            cost: Decimal::from(cost),
        }
    }

    fn invoice(id: &str, services: Vec<Service>) -> Invoice {
        Invoice::new(InvoiceId::new(id), services)
    }

    #[test]
    fn loading_replaces_the_whole_mirror() {
        let mut repository = ServiceRepository::default();
        repository.created(service("old", "Baño", 20));

        repository.loaded(vec![service("a", "Consulta", 50), service("b", "Vacuna", 30)]);

        let ids: Vec<_> = repository.all().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn created_services_are_appended_with_the_server_id() {
        let mut repository = ServiceRepository::default();
        repository.loaded(vec![service("a", "Consulta", 50)]);

        repository.created(service("server-id", "Vacuna", 30));

        assert_eq!(repository.all().len(), 2);
        assert_eq!(repository.all()[1].id, ServiceId::new("server-id"));
    }

    #[test]
    fn invalid_services_are_rejected_before_any_request() {
        let repository = ServiceRepository::default();

        assert!(matches!(
            repository.create("  ", "50"),
            Err(ValidationError::BlankName)
        ));
        assert!(matches!(
            repository.create("Consulta", "0"),
            Err(ValidationError::NonPositiveCost)
        ));
        assert!(matches!(
            repository.create("Consulta", "-1"),
            Err(ValidationError::NonPositiveCost)
        ));
        assert!(matches!(
            repository.create("Consulta", "abc"),
            Err(ValidationError::InvalidCost)
        ));
    }

    #[test]
    fn valid_services_produce_a_request() {
        let repository = ServiceRepository::default();

        assert!(repository.create("Consulta", "50.00").is_ok());
        assert!(repository.all().is_empty());
    }

    #[test]
    fn empty_invoice_selection_is_rejected_before_any_request() {
        let repository = InvoiceRepository::default();

        assert!(matches!(
            repository.create(Vec::new()),
            Err(ValidationError::NoServicesSelected)
        ));
        assert!(repository.create(vec![ServiceId::new("a")]).is_ok());
    }

    #[test]
    fn blank_lookups_are_rejected() {
        let repository = InvoiceRepository::default();

        assert!(matches!(
            repository.lookup("   "),
            Err(ValidationError::BlankInvoiceId)
        ));
        assert!(repository.lookup(" f-1 ").is_ok());
    }

    #[test]
    fn payment_replaces_the_matching_invoice() {
        let mut repository = InvoiceRepository::default();
        repository.loaded(vec![
            invoice("f-1", vec![service("a", "Consulta", 50)]),
            invoice("f-2", vec![service("b", "Vacuna", 30)]),
        ]);
        let mut paid = invoice("f-2", vec![service("b", "Vacuna", 30)]);
        paid.paid = true;

        assert!(repository.paid(paid));

        assert!(!repository.all()[0].paid);
        assert!(repository.all()[1].paid);
    }

    #[test]
    fn payment_of_an_unknown_invoice_is_dropped() {
        let mut repository = InvoiceRepository::default();
        repository.loaded(vec![invoice("f-1", vec![service("a", "Consulta", 50)])]);
        let mut stranger = invoice("f-404", vec![service("a", "Consulta", 50)]);
        stranger.paid = true;

        assert!(!repository.paid(stranger));

        assert_eq!(repository.all().len(), 1);
        assert!(!repository.all()[0].paid);
    }

    #[test]
    fn created_invoices_keep_the_server_total() {
        let mut repository = InvoiceRepository::default();
        let mut from_server = invoice("f-1", vec![service("a", "Consulta", 50)]);
        from_server.total = Decimal::from(49);

        repository.created(from_server);

        assert_eq!(repository.all()[0].total, Decimal::from(49));
    }
}
