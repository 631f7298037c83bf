use log::info;
use shared::{
    AlreadyPaid, Invoice, InvoiceId, NewInvoice, NewService, Service, ServiceId, ValidationError,
};
use std::io;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{}", rejection(.0))]
    Invalid(#[from] ValidationError),
    #[error("No existe servicio con ID: {0}")]
    UnknownService(ServiceId),
    /// An invoice was requested with a service id that does not exist.
    #[error("No existe servicio con ID: {0}")]
    MissingLineItem(ServiceId),
    #[error("No existe factura con ID: {0}")]
    UnknownInvoice(InvoiceId),
    #[error(transparent)]
    AlreadyPaid(#[from] AlreadyPaid),
    #[error("Error al procesar la solicitud: {0}")]
    Io(#[from] io::Error),
}

fn rejection(error: &ValidationError) -> &'static str {
    match error {
        ValidationError::BlankName => "El nombre del servicio no puede estar vacío",
        ValidationError::NonPositiveCost | ValidationError::InvalidCost => {
            "El costo del servicio debe ser mayor que cero"
        }
        ValidationError::NoServicesSelected => "Debe incluir al menos un servicio en la factura",
        ValidationError::BlankInvoiceId => "Debe indicar el ID de la factura",
    }
}

/// Services and invoices, each kept in its own single-file jfs store.
pub struct Billing {
    services: jfs::Store,
    invoices: jfs::Store,
    // held across every read-modify-write so workers cannot lose updates
    writes: Mutex<()>,
}

impl Billing {
    pub fn open(dir: &Path) -> io::Result<Self> {
        std::fs::create_dir_all(dir)?;

        Ok(Billing {
            services: jfs::Store::new_with_cfg(dir.join("servicios"), single_file())?,
            invoices: jfs::Store::new_with_cfg(dir.join("facturas"), single_file())?,
            writes: Mutex::new(()),
        })
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_service(&self, request: NewService) -> Result<Service, StoreError> {
        request.validate()?;
        let service = Service {
            id: ServiceId::new(Uuid::new_v4().to_string()),
            name: request.name.trim().to_string(),
            cost: request.cost,
        };

        let _guard = self.lock();
        self.services.save_with_id(&service, service.id.as_str())?;
        info!("servicio {} registrado ({})", service.id, service.name);
        Ok(service)
    }

    pub fn services(&self) -> Result<Vec<Service>, StoreError> {
        Ok(self.services.all::<Service>()?.into_values().collect())
    }

    pub fn service(&self, id: &ServiceId) -> Result<Service, StoreError> {
        find(&self.services, id.as_str())?.ok_or_else(|| StoreError::UnknownService(id.clone()))
    }

    pub fn create_invoice(&self, request: NewInvoice) -> Result<Invoice, StoreError> {
        request.validate()?;

        let _guard = self.lock();
        let services = request
            .service_ids
            .iter()
            .map(|id| {
                find::<Service>(&self.services, id.as_str())?
                    .ok_or_else(|| StoreError::MissingLineItem(id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let invoice = Invoice::new(InvoiceId::new(Uuid::new_v4().to_string()), services);
        self.invoices.save_with_id(&invoice, invoice.id.as_str())?;
        info!("factura {} generada por {}", invoice.id, invoice.total);
        Ok(invoice)
    }

    pub fn invoices(&self) -> Result<Vec<Invoice>, StoreError> {
        Ok(self.invoices.all::<Invoice>()?.into_values().collect())
    }

    pub fn invoice(&self, id: &InvoiceId) -> Result<Invoice, StoreError> {
        find(&self.invoices, id.as_str())?.ok_or_else(|| StoreError::UnknownInvoice(id.clone()))
    }

    /// Paying is rejected once the invoice is already paid.
    pub fn pay_invoice(&self, id: &InvoiceId) -> Result<Invoice, StoreError> {
        let _guard = self.lock();
        let mut invoice = self.invoice(id)?;
        invoice.pay()?;
        self.invoices.save_with_id(&invoice, id.as_str())?;
        info!("factura {} pagada", invoice.id);
        Ok(invoice)
    }
}

fn single_file() -> jfs::Config {
    let mut cfg = jfs::Config::default();
    cfg.single = true; // one json file per collection
    cfg
}

fn find<T: serde::de::DeserializeOwned>(store: &jfs::Store, id: &str) -> io::Result<Option<T>> {
    match store.get::<T>(id) {
        Ok(found) => Ok(Some(found)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn billing() -> (tempfile::TempDir, Billing) {
        let dir = tempfile::tempdir().unwrap();
        let billing = Billing::open(dir.path()).unwrap();
        (dir, billing)
    }

    fn new_service(name: &str, cost: i64) -> NewService {
        NewService {
            name: name.to_string(),
            cost: Decimal::from(cost),
        }
    }

    #[test]
    fn added_services_are_listed() {
        let (_dir, billing) = billing();

        let created = billing.add_service(new_service(" Consulta ", 50)).unwrap();

        assert_eq!(created.name, "Consulta");
        assert_eq!(billing.services().unwrap(), vec![created.clone()]);
        assert_eq!(billing.service(&created.id).unwrap(), created);
    }

    #[test]
    fn invalid_services_are_not_stored() {
        let (_dir, billing) = billing();

        let blank = billing.add_service(new_service("  ", 50)).unwrap_err();
        let free = billing.add_service(new_service("Consulta", 0)).unwrap_err();

        assert_eq!(blank.to_string(), "El nombre del servicio no puede estar vacío");
        assert_eq!(free.to_string(), "El costo del servicio debe ser mayor que cero");
        assert!(billing.services().unwrap().is_empty());
    }

    #[test]
    fn unknown_service_lookup() {
        let (_dir, billing) = billing();

        let error = billing.service(&ServiceId::new("nope")).unwrap_err();

        assert!(matches!(error, StoreError::UnknownService(_)));
        assert_eq!(error.to_string(), "No existe servicio con ID: nope");
    }

    #[test]
    fn invoices_total_their_services() {
        let (_dir, billing) = billing();
        let consulta = billing.add_service(new_service("Consulta", 50)).unwrap();
        let vacuna = billing.add_service(new_service("Vacuna", 30)).unwrap();

        let invoice = billing
            .create_invoice(NewInvoice {
                service_ids: vec![consulta.id.clone(), vacuna.id.clone()],
            })
            .unwrap();

        assert_eq!(invoice.total, Decimal::from(80));
        assert!(!invoice.paid);
        assert_eq!(invoice.services, vec![consulta, vacuna]);
        assert_eq!(billing.invoice(&invoice.id).unwrap(), invoice);
        assert_eq!(billing.invoices().unwrap().len(), 1);
    }

    #[test]
    fn invoices_need_existing_services() {
        let (_dir, billing) = billing();

        let empty = billing
            .create_invoice(NewInvoice {
                service_ids: Vec::new(),
            })
            .unwrap_err();
        let missing = billing
            .create_invoice(NewInvoice {
                service_ids: vec![ServiceId::new("ghost")],
            })
            .unwrap_err();

        assert_eq!(
            empty.to_string(),
            "Debe incluir al menos un servicio en la factura"
        );
        assert!(matches!(missing, StoreError::MissingLineItem(_)));
        assert!(billing.invoices().unwrap().is_empty());
    }

    #[test]
    fn paying_is_persisted_and_not_repeatable() {
        let (dir, billing) = billing();
        let consulta = billing.add_service(new_service("Consulta", 50)).unwrap();
        let invoice = billing
            .create_invoice(NewInvoice {
                service_ids: vec![consulta.id],
            })
            .unwrap();

        let paid = billing.pay_invoice(&invoice.id).unwrap();
        let again = billing.pay_invoice(&invoice.id).unwrap_err();

        assert!(paid.paid);
        assert_eq!(again.to_string(), "La factura ya ha sido pagada");

        let reopened = Billing::open(dir.path()).unwrap();
        assert!(reopened.invoice(&invoice.id).unwrap().paid);
    }

    #[test]
    fn paying_an_unknown_invoice() {
        let (_dir, billing) = billing();

        let error = billing.pay_invoice(&InvoiceId::new("f-404")).unwrap_err();

        assert_eq!(error.to_string(), "No existe factura con ID: f-404");
    }
}
