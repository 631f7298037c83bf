use crate::alert::{self, Alert};
use crate::api::{ApiError, Operation};
use crate::repository::InvoiceRepository;
use crate::view_model::{self, InvoiceRow, Row, ServiceOption};
use seed::{prelude::*, *};
use shared::{Invoice, InvoiceId, Service, ServiceId};
use std::collections::BTreeSet;
use web_sys::console;

#[derive(Default)]
pub struct Model {
    pub repository: InvoiceRepository,
    pub selected: BTreeSet<ServiceId>,
    pub lookup: String,
    pub detail: Option<Invoice>,
}

impl Model {
    /// Applies a payment to the open detail panel, when it shows that
    /// invoice, and to the list. Returns whether the list held it.
    fn paid(&mut self, invoice: Invoice) -> bool {
        if let Some(detail) = self.detail.as_mut().filter(|detail| detail.id == invoice.id) {
            *detail = invoice.clone();
        }
        self.repository.paid(invoice)
    }
}

pub enum Msg {
    Load,
    Loaded(Result<Vec<Invoice>, ApiError>),
    ToggleService(ServiceId),
    Submit(Vec<ServiceId>),
    Created(Result<Invoice, ApiError>),
    LookupChanged(String),
    Lookup,
    LookedUp(Result<Invoice, ApiError>),
    Show(InvoiceId),
    Fetched(Result<Invoice, ApiError>),
    Pay(InvoiceId),
    Paid(Result<Invoice, ApiError>),
    CloseDetail,
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::Load => {
            let request = model.repository.fetch_all();
            orders
                .skip()
                .perform_cmd(async move { Msg::Loaded(request.await) });
        }

        Msg::Loaded(Ok(invoices)) => {
            console::log_1(&format!("{} facturas cargadas", invoices.len()).into());
            model.repository.loaded(invoices);
        }

        Msg::Loaded(Err(error)) => report(orders, &error, Operation::LoadInvoices),

        Msg::ToggleService(id) => {
            if !model.selected.remove(&id) {
                model.selected.insert(id);
            }
        }

        Msg::Submit(selected) => match model.repository.create(selected) {
            Ok(request) => {
                orders
                    .skip()
                    .perform_cmd(async move { Msg::Created(request.await) });
            }
            Err(error) => {
                orders.skip().notify(Alert::invalid(&error));
            }
        },

        Msg::Created(Ok(invoice)) => {
            let message = format!("Factura generada con éxito. ID: {}", invoice.id);
            model.repository.created(invoice);
            model.selected.clear();
            orders.notify(Alert::success(message));
        }

        Msg::Created(Err(error)) => report(orders, &error, Operation::CreateInvoice),

        Msg::LookupChanged(lookup) => {
            model.lookup = lookup;
        }

        Msg::Lookup => match model.repository.lookup(&model.lookup) {
            Ok(request) => {
                orders
                    .skip()
                    .perform_cmd(async move { Msg::LookedUp(request.await) });
            }
            Err(error) => {
                orders.skip().notify(Alert::invalid(&error));
            }
        },

        Msg::LookedUp(Ok(invoice)) => {
            model.lookup.clear();
            model.detail = Some(invoice);
        }

        Msg::Show(id) => {
            let request = model.repository.get_one(id);
            orders
                .skip()
                .perform_cmd(async move { Msg::Fetched(request.await) });
        }

        Msg::Fetched(Ok(invoice)) => {
            model.detail = Some(invoice);
        }

        Msg::LookedUp(Err(error)) | Msg::Fetched(Err(error)) => {
            report(orders, &error, Operation::ShowInvoice)
        }

        Msg::Pay(id) => {
            let request = model.repository.mark_paid(id);
            orders
                .skip()
                .perform_cmd(async move { Msg::Paid(request.await) });
        }

        Msg::Paid(Ok(invoice)) => {
            if !model.paid(invoice) {
                log!("factura pagada fuera del listado local");
            }
            orders.notify(Alert::success("Factura pagada con éxito"));
        }

        Msg::Paid(Err(error)) => report(orders, &error, Operation::PayInvoice),

        Msg::CloseDetail => {
            model.detail = None;
        }
    }
}

fn report(orders: &mut impl Orders<Msg>, error: &ApiError, operation: Operation) {
    error!("Error:", operation, error);
    orders.notify(Alert::failed(error, operation));
}

pub fn view(model: &Model, services: &[Service]) -> Vec<Node<Msg>> {
    nodes![
        div![
            attrs! {At::Class => "card mb-4"},
            div![attrs! {At::Class => "card-header"}, h5!["Generar Factura"]],
            div![attrs! {At::Class => "card-body"}, invoice_form(model, services)],
        ],
        div![
            attrs! {At::Class => "card mb-4"},
            div![attrs! {At::Class => "card-header"}, h5!["Facturas"]],
            div![
                attrs! {At::Class => "card-body"},
                lookup(model),
                invoice_table(model),
            ],
        ],
        model
            .detail
            .as_ref()
            .map_or_else(|| empty![], detail_modal),
    ]
}

fn invoice_form(model: &Model, services: &[Service]) -> Node<Msg> {
    let selected = view_model::selected_in_order(services, &model.selected);
    form![
        attrs! {At::Id => "facturaForm"},
        ev(Ev::Submit, move |event| {
            event.prevent_default();
            Msg::Submit(selected)
        }),
        div![
            attrs! {At::Id => "listaServiciosFactura", At::Class => "mb-3"},
            view_model::service_options(services, &model.selected)
                .into_iter()
                .map(service_option)
                .collect::<Vec<_>>(),
        ],
        button![
            attrs! {At::Class => "btn btn-primary", At::Type => "submit"},
            "Generar Factura"
        ],
    ]
}

fn service_option(row: Row<ServiceOption>) -> Node<Msg> {
    match row {
        Row::Placeholder(text) => p![
            attrs! {At::Id => "mensajeNoServicios", At::Class => "text-muted"},
            text
        ],
        Row::Entry(option) => {
            let dom_id = format!("servicio_{}", option.id);
            let id = option.id.clone();
            div![
                attrs! {At::Class => "form-check mb-2"},
                input![
                    attrs! {
                        At::Id => &dom_id,
                        At::Class => "form-check-input servicio-checkbox",
                        At::Type => "checkbox",
                        At::Value => option.id,
                        At::Checked => option.checked.as_at_value(),
                    },
                    ev(Ev::Change, move |_| Msg::ToggleService(id)),
                ],
                label![
                    attrs! {At::Class => "form-check-label", At::For => &dom_id},
                    option.label
                ],
            ]
        }
    }
}

fn lookup(model: &Model) -> Node<Msg> {
    div![
        attrs! {At::Class => "input-group mb-3"},
        input![
            input_ev(Ev::Input, Msg::LookupChanged),
            attrs! {
                At::Id => "facturaIdConsulta",
                At::Type => "text",
                At::Class => "form-control",
                At::Placeholder => "ID de factura",
                At::Value => &model.lookup,
            },
        ],
        button![
            attrs! {At::Id => "btnConsultarFactura", At::Class => "btn btn-secondary", At::Type => "button"},
            ev(Ev::Click, |_| Msg::Lookup),
            "Consultar"
        ],
    ]
}

fn invoice_table(model: &Model) -> Node<Msg> {
    table![
        attrs! {At::Id => "tablaFacturas", At::Class => "table table-striped"},
        thead![tr![th!["ID"], th!["Total"], th!["Estado"], th!["Acciones"]]],
        tbody![view_model::invoice_rows(model.repository.all())
            .into_iter()
            .map(invoice_row)
            .collect::<Vec<_>>()],
    ]
}

fn invoice_row(row: Row<InvoiceRow>) -> Node<Msg> {
    match row {
        Row::Placeholder(text) => tr![td![
            attrs! {At::ColSpan => "4", At::Class => "text-center"},
            text
        ]],
        Row::Entry(row) => {
            let show = row.id.clone();
            let pay = row.id.clone();
            tr![
                td![row.id.to_string()],
                td![row.total],
                td![span![attrs! {At::Class => row.badge.class}, row.badge.label]],
                td![
                    button![
                        attrs! {At::Class => "btn btn-sm btn-info me-1", At::Type => "button"},
                        ev(Ev::Click, move |_| Msg::Show(show)),
                        "Ver"
                    ],
                    IF!(row.payable => button![
                        attrs! {At::Class => "btn btn-sm btn-success", At::Type => "button"},
                        ev(Ev::Click, move |_| Msg::Pay(pay)),
                        "Pagar"
                    ]),
                ],
            ]
        }
    }
}

fn detail_modal(invoice: &Invoice) -> Node<Msg> {
    let detail = view_model::invoice_detail(invoice);
    let pay = detail.id.clone();
    let footer = if detail.payable {
        nodes![button![
            attrs! {At::Class => "btn btn-success", At::Type => "button"},
            ev(Ev::Click, move |_| Msg::Pay(pay)),
            "Pagar Factura"
        ]]
    } else {
        nodes![]
    };
    alert::modal(
        span!["Detalle de Factura"],
        nodes![
            div![
                attrs! {At::Class => "border p-3 mb-3"},
                h6!["Información de la Factura"],
                p![strong!["ID: "], detail.id.to_string()],
                p![
                    strong!["Estado: "],
                    span![attrs! {At::Class => detail.badge.class}, detail.badge.label],
                ],
            ],
            div![
                attrs! {At::Class => "border p-3"},
                h6!["Servicios Incluidos"],
                table![
                    attrs! {At::Class => "table table-sm"},
                    thead![tr![th!["Servicio"], th![attrs! {At::Class => "text-end"}, "Costo"]]],
                    tbody![detail
                        .lines
                        .into_iter()
                        .map(|line| tr![
                            td![line.name],
                            td![attrs! {At::Class => "text-end"}, line.cost],
                        ])
                        .collect::<Vec<Node<Msg>>>()],
                    tfoot![tr![
                        th!["Total"],
                        th![attrs! {At::Class => "text-end"}, detail.total],
                    ]],
                ],
            ],
        ],
        footer,
        || Msg::CloseDetail,
    )
}
