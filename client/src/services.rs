use crate::alert::{self, Alert};
use crate::api::{ApiError, Operation};
use crate::repository::ServiceRepository;
use crate::view_model::{self, Row, ServiceRow};
use seed::{prelude::*, *};
use shared::{Service, ServiceId};
use web_sys::console;

#[derive(Default)]
pub struct Model {
    pub repository: ServiceRepository,
    pub name: String,
    pub cost: String,
    pub detail: Option<Service>,
}

pub enum Msg {
    Load,
    Loaded(Result<Vec<Service>, ApiError>),
    NameChanged(String),
    CostChanged(String),
    Submit,
    Created(Result<Service, ApiError>),
    Show(ServiceId),
    Fetched(Result<Service, ApiError>),
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

        Msg::Loaded(Ok(services)) => {
            console::log_1(&format!("{} servicios cargados", services.len()).into());
            model.repository.loaded(services);
        }

        Msg::Loaded(Err(error)) => report(orders, &error, Operation::LoadServices),

        Msg::NameChanged(name) => {
            model.name = name;
        }

        Msg::CostChanged(cost) => {
            model.cost = cost;
        }

        Msg::Submit => match model.repository.create(&model.name, &model.cost) {
            Ok(request) => {
                orders
                    .skip()
                    .perform_cmd(async move { Msg::Created(request.await) });
            }
            Err(error) => {
                orders.skip().notify(Alert::invalid(&error));
            }
        },

        Msg::Created(Ok(service)) => {
            model.repository.created(service);
            model.name.clear();
            model.cost.clear();
            orders.notify(Alert::success("Servicio registrado con éxito"));
        }

        Msg::Created(Err(error)) => report(orders, &error, Operation::CreateService),

        Msg::Show(id) => {
            let request = model.repository.get_one(id);
            orders
                .skip()
                .perform_cmd(async move { Msg::Fetched(request.await) });
        }

        Msg::Fetched(Ok(service)) => {
            model.detail = Some(service);
        }

        Msg::Fetched(Err(error)) => report(orders, &error, Operation::ShowService),

        Msg::CloseDetail => {
            model.detail = None;
        }
    }
}

fn report(orders: &mut impl Orders<Msg>, error: &ApiError, operation: Operation) {
    error!("Error:", operation, error);
    orders.notify(Alert::failed(error, operation));
}

pub fn view(model: &Model) -> Vec<Node<Msg>> {
    nodes![
        div![
            attrs! {At::Class => "card mb-4"},
            div![attrs! {At::Class => "card-header"}, h5!["Registrar Servicio"]],
            div![attrs! {At::Class => "card-body"}, service_form(model)],
        ],
        div![
            attrs! {At::Class => "card mb-4"},
            div![attrs! {At::Class => "card-header"}, h5!["Servicios"]],
            div![attrs! {At::Class => "card-body"}, service_table(model)],
        ],
        model
            .detail
            .as_ref()
            .map_or_else(|| empty![], detail_modal),
    ]
}

fn service_form(model: &Model) -> Node<Msg> {
    form![
        attrs! {At::Id => "servicioForm"},
        ev(Ev::Submit, |event| {
            event.prevent_default();
            Msg::Submit
        }),
        div![
            attrs! {At::Class => "mb-3"},
            label![
                attrs! {At::Class => "form-label", At::For => "nombreServicio"},
                "Nombre"
            ],
            input![
                input_ev(Ev::Input, Msg::NameChanged),
                attrs! {
                    At::Id => "nombreServicio",
                    At::Type => "text",
                    At::Class => "form-control",
                    At::Value => &model.name,
                },
            ],
        ],
        div![
            attrs! {At::Class => "mb-3"},
            label![
                attrs! {At::Class => "form-label", At::For => "costoServicio"},
                "Costo"
            ],
            input![
                input_ev(Ev::Input, Msg::CostChanged),
                attrs! {
                    At::Id => "costoServicio",
                    At::Type => "number",
                    At::Step => "0.01",
                    At::Min => "0.01",
                    At::Class => "form-control",
                    At::Value => &model.cost,
                },
            ],
        ],
        button![
            attrs! {At::Class => "btn btn-primary", At::Type => "submit"},
            "Registrar"
        ],
    ]
}

fn service_table(model: &Model) -> Node<Msg> {
    table![
        attrs! {At::Id => "tablaServicios", At::Class => "table table-striped"},
        thead![tr![th!["ID"], th!["Nombre"], th!["Costo"], th!["Acciones"]]],
        tbody![view_model::service_rows(model.repository.all())
            .into_iter()
            .map(service_row)
            .collect::<Vec<_>>()],
    ]
}

fn service_row(row: Row<ServiceRow>) -> Node<Msg> {
    match row {
        Row::Placeholder(text) => tr![td![
            attrs! {At::ColSpan => "4", At::Class => "text-center"},
            text
        ]],
        Row::Entry(row) => {
            let id = row.id.clone();
            tr![
                td![row.id.to_string()],
                td![row.name],
                td![row.cost],
                td![button![
                    attrs! {At::Class => "btn btn-sm btn-info", At::Type => "button"},
                    ev(Ev::Click, move |_| Msg::Show(id)),
                    "Ver"
                ]],
            ]
        }
    }
}

fn detail_modal(service: &Service) -> Node<Msg> {
    let detail = view_model::service_detail(service);
    alert::modal(
        span!["Detalle del Servicio"],
        nodes![div![
            attrs! {At::Class => "text-start"},
            p![strong!["ID: "], detail.id.to_string()],
            p![strong!["Nombre: "], detail.name],
            p![strong!["Costo: "], detail.cost],
        ]],
        nodes![],
        || Msg::CloseDetail,
    )
}
