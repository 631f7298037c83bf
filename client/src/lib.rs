use seed::{prelude::*, *};

pub mod alert;
pub mod api;
mod invoices;
pub mod repository;
mod services;
pub mod view_model;

// ------ ------
//     Init
// ------ ------

fn init(_: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders
        .subscribe(|alert: alert::Alert| Msg::Alert(alert::Msg::Show(alert)))
        .send_msg(Msg::Services(services::Msg::Load))
        .send_msg(Msg::Invoices(invoices::Msg::Load));
    Model::default()
}

// ------ ------
//     Model
// ------ ------

#[derive(Default)]
struct Model {
    services: services::Model,
    invoices: invoices::Model,
    alert: alert::Model,
}

// ------ ------
//    Update
// ------ ------

enum Msg {
    Services(services::Msg),
    Invoices(invoices::Msg),
    Alert(alert::Msg),
}

fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::Services(msg) => {
            services::update(msg, &mut model.services, &mut orders.proxy(Msg::Services));
        }
        Msg::Invoices(msg) => {
            invoices::update(msg, &mut model.invoices, &mut orders.proxy(Msg::Invoices));
        }
        Msg::Alert(msg) => alert::update(msg, &mut model.alert),
    }
}

// ------ ------
//     View
// ------ ------

fn view(model: &Model) -> impl IntoNodes<Msg> {
    div![
        attrs! {At::Class => "container my-4"},
        h1![attrs! {At::Class => "mb-4"}, "Facturación de Servicios"],
        div![
            attrs! {At::Class => "row"},
            div![
                attrs! {At::Class => "col-lg-6"},
                services::view(&model.services).map_msg(Msg::Services),
            ],
            div![
                attrs! {At::Class => "col-lg-6"},
                invoices::view(&model.invoices, model.services.repository.all())
                    .map_msg(Msg::Invoices),
            ],
        ],
        alert::view(&model.alert).map_msg(Msg::Alert),
    ]
}

// ------ ------
//     Start
// ------ ------

#[wasm_bindgen(start)]
pub fn start() {
    App::start("app", init, update, view);
}
