use crate::api::{ApiError, Operation};
use seed::{prelude::*, *};
use shared::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn title(self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Success => "Éxito",
            Severity::Warning | Severity::Info => "Atención",
        }
    }

    fn class(self) -> &'static str {
        match self {
            Severity::Success => "modal-title text-success",
            Severity::Error => "modal-title text-danger",
            Severity::Warning => "modal-title text-warning",
            Severity::Info => "modal-title text-info",
        }
    }
}

/// A notification waiting to be acknowledged. Controllers publish these with
/// `orders.notify`; the root subscribes and shows them.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Alert {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Alert {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn invalid(error: &ValidationError) -> Self {
        Alert {
            severity: Severity::Warning,
            message: error.to_string(),
        }
    }

    pub fn failed(error: &ApiError, operation: Operation) -> Self {
        Alert {
            severity: Severity::Error,
            message: error.alert_message(operation),
        }
    }
}

#[derive(Default)]
pub struct Model {
    current: Option<Alert>,
}

impl Model {
    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref()
    }
}

pub enum Msg {
    Show(Alert),
    Dismiss,
}

pub fn update(msg: Msg, model: &mut Model) {
    match msg {
        // a newer alert replaces the one on screen
        Msg::Show(alert) => model.current = Some(alert),
        Msg::Dismiss => model.current = None,
    }
}

pub fn view(model: &Model) -> Node<Msg> {
    match &model.current {
        None => empty![],
        Some(alert) => modal(
            span![attrs! {At::Class => alert.severity.class()}, alert.severity.title()],
            nodes![p![alert.message.clone()]],
            nodes![button![
                attrs! {At::Class => "btn btn-primary", At::Type => "button"},
                ev(Ev::Click, |_| Msg::Dismiss),
                "Aceptar"
            ]],
            || Msg::Dismiss,
        ),
    }
}

/// Bootstrap modal markup, shown as long as it is part of the view.
pub fn modal<Ms: 'static>(
    title: Node<Ms>,
    body: Vec<Node<Ms>>,
    footer: Vec<Node<Ms>>,
    on_close: impl FnOnce() -> Ms + Clone + 'static,
) -> Node<Ms> {
    div![
        div![
            attrs! {At::Class => "modal d-block", At::TabIndex => "-1"},
            div![
                attrs! {At::Class => "modal-dialog"},
                div![
                    attrs! {At::Class => "modal-content"},
                    div![
                        attrs! {At::Class => "modal-header"},
                        h5![attrs! {At::Class => "modal-title"}, title],
                        button![
                            attrs! {At::Class => "btn-close", At::Type => "button"},
                            ev(Ev::Click, move |_| on_close()),
                        ],
                    ],
                    div![attrs! {At::Class => "modal-body"}, body],
                    IF!(!footer.is_empty() => div![attrs! {At::Class => "modal-footer"}, footer]),
                ],
            ],
        ],
        div![attrs! {At::Class => "modal-backdrop show"}],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_follow_the_severity() {
        assert_eq!(Severity::Error.title(), "Error");
        assert_eq!(Severity::Success.title(), "Éxito");
        assert_eq!(Severity::Warning.title(), "Atención");
        assert_eq!(Severity::Info.title(), "Atención");
    }

    #[test]
    fn validation_failures_are_warnings() {
        let alert = Alert::invalid(&ValidationError::BlankName);

        assert_eq!(alert.severity, Severity::Warning);
        assert_eq!(
            alert.message,
            "El nombre es requerido y el costo debe ser mayor que cero"
        );
    }

    #[test]
    fn server_failures_are_errors() {
        let error = ApiError::Server {
            status: 404,
            message: Some("No existe factura con ID: x".to_string()),
        };

        let alert = Alert::failed(&error, Operation::ShowInvoice);

        assert_eq!(alert.severity, Severity::Error);
        assert_eq!(alert.message, "No se pudo obtener el detalle de la factura");
    }

    #[test]
    fn a_new_alert_replaces_the_current_one() {
        let mut model = Model::default();

        update(Msg::Show(Alert::info("primero")), &mut model);
        update(Msg::Show(Alert::success("segundo")), &mut model);
        assert_eq!(model.current().map(|a| a.message.as_str()), Some("segundo"));

        update(Msg::Dismiss, &mut model);
        assert!(model.current().is_none());
    }
}
