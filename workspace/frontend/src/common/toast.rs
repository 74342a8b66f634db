use session::SubmitOutcome;
use yew::prelude::*;

use crate::settings;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastType {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastType {
    /// Severity of a submission outcome.
    pub fn for_outcome(outcome: &SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Recorded(_) => ToastType::Success,
            SubmitOutcome::Unsaved { .. } | SubmitOutcome::Invalid(_) => ToastType::Warning,
            SubmitOutcome::Rejected(_) | SubmitOutcome::Failed(_) => ToastType::Error,
        }
    }

    fn alert_class(&self) -> &'static str {
        match self {
            ToastType::Info => "alert-info",
            ToastType::Success => "alert-success",
            ToastType::Warning => "alert-warning",
            ToastType::Error => "alert-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastType::Info => "fas fa-info-circle",
            ToastType::Success => "fas fa-check-circle",
            ToastType::Warning => "fas fa-exclamation-triangle",
            ToastType::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub message: String,
    pub toast_type: ToastType,
}

#[derive(Clone, PartialEq)]
pub struct ToastContext {
    pub add_toast: Callback<(String, ToastType)>,
}

impl ToastContext {
    pub fn show_info(&self, message: String) {
        self.add_toast.emit((message, ToastType::Info));
    }

    /// Report a submission to the user, colored by how it went.
    pub fn show_outcome(&self, outcome: &SubmitOutcome) {
        self.add_toast.emit((outcome.message(), ToastType::for_outcome(outcome)));
    }

    pub fn show_error(&self, message: String) {
        self.add_toast.emit((message, ToastType::Error));
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    // Shared handle so a timer firing later sees toasts added in between
    let toasts = use_mut_ref(Vec::<Toast>::new);
    let next_id = use_mut_ref(|| 0usize);
    let redraw = use_force_update();

    let remove_toast = {
        let toasts = toasts.clone();
        let redraw = redraw.clone();
        Callback::from(move |id: usize| {
            toasts.borrow_mut().retain(|t| t.id != id);
            redraw.force_update();
        })
    };

    let add_toast = {
        let toasts = toasts.clone();
        let next_id = next_id.clone();
        let remove_toast = remove_toast.clone();

        Callback::from(move |(message, toast_type): (String, ToastType)| {
            let id = {
                let mut next_id = next_id.borrow_mut();
                *next_id += 1;
                *next_id
            };

            toasts.borrow_mut().push(Toast {
                id,
                message,
                toast_type,
            });
            redraw.force_update();

            // Auto-dismiss
            let remove_toast = remove_toast.clone();
            let duration = settings::get_settings().toast_duration_ms;
            gloo_timers::callback::Timeout::new(duration, move || remove_toast.emit(id)).forget();
        })
    };

    let context = ToastContext { add_toast };

    html! {
        <ContextProvider<ToastContext> context={context}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for toasts.borrow().iter().map(|toast| {
                    let id = toast.id;
                    let on_close = {
                        let remove_toast = remove_toast.clone();
                        Callback::from(move |_| remove_toast.emit(id))
                    };

                    html! {
                        <div key={id} class={classes!("alert", toast.toast_type.alert_class(), "shadow-lg")}>
                            <i class={toast.toast_type.icon()}></i>
                            <span>{&toast.message}</span>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}
