use history::PredictionStore;
use session::{SubmitOutcome, store_outcome};
use yew::prelude::*;

mod components;
pub mod api_client;
pub mod common;
pub mod settings;
pub mod storage;

use api_client::GlooPredictionService;
use self::common::toast::{ToastContext, ToastProvider};
use components::predict_form::PredictForm;
use components::prediction_history::PredictionHistory;
use storage::LocalStorage;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Tab {
    Home,
    Predict,
}

/// Service health as shown in the navbar.
#[derive(Clone, Debug, PartialEq)]
enum ServiceState {
    Checking,
    Ready,
    NoModel,
    Down,
}

#[function_component(Navbar)]
fn navbar(props: &NavbarProps) -> Html {
    let tab_button = |tab: Tab, label: &'static str| {
        let on_select = props.on_select.clone();
        let active = props.active == tab;
        html! {
            <li>
                <button
                    class={classes!("btn", "btn-ghost", active.then_some("btn-active"))}
                    onclick={Callback::from(move |_| on_select.emit(tab))}
                >
                    {label}
                </button>
            </li>
        }
    };

    let (badge_class, badge_text) = match props.service_state {
        ServiceState::Checking => ("badge-ghost", "checking service"),
        ServiceState::Ready => ("badge-success", "service ready"),
        ServiceState::NoModel => ("badge-warning", "model not loaded"),
        ServiceState::Down => ("badge-error", "service unreachable"),
    };

    html! {
        <div class="navbar bg-primary text-primary-content">
            <div class="navbar-start">
                <span class="btn btn-ghost text-xl">{"Hotel Booking Cancellation Predictor"}</span>
            </div>
            <div class="navbar-center">
                <ul class="menu menu-horizontal px-1">
                    {tab_button(Tab::Home, "Home")}
                    {tab_button(Tab::Predict, "Predict")}
                </ul>
            </div>
            <div class="navbar-end">
                <span class={classes!("badge", badge_class)}>{badge_text}</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NavbarProps {
    active: Tab,
    service_state: ServiceState,
    on_select: Callback<Tab>,
}

#[function_component(PredictorPage)]
fn predictor_page() -> Html {
    let toast = use_context::<ToastContext>();
    let store = use_mut_ref(|| PredictionStore::load(LocalStorage::new()));
    let service = use_memo((), |_| GlooPredictionService::from_settings());
    let tab = use_state(|| Tab::Home);
    let service_state = use_state(|| ServiceState::Checking);
    let redraw = use_force_update();

    {
        let service = service.clone();
        let service_state = service_state.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let state = match service.health().await {
                    Ok(health) if health.is_ready() => ServiceState::Ready,
                    Ok(_) => ServiceState::NoModel,
                    Err(e) => {
                        log::warn!("Health check failed: {}", e);
                        ServiceState::Down
                    }
                };
                service_state.set(state);
            });
            || ()
        });
    }

    let on_outcome = {
        let store = store.clone();
        let toast = toast.clone();
        let tab = tab.clone();
        let redraw = redraw.clone();
        Callback::from(move |outcome: SubmitOutcome| {
            let outcome = store_outcome(outcome, &mut store.borrow_mut());
            log::info!("{}", outcome.message());
            if let Some(toast) = &toast {
                toast.show_outcome(&outcome);
            }
            if outcome.is_success() {
                tab.set(Tab::Home);
            }
            redraw.force_update();
        })
    };

    let on_delete = {
        let store = store.clone();
        let toast = toast.clone();
        let redraw = redraw.clone();
        Callback::from(move |index: usize| {
            let removed = store.borrow_mut().remove_at(index);
            match removed {
                Ok(Some(record)) => {
                    if let Some(toast) = &toast {
                        toast.show_info(format!("Deleted prediction from {}", record.display_time()));
                    }
                }
                Ok(None) => log::debug!("No prediction at position {}", index),
                Err(e) => {
                    log::error!("Failed to delete prediction: {}", e);
                    if let Some(toast) = &toast {
                        toast.show_error(format!("Failed to delete prediction: {}", e));
                    }
                }
            }
            redraw.force_update();
        })
    };

    let on_select = {
        let tab = tab.clone();
        Callback::from(move |selected: Tab| tab.set(selected))
    };

    let records = store.borrow().list().to_vec();

    html! {
        <div class="bg-base-200 min-h-screen">
            <Navbar active={*tab} service_state={(*service_state).clone()} {on_select} />
            <main class="p-6 max-w-5xl mx-auto">
                {match *tab {
                    Tab::Home => html! {
                        <>
                            <h2 class="text-3xl font-semibold text-blue-600 mb-6 text-center">
                                {"Cancellation Predictions"}
                            </h2>
                            <PredictionHistory {records} {on_delete} />
                        </>
                    },
                    Tab::Predict => html! { <PredictForm {service} {on_outcome} /> },
                }}
            </main>
        </div>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <ToastProvider>
            <PredictorPage />
        </ToastProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Booking Predictor Frontend Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("Prediction service URL: {}", settings.api_url);

    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
