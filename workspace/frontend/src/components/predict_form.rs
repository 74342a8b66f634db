use std::rc::Rc;

use chrono::Local;
use model::{FeatureKind, FeatureName};
use session::{FormSession, SubmitOutcome, request_prediction};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api_client::GlooPredictionService;

#[derive(Properties, PartialEq)]
pub struct PredictFormProps {
    pub service: Rc<GlooPredictionService>,
    /// Receives every outcome; storing a successful one is up to the parent.
    pub on_outcome: Callback<SubmitOutcome>,
}

/// The 24-field booking form.
///
/// Fields take any text while editing. The whole form is checked and sent on
/// submit, and cleared once the answer is in, whatever it was.
#[function_component(PredictForm)]
pub fn predict_form(props: &PredictFormProps) -> Html {
    let form = use_mut_ref(FormSession::new);
    let is_submitting = use_state(|| false);
    // Bumped on every reset so the controls remount empty
    let generation = use_mut_ref(|| 0u32);
    let redraw = use_force_update();

    let on_field = {
        let form = form.clone();
        let redraw = redraw.clone();
        Callback::from(move |(name, value): (FeatureName, String)| {
            form.borrow_mut().set_field(name, value);
            redraw.force_update();
        })
    };

    let on_submit = {
        let form = form.clone();
        let generation = generation.clone();
        let is_submitting = is_submitting.clone();
        let service = props.service.clone();
        let on_outcome = props.on_outcome.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if *is_submitting {
                return;
            }

            let values = form.borrow().values().clone();
            let form = form.clone();
            let generation = generation.clone();
            let is_submitting = is_submitting.clone();
            let service = service.clone();
            let on_outcome = on_outcome.clone();

            is_submitting.set(true);

            wasm_bindgen_futures::spawn_local(async move {
                log::info!("Submitting booking for prediction");
                let outcome =
                    request_prediction(service.as_ref(), &values, || Local::now().naive_local()).await;

                form.borrow_mut().reset();
                *generation.borrow_mut() += 1;
                is_submitting.set(false);
                on_outcome.emit(outcome);
            });
        })
    };

    let session = form.borrow();
    let generation = *generation.borrow();

    html! {
        <form onsubmit={on_submit} class="card bg-base-100 shadow-lg max-w-4xl mx-auto">
            <div class="card-body">
                <h2 class="card-title text-2xl text-blue-600 justify-center">{"New Prediction"}</h2>
                <div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 gap-4">
                    {for FeatureName::ALL.into_iter().map(|name| html! {
                        <FeatureField
                            key={field_key(generation, name)}
                            name={name}
                            value={session.field(name).to_string()}
                            disabled={*is_submitting}
                            on_change={on_field.clone()}
                        />
                    })}
                </div>
                <div class="card-actions mt-4">
                    <button type="submit" class="btn btn-primary w-full" disabled={*is_submitting}>
                        {if *is_submitting {
                            html! { <><span class="loading loading-spinner"></span>{"Predicting..."}</> }
                        } else {
                            html! { "Predict" }
                        }}
                    </button>
                </div>
            </div>
        </form>
    }
}

/// Key of a field control for one fill of the form.
///
/// Selects only take their initial `selected` option on mount, so a reset has
/// to hand every control a fresh key for the cleared values to show.
fn field_key(generation: u32, name: FeatureName) -> String {
    format!("{}-{}", generation, name.as_str())
}

#[derive(Properties, PartialEq)]
struct FeatureFieldProps {
    name: FeatureName,
    value: String,
    disabled: bool,
    on_change: Callback<(FeatureName, String)>,
}

#[function_component(FeatureField)]
fn feature_field(props: &FeatureFieldProps) -> Html {
    let name = props.name;

    let control = match name.kind() {
        FeatureKind::Choice(labels) => {
            let onchange = {
                let on_change = props.on_change.clone();
                Callback::from(move |e: Event| {
                    let select: HtmlSelectElement = e.target_unchecked_into();
                    on_change.emit((name, select.value()));
                })
            };

            html! {
                <select name={name.as_str()} class="select select-bordered w-full" disabled={props.disabled} {onchange}>
                    <option value="" selected={props.value.is_empty()}>{"Select..."}</option>
                    {for labels.iter().map(|label| html! {
                        <option value={*label} selected={props.value == *label}>{*label}</option>
                    })}
                </select>
            }
        }
        kind => {
            let oninput = {
                let on_change = props.on_change.clone();
                Callback::from(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    on_change.emit((name, input.value()));
                })
            };
            let step = if kind == FeatureKind::Decimal { "any" } else { "1" };

            html! {
                <input
                    type="number"
                    step={step}
                    name={name.as_str()}
                    class="input input-bordered w-full"
                    value={props.value.clone()}
                    disabled={props.disabled}
                    {oninput}
                />
            }
        }
    };

    html! {
        <div class="form-control">
            <label class="label"><span class="label-text">{name.label()}</span></label>
            {control}
        </div>
    }
}
