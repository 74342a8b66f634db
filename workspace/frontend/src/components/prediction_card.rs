use model::{PredictionRecord, RiskLevel};
use yew::prelude::*;

/// Text color for a probability of the given risk.
pub fn risk_class(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "text-green-700",
        RiskLevel::Medium => "text-orange-700",
        RiskLevel::High => "text-red-700",
    }
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub record: PredictionRecord,
    pub on_delete: Callback<()>,
}

#[function_component(PredictionCard)]
pub fn prediction_card(props: &Props) -> Html {
    let record = &props.record;
    let on_delete = {
        let on_delete = props.on_delete.clone();
        Callback::from(move |_| on_delete.emit(()))
    };

    html! {
        <div class="card bg-amber-100 border border-amber-200 shadow hover:shadow-md transition-shadow">
            <div class="card-body relative">
                <button
                    class="btn btn-sm btn-ghost btn-circle absolute top-2 right-2 text-red-600"
                    title="Delete prediction"
                    onclick={on_delete}
                >
                    {"×"}
                </button>
                <h3 class="card-title text-base text-blue-700">
                    {"Prediction Time: "}
                    <span class="font-normal">{record.display_time()}</span>
                </h3>
                <div class="flex justify-between items-center mt-2">
                    <span class="font-semibold">{"Cancellation Probability:"}</span>
                    <span class={classes!("text-xl", "font-bold", risk_class(record.risk_level()))}>
                        {format!("{}%", record.cancellation_probability)}
                    </span>
                </div>
                <div class="card-actions justify-end">
                    <span class="badge badge-ghost badge-sm">{format!("{} risk", record.risk_level())}</span>
                </div>
            </div>
        </div>
    }
}
