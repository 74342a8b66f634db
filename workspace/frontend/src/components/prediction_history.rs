use model::PredictionRecord;
use yew::prelude::*;

use super::prediction_card::PredictionCard;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Newest first.
    pub records: Vec<PredictionRecord>,
    /// Receives the position of the card to delete.
    pub on_delete: Callback<usize>,
}

#[function_component(PredictionHistory)]
pub fn prediction_history(props: &Props) -> Html {
    if props.records.is_empty() {
        return html! {
            <div class="text-center text-gray-600 py-12">
                {"No predictions yet. Visit Predict page to create one!"}
            </div>
        };
    }

    html! {
        <div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 gap-6 w-full">
            {for props.records.iter().enumerate().map(|(index, record)| {
                let on_delete = {
                    let on_delete = props.on_delete.clone();
                    Callback::from(move |_| {
                        log::debug!("Delete requested for prediction at position {}", index);
                        on_delete.emit(index)
                    })
                };

                html! {
                    <PredictionCard key={index} record={record.clone()} on_delete={on_delete} />
                }
            })}
        </div>
    }
}
