use shared::models::VitalKind;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct VitalCardProps {
    pub kind: VitalKind,
    /// Latest value; `None` when there are no readings yet.
    pub value: Option<f64>,
}

#[function_component(VitalCard)]
pub fn vital_card(props: &VitalCardProps) -> Html {
    let value = props
        .value
        .map_or_else(|| "--".to_string(), |value| props.kind.format_value(value));

    html! {
        <div class="stat bg-base-200 rounded-box">
            <div class="stat-title">{ props.kind.label() }</div>
            <div class="stat-value text-2xl">{ value }</div>
        </div>
    }
}
