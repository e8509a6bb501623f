use shared::models::{VitalKind, format_date};
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    components::{loading::Loading, vital_card::VitalCard},
    hooks::{Fetch, use_vital},
    routes::Route,
};

#[derive(Properties, PartialEq)]
pub struct VitalsDetailProps {
    pub id: u64,
}

#[function_component(VitalsDetailPage)]
pub fn vitals_detail_page(props: &VitalsDetailProps) -> Html {
    let reading = use_vital(props.id);

    let content = match &*reading {
        Fetch::Loading => html! { <Loading /> },
        Fetch::Failed(message) => html! {
            <div class="alert alert-error"><span>{ message.clone() }</span></div>
        },
        Fetch::Ready(reading) => {
            let cards = VitalKind::ALL.iter().map(|kind| {
                html! { <VitalCard kind={*kind} value={Some(reading.value(*kind))} /> }
            });
            html! {
                <>
                    <div class="stats stats-vertical lg:stats-horizontal shadow w-full mb-4">
                        { for cards }
                    </div>
                    <dl class="grid grid-cols-2 gap-2 max-w-md text-sm">
                        <dt class="font-semibold">{"Recorded"}</dt>
                        <dd>{ format_date(reading.created_at.as_ref(), true) }</dd>
                        <dt class="font-semibold">{"Updated"}</dt>
                        <dd>{ format_date(reading.updated_at.as_ref(), true) }</dd>
                        <dt class="font-semibold">{"User"}</dt>
                        <dd>{ reading.user_id.to_string() }</dd>
                    </dl>
                </>
            }
        }
    };

    html! {
        <div>
            <div class="flex items-center justify-between mb-4">
                <h1 class="text-2xl font-bold">{ format!("Reading #{}", props.id) }</h1>
                <Link<Route> to={Route::Vitals} classes="btn btn-ghost btn-sm">{"Back to history"}</Link<Route>>
            </div>
            { content }
        </div>
    }
}
