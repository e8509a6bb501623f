use shared::{
    models::VitalKind,
    state::{VitalsScope, chart_series, vitals::CHART_WINDOW},
};
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::use_store_value;

use crate::{
    components::{chart::VitalsChart, loading::Loading, vital_card::VitalCard},
    hooks::{Fetch, use_vitals},
    routes::Route,
    store::AuthStore,
};

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let store = use_store_value::<AuthStore>();
    let readings = use_vitals(VitalsScope::default().with_limit(CHART_WINDOW));
    let greeting = store
        .user
        .as_ref()
        .map_or_else(|| "Dashboard".to_string(), |user| format!("Welcome, {}", user.name));

    let content = match &*readings {
        Fetch::Loading => html! { <Loading /> },
        Fetch::Failed(message) => html! {
            <div class="alert alert-error"><span>{ message.clone() }</span></div>
        },
        Fetch::Ready(readings) => {
            let latest = readings.first();
            let cards = VitalKind::ALL.iter().map(|kind| {
                html! { <VitalCard kind={*kind} value={latest.map(|reading| reading.value(*kind))} /> }
            });
            let charts = VitalKind::ALL.iter().map(|kind| {
                html! { <VitalsChart series={chart_series(readings, *kind)} /> }
            });
            let recorded = latest
                .and_then(|reading| reading.created_at)
                .map(|ts| format!("Last reading {ts}"));

            html! {
                <>
                    <div class="stats stats-vertical lg:stats-horizontal shadow w-full mb-2">
                        { for cards }
                    </div>
                    if let Some(recorded) = recorded {
                        <p class="text-sm opacity-70 mb-4">{ recorded }</p>
                    }
                    <div class="grid gap-4 md:grid-cols-2">
                        { for charts }
                    </div>
                </>
            }
        }
    };

    html! {
        <div>
            <div class="flex items-center justify-between mb-4">
                <h1 class="text-2xl font-bold">{ greeting }</h1>
                <Link<Route> to={Route::Vitals} classes="btn btn-outline btn-sm">{"View history"}</Link<Route>>
            </div>
            { content }
        </div>
    }
}
