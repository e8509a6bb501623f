use shared::{
    models::{VitalKind, Vitals, format_date},
    state::{Paginator, VitalsScope},
};
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    components::{loading::Loading, pagination::Pagination},
    hooks::{Fetch, use_vitals},
    routes::Route,
};

const PAGE_SIZE: usize = 10;

fn reading_row(reading: &Vitals) -> Html {
    let cells = VitalKind::ALL
        .iter()
        .map(|kind| html! { <td>{ kind.format_value(reading.value(*kind)) }</td> });

    html! {
        <tr key={reading.id.to_string()}>
            <td>{ format_date(reading.created_at.as_ref(), true) }</td>
            { for cells }
            <td>
                <Link<Route> to={Route::VitalsDetail { id: reading.id }} classes="btn btn-ghost btn-xs">
                    {"Details"}
                </Link<Route>>
            </td>
        </tr>
    }
}

#[function_component(VitalsHistoryPage)]
pub fn vitals_history_page() -> Html {
    let readings = use_vitals(VitalsScope::default());
    let paginator = use_state(|| Paginator::new(PAGE_SIZE, 0));

    let content = match &*readings {
        Fetch::Loading => html! { <Loading /> },
        Fetch::Failed(message) => html! {
            <div class="alert alert-error"><span>{ message.clone() }</span></div>
        },
        Fetch::Ready(readings) if readings.is_empty() => html! {
            <p class="opacity-70">{"No readings recorded yet."}</p>
        },
        Fetch::Ready(readings) => {
            let mut pager = *paginator;
            pager.set_total_items(readings.len());

            let on_page = {
                let paginator = paginator.clone();
                Callback::from(move |page: usize| {
                    let mut next = pager;
                    next.go_to(page);
                    paginator.set(next);
                })
            };
            let headers = VitalKind::ALL.iter().map(|kind| html! { <th>{ kind.label() }</th> });

            html! {
                <>
                    <div class="overflow-x-auto">
                        <table class="table table-zebra">
                            <thead>
                                <tr>
                                    <th>{"Recorded"}</th>
                                    { for headers }
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                { for pager.items(readings).iter().map(reading_row) }
                            </tbody>
                        </table>
                    </div>
                    <Pagination info={pager.info()} pages={pager.page_numbers()} {on_page} />
                </>
            }
        }
    };

    html! {
        <div>
            <h1 class="text-2xl font-bold mb-4">{"Vitals history"}</h1>
            { content }
        </div>
    }
}
