use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::use_store_value;

use crate::{routes::Route, store::AuthStore};

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let store = use_store_value::<AuthStore>();

    let actions = if store.user.is_some() {
        html! {
            <Link<Route> to={Route::Dashboard} classes="btn btn-primary">{"Go to dashboard"}</Link<Route>>
        }
    } else {
        html! {
            <div class="flex gap-2 justify-center">
                <Link<Route> to={Route::Login} classes="btn btn-primary">{"Login"}</Link<Route>>
                <Link<Route> to={Route::Register} classes="btn btn-outline">{"Create account"}</Link<Route>>
            </div>
        }
    };

    html! {
        <div class="hero min-h-[60vh]">
            <div class="hero-content text-center">
                <div class="max-w-lg">
                    <h1 class="text-4xl font-bold">{"Patient health monitoring"}</h1>
                    <p class="py-6">
                        {"Temperature, humidity, pulse rate and light intensity from your monitoring device, in one place."}
                    </p>
                    { actions }
                </div>
            </div>
        </div>
    }
}
