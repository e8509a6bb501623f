use shared::{guard::navigation_items, state::AuthContext};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_store_value;

use crate::{routes::Route, store::AuthStore};

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let store = use_store_value::<AuthStore>();
    let auth = use_context::<AuthContext>();
    let navigator = use_navigator();
    let current = use_route::<Route>();

    let items = navigation_items(&store.auth_state());
    let links = items.iter().map(|item| {
        let route = Route::from_path(item.path);
        let active = current.as_ref() == Some(&route);
        html! {
            <li>
                <Link<Route> to={route} classes={classes!(active.then_some("active"))}>
                    { item.label }
                </Link<Route>>
            </li>
        }
    });

    let on_logout = Callback::from(move |_: MouseEvent| {
        if let Some(auth) = &auth {
            auth.logout();
        }
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Home);
        }
    });

    let account = match &store.user {
        Some(user) => html! {
            <div class="dropdown dropdown-end">
                <button class="btn btn-ghost btn-sm" tabindex="0">{ user.name.clone() }</button>
                <ul tabindex="0" class="dropdown-content menu z-[1] bg-base-200 p-2 rounded-box shadow w-48">
                    <li class="menu-title">{ user.email.clone() }</li>
                    <li><Link<Route> to={Route::Profile}>{"Profile"}</Link<Route>></li>
                    <li><a onclick={on_logout}>{"Logout"}</a></li>
                </ul>
            </div>
        },
        None => html! {
            <div class="flex gap-2">
                <Link<Route> to={Route::Login} classes="btn btn-ghost btn-sm">{"Login"}</Link<Route>>
                <Link<Route> to={Route::Register} classes="btn btn-primary btn-sm">{"Register"}</Link<Route>>
            </div>
        },
    };

    html! {
        <nav class="navbar justify-between bg-base-300">
            <Link<Route> to={Route::Home} classes="btn btn-ghost text-lg">{"IPHMS"}</Link<Route>>
            <ul class="menu menu-horizontal gap-1">
                { for links }
            </ul>
            { account }
        </nav>
    }
}
