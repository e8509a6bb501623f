use shared::state::AuthContext;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::{YewduxRoot, prelude::use_dispatch};

use crate::{
    api::Services,
    routes::{Route, switch},
    store::AuthStore,
};

/// Provides the yewdux context the rest of the app selects from.
#[function_component(Root)]
pub fn root() -> Html {
    html! {
        <YewduxRoot>
            <App />
        </YewduxRoot>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let auth = use_memo((), |_| Services::shared().auth);
    let dispatch = use_dispatch::<AuthStore>();

    {
        let dispatch = dispatch.clone();
        use_effect_with(auth.clone(), move |auth| {
            dispatch.set(AuthStore::from(&auth.state()));
            let subscription =
                auth.subscribe(move |state| dispatch.set(AuthStore::from(state)));
            move || drop(subscription)
        });
    }

    html! {
        <ContextProvider<AuthContext> context={(*auth).clone()}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<AuthContext>>
    }
}
