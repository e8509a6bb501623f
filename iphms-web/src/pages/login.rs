use shared::state::{
    AuthContext,
    auth::login_error_message,
    forms::{LoginField, LoginForm},
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{components::form_field::FormField, hooks::use_form, routes::Route};

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let auth = use_context::<AuthContext>();
    let navigator = use_navigator();
    let form = use_form(LoginForm::default);
    let error = use_state(|| None::<String>);

    let onsubmit = {
        let form = form.clone();
        let error = error.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let mut next = form.snapshot();
            let proceed = next.submit();
            form.set(next.clone());
            let (true, Some(auth)) = (proceed, auth.clone()) else {
                return;
            };
            error.set(None);

            let request = next.values().to_request();
            let (form, error, navigator) = (form.clone(), error.clone(), navigator.clone());
            spawn_local(async move {
                let result = auth.login(&request).await;
                next.finish_submit();
                form.set(next);
                match result {
                    Ok(_) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(err) => error.set(Some(login_error_message(&err))),
                }
            });
        })
    };

    let busy = form.state().is_submitting();

    html! {
        <div class="flex items-center justify-center">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" {onsubmit} novalidate=true>
                    <h2 class="card-title text-2xl">{"Sign in"}</h2>
                    if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{ message.clone() }</span>
                        </div>
                    }
                    <FormField
                        id="email"
                        label="Email"
                        input_type="email"
                        value={form.value(LoginField::Email)}
                        error={form.error(LoginField::Email)}
                        oninput={form.on_input(LoginField::Email)}
                        onblur={form.on_blur(LoginField::Email)}
                    />
                    <FormField
                        id="password"
                        label="Password"
                        input_type="password"
                        value={form.value(LoginField::Password)}
                        error={form.error(LoginField::Password)}
                        oninput={form.on_input(LoginField::Password)}
                        onblur={form.on_blur(LoginField::Password)}
                    />
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={busy}>
                            { if busy { "Signing in..." } else { "Sign in" } }
                        </button>
                    </div>
                    <p class="text-sm text-center">
                        {"No account yet? "}
                        <Link<Route> to={Route::Register} classes="link">{"Register"}</Link<Route>>
                    </p>
                </form>
            </div>
        </div>
    }
}
