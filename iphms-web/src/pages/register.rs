use shared::state::{
    AuthContext,
    auth::register_error_message,
    forms::{RegistrationField, RegistrationForm},
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{components::form_field::FormField, hooks::use_form, routes::Route};

const FIELDS: [(RegistrationField, &str, &str, &str); 6] = [
    (RegistrationField::Name, "name", "Full name", "text"),
    (RegistrationField::Email, "email", "Email", "email"),
    (RegistrationField::Password, "password", "Password", "password"),
    (RegistrationField::ConfirmPassword, "confirm-password", "Confirm password", "password"),
    (RegistrationField::DateOfBirth, "date-of-birth", "Date of birth", "date"),
    (RegistrationField::DeviceId, "device-id", "Device ID", "text"),
];

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let auth = use_context::<AuthContext>();
    let navigator = use_navigator();
    let form = use_form(RegistrationForm::default);
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
                let result = auth.register(&request).await;
                next.finish_submit();
                form.set(next);
                match result {
                    Ok(_) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(err) => error.set(Some(register_error_message(&err))),
                }
            });
        })
    };

    let busy = form.state().is_submitting();
    let fields = FIELDS.iter().map(|(field, id, label, input_type)| {
        html! {
            <FormField
                id={*id}
                label={*label}
                input_type={*input_type}
                value={form.value(*field)}
                error={form.error(*field)}
                oninput={form.on_input(*field)}
                onblur={form.on_blur(*field)}
            />
        }
    });

    html! {
        <div class="flex items-center justify-center">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" {onsubmit} novalidate=true>
                    <h2 class="card-title text-2xl">{"Create an account"}</h2>
                    if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{ message.clone() }</span>
                        </div>
                    }
                    { for fields }
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={busy}>
                            { if busy { "Creating account..." } else { "Register" } }
                        </button>
                    </div>
                    <p class="text-sm text-center">
                        {"Already registered? "}
                        <Link<Route> to={Route::Login} classes="link">{"Sign in"}</Link<Route>>
                    </p>
                </form>
            </div>
        </div>
    }
}
