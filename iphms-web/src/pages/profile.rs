use shared::{
    models::{Notice, User},
    state::{
        forms::{ProfileField, ProfileForm},
        users::update_user,
    },
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yewdux::prelude::use_store_value;

use crate::{
    api::Services,
    components::{alert::Alert, form_field::FormField, loading::Loading},
    hooks::{Fetch, use_form, use_user},
    store::AuthStore,
};

const FIELDS: [(ProfileField, &str, &str, &str); 6] = [
    (ProfileField::Name, "name", "Full name", "text"),
    (ProfileField::Email, "email", "Email", "email"),
    (ProfileField::DateOfBirth, "date-of-birth", "Date of birth", "date"),
    (ProfileField::DeviceId, "device-id", "Device ID", "text"),
    (ProfileField::Password, "password", "New password", "password"),
    (ProfileField::ConfirmPassword, "confirm-password", "Confirm new password", "password"),
];

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let store = use_store_value::<AuthStore>();
    match store.user.as_ref() {
        Some(user) => html! { <ProfileLoader id={user.id} /> },
        None => html! { <Loading /> },
    }
}

#[derive(Properties, PartialEq)]
struct ProfileLoaderProps {
    id: u64,
}

/// Fetches the account fresh so the form starts from the server's values.
#[function_component(ProfileLoader)]
fn profile_loader(props: &ProfileLoaderProps) -> Html {
    let user = use_user(props.id);
    match &*user {
        Fetch::Loading => html! { <Loading /> },
        Fetch::Failed(message) => html! {
            <div class="alert alert-error"><span>{ message.clone() }</span></div>
        },
        Fetch::Ready(user) => html! { <ProfileEditor user={user.clone()} /> },
    }
}

#[derive(Properties, PartialEq)]
struct ProfileEditorProps {
    user: User,
}

#[function_component(ProfileEditor)]
fn profile_editor(props: &ProfileEditorProps) -> Html {
    // Saved values the next diff is computed against.
    let baseline = use_state(|| props.user.clone());
    let initial = props.user.clone();
    let form = use_form(move || ProfileForm::from_user(&initial));
    let notice = use_state(|| None::<Notice>);

    let onsubmit = {
        let form = form.clone();
        let notice = notice.clone();
        let baseline = baseline.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let mut next = form.snapshot();
            let proceed = next.submit();
            form.set(next.clone());
            if !proceed {
                return;
            }
            notice.set(None);

            let current = (*baseline).clone();
            let changes = next.values().changes(&current);
            let (form, notice, baseline) = (form.clone(), notice.clone(), baseline.clone());
            spawn_local(async move {
                let services = Services::shared();
                let outcome = update_user(&services.users, current.id, &changes).await;
                next.finish_submit();
                match outcome {
                    Ok((user, success)) => {
                        ProfileForm::clear_passwords(&mut next);
                        baseline.set(user);
                        notice.set(Some(success));
                    }
                    Err(failure) => notice.set(Some(failure)),
                }
                form.set(next);
            });
        })
    };

    let on_close = {
        let notice = notice.clone();
        Callback::from(move |()| notice.set(None))
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
        <div class="max-w-xl">
            <h1 class="text-2xl font-bold mb-4">{"Profile"}</h1>
            if let Some(notice) = (*notice).clone() {
                <Alert {notice} on_close={Some(on_close)} />
            }
            <form {onsubmit} novalidate=true>
                { for fields }
                <p class="text-xs opacity-70 mt-2">{"Leave the password blank to keep the current one."}</p>
                <button class="btn btn-primary mt-4" type="submit" disabled={busy}>
                    { if busy { "Saving..." } else { "Save changes" } }
                </button>
            </form>
        </div>
    }
}
