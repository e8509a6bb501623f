//! Data hooks that load through the shared services and expose view state.

use shared::{
    models::{User, Vitals},
    state::{
        FormModel, FormState, VitalsScope,
        users::{load_user, load_users},
        vitals::{load_vital, load_vitals},
    },
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yewdux::prelude::use_store_value;

use crate::{api::Services, store::AuthStore};

/// Progress of one fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Fetch<T> {
    fn from_result(result: Result<T, String>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(message) => Self::Failed(message),
        }
    }
}

/// Readings for the signed-in user (or everyone, per `scope`), refetched when
/// the scope or the user changes.
#[hook]
pub fn use_vitals(scope: VitalsScope) -> UseStateHandle<Fetch<Vec<Vitals>>> {
    let state = use_state(|| Fetch::Loading);
    let store = use_store_value::<AuthStore>();
    let user = store.user.clone();

    {
        let state = state.clone();
        use_effect_with((scope, user), move |(scope, user)| {
            let scope = *scope;
            let user = user.clone();
            state.set(Fetch::Loading);
            spawn_local(async move {
                let services = Services::shared();
                let result = load_vitals(&services.vitals, user.as_ref(), scope).await;
                state.set(Fetch::from_result(result));
            });
            || ()
        });
    }

    state
}

#[hook]
pub fn use_vital(id: u64) -> UseStateHandle<Fetch<Vitals>> {
    let state = use_state(|| Fetch::Loading);

    {
        let state = state.clone();
        use_effect_with(id, move |id| {
            let id = *id;
            state.set(Fetch::Loading);
            spawn_local(async move {
                let services = Services::shared();
                state.set(Fetch::from_result(load_vital(&services.vitals, id).await));
            });
            || ()
        });
    }

    state
}

/// Every account; the handle is returned so callers can replace the list
/// after a delete.
#[hook]
pub fn use_users() -> UseStateHandle<Fetch<Vec<User>>> {
    let state = use_state(|| Fetch::Loading);

    {
        let state = state.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let services = Services::shared();
                state.set(Fetch::from_result(load_users(&services.users).await));
            });
            || ()
        });
    }

    state
}

#[hook]
pub fn use_user(id: u64) -> UseStateHandle<Fetch<User>> {
    let state = use_state(|| Fetch::Loading);

    {
        let state = state.clone();
        use_effect_with(id, move |id| {
            let id = *id;
            state.set(Fetch::Loading);
            spawn_local(async move {
                let services = Services::shared();
                state.set(Fetch::from_result(load_user(&services.users, id).await));
            });
            || ()
        });
    }

    state
}

/// Form state kept across renders, with callbacks for the input components.
pub struct FormHandle<M: FormModel> {
    state: UseStateHandle<FormState<M>>,
}

impl<M: FormModel> Clone for FormHandle<M> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<M> FormHandle<M>
where
    M: FormModel + 'static,
    M::Field: 'static,
{
    pub fn state(&self) -> &FormState<M> {
        &self.state
    }

    /// A copy to mutate and hand back through [`FormHandle::set`].
    pub fn snapshot(&self) -> FormState<M> {
        (*self.state).clone()
    }

    pub fn set(&self, next: FormState<M>) {
        self.state.set(next);
    }

    pub fn value(&self, field: M::Field) -> AttrValue {
        AttrValue::from(self.state.value(field).to_string())
    }

    pub fn error(&self, field: M::Field) -> Option<AttrValue> {
        self.state
            .error(field)
            .map(|message| AttrValue::from(message.to_string()))
    }

    pub fn on_input(&self, field: M::Field) -> Callback<String> {
        let state = self.state.clone();
        Callback::from(move |value: String| {
            let mut next = (*state).clone();
            next.change(field, value);
            state.set(next);
        })
    }

    pub fn on_blur(&self, field: M::Field) -> Callback<()> {
        let state = self.state.clone();
        Callback::from(move |()| {
            let mut next = (*state).clone();
            next.blur(field);
            state.set(next);
        })
    }
}

#[hook]
pub fn use_form<M, F>(init: F) -> FormHandle<M>
where
    M: FormModel + 'static,
    M::Field: 'static,
    F: FnOnce() -> M,
{
    let state = use_state(move || FormState::new(init()));
    FormHandle { state }
}
