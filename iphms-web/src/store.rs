use shared::{models::User, state::AuthState};
use yewdux::{Context, Store};

use crate::api::Services;

/// Mirror of the auth context that components select from.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AuthStore {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl AuthStore {
    pub fn auth_state(&self) -> AuthState {
        AuthState {
            user: self.user.clone(),
            is_loading: self.is_loading,
        }
    }
}

impl From<&AuthState> for AuthStore {
    fn from(state: &AuthState) -> Self {
        Self {
            user: state.user.clone(),
            is_loading: state.is_loading,
        }
    }
}

/// Starts from the rehydrated session so the first route guard decision
/// already sees a signed-in user.
impl Store for AuthStore {
    fn new(_cx: &Context) -> Self {
        Self::from(&Services::shared().auth.state())
    }

    fn should_notify(&self, old: &Self) -> bool {
        self != old
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::storage::BrowserStorage;
    use shared::session::{
        ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SESSION_KEYS, SessionStorage, USER_KEY,
    };
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn initial_state_comes_from_stored_session() {
        BrowserStorage
            .set_all(&[
                (ACCESS_TOKEN_KEY, "t7".to_string()),
                (REFRESH_TOKEN_KEY, "r7".to_string()),
                (
                    USER_KEY,
                    r#"{"ID":7,"name":"Ada","email":"ada@example.com","dateOfBirth":"1990-01-01","deviceId":"dev-7","role":"user"}"#
                        .to_string(),
                ),
            ])
            .unwrap();

        let store = <AuthStore as Store>::new(&Context::new());

        assert_eq!(store.user.as_ref().map(|user| user.id), Some(7));
        assert!(!store.is_loading);
        assert_eq!(store, AuthStore::from(&Services::shared().auth.state()));

        BrowserStorage.remove_all(&SESSION_KEYS).unwrap();
    }
}
