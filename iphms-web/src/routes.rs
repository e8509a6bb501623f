use shared::guard::{self, GuardDecision, RouteAccess};
use strum::EnumIter;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_store_value;

use crate::{
    components::{layout::Layout, loading::Loading},
    pages::*,
    store::AuthStore,
};

/// Every page of the dashboard.
#[derive(Debug, Clone, PartialEq, Routable, EnumIter)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/dashboard")]
    Dashboard,
    #[at("/vitals")]
    Vitals,
    #[at("/vitals/:id")]
    VitalsDetail { id: u64 },
    #[at("/profile")]
    Profile,
    #[at("/users")]
    Users,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Who may open the route.
    pub fn access(&self) -> RouteAccess {
        match self {
            Self::Home | Self::NotFound => RouteAccess::Public,
            Self::Login | Self::Register => RouteAccess::GuestOnly,
            Self::Dashboard | Self::Vitals | Self::VitalsDetail { .. } | Self::Profile => {
                RouteAccess::Authenticated
            }
            Self::Users => RouteAccess::Admin,
        }
    }

    /// The route a guard redirect path points at.
    pub fn from_path(path: &str) -> Self {
        Self::recognize(path).unwrap_or(Self::Home)
    }
}

#[derive(Properties, PartialEq)]
struct RouteViewProps {
    route: Route,
}

#[function_component(RouteView)]
fn route_view(props: &RouteViewProps) -> Html {
    let store = use_store_value::<AuthStore>();
    let route = props.route.clone();

    match guard::evaluate(route.access(), &store.auth_state()) {
        GuardDecision::Allow => {}
        GuardDecision::Wait => return html! { <Loading /> },
        GuardDecision::Redirect(path) => {
            return html! { <Redirect<Route> to={Route::from_path(path)} /> };
        }
    }

    let page = match route {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Vitals => html! { <VitalsHistoryPage /> },
        Route::VitalsDetail { id } => html! { <VitalsDetailPage {id} /> },
        Route::Profile => html! { <ProfilePage /> },
        Route::Users => html! { <UsersPage /> },
        Route::NotFound => return html! { <Redirect<Route> to={Route::Home} /> },
    };

    html! { <Layout>{ page }</Layout> }
}

/// Switch function for the app routes.
pub fn switch(route: Route) -> Html {
    tracing::debug!(?route, "switching route");
    html! { <RouteView {route} /> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{
        guard::{DASHBOARD_PATH, LANDING_PATH, LOGIN_PATH, navigation_items},
        models::{User, UserRole},
        state::AuthState,
    };
    use strum::IntoEnumIterator;

    fn admin() -> AuthState {
        AuthState {
            user: Some(User {
                id: 1,
                name: "Admin".into(),
                email: "admin@example.com".into(),
                date_of_birth: "1980-01-01".into(),
                device_id: "dev-1".into(),
                role: UserRole::Admin,
                created_at: None,
                updated_at: None,
            }),
            is_loading: false,
        }
    }

    #[test]
    fn paths_round_trip_through_the_router() {
        for route in Route::iter() {
            if route == Route::NotFound {
                continue;
            }
            assert_eq!(Route::recognize(&route.to_path()), Some(route.clone()), "{route:?}");
        }
        assert_eq!(Route::recognize("/vitals/42"), Some(Route::VitalsDetail { id: 42 }));
        assert_eq!(Route::recognize("/somewhere/else"), Some(Route::NotFound));
    }

    #[test]
    fn guard_targets_are_routes() {
        assert_eq!(Route::from_path(LANDING_PATH), Route::Home);
        assert_eq!(Route::from_path(LOGIN_PATH), Route::Login);
        assert_eq!(Route::from_path(DASHBOARD_PATH), Route::Dashboard);
    }

    #[test]
    fn access_levels_follow_the_page_kind() {
        assert_eq!(Route::Home.access(), RouteAccess::Public);
        assert_eq!(Route::Login.access(), RouteAccess::GuestOnly);
        assert_eq!(Route::Register.access(), RouteAccess::GuestOnly);
        assert_eq!(
            Route::VitalsDetail { id: 3 }.access(),
            RouteAccess::Authenticated
        );
        assert_eq!(Route::Users.access(), RouteAccess::Admin);
    }

    #[test]
    fn navigation_items_point_at_routes_with_the_same_access() {
        let items = navigation_items(&admin());
        assert_eq!(items.len(), 4);
        for item in items {
            let route = Route::recognize(item.path).expect("nav path is routable");
            assert_ne!(route, Route::NotFound, "{}", item.path);
            assert_eq!(route.access(), item.access, "{}", item.path);
        }
    }

    #[test]
    fn signed_out_visitor_is_kept_off_protected_pages() {
        let state = AuthState::default();
        for route in [Route::Dashboard, Route::Vitals, Route::Profile, Route::Users] {
            assert_eq!(
                guard::evaluate(route.access(), &state),
                GuardDecision::Redirect(LANDING_PATH)
            );
        }
        assert!(guard::evaluate(Route::Login.access(), &state).is_allowed());
    }
}
