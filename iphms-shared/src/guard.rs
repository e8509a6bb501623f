//! Role-gated navigation.
//!
//! Decisions are made from the cached [`AuthState`] alone; no request is sent,
//! so a decision is only as fresh as the last login, logout or expiry.

use crate::{models::UserRole, state::AuthState};

/// Public landing page; where rejected navigation ends up.
pub const LANDING_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    /// Only for visitors who are not signed in, e.g. login and register.
    GuestOnly,
    Authenticated,
    /// Signed in with [`UserRole::Admin`].
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// A sign-in is in flight and nobody is cached yet; render a placeholder.
    Wait,
    Redirect(&'static str),
}

impl GuardDecision {
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

/// Decide whether `state` may open a route with the given access level.
pub fn evaluate(access: RouteAccess, state: &AuthState) -> GuardDecision {
    let role = state.user.as_ref().map(|user| user.role);

    match (access, role) {
        (RouteAccess::Public, _) => GuardDecision::Allow,
        (RouteAccess::GuestOnly, None) => GuardDecision::Allow,
        (RouteAccess::GuestOnly, Some(_)) => GuardDecision::Redirect(DASHBOARD_PATH),
        (RouteAccess::Authenticated | RouteAccess::Admin, None) if state.is_loading => {
            GuardDecision::Wait
        }
        (RouteAccess::Authenticated | RouteAccess::Admin, None) => {
            GuardDecision::Redirect(LANDING_PATH)
        }
        (RouteAccess::Authenticated, Some(_)) | (RouteAccess::Admin, Some(UserRole::Admin)) => {
            GuardDecision::Allow
        }
        (RouteAccess::Admin, Some(UserRole::User)) => GuardDecision::Redirect(LANDING_PATH),
    }
}

/// A navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub access: RouteAccess,
}

const NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        label: "Dashboard",
        path: DASHBOARD_PATH,
        access: RouteAccess::Authenticated,
    },
    NavItem {
        label: "Vitals",
        path: "/vitals",
        access: RouteAccess::Authenticated,
    },
    NavItem {
        label: "Profile",
        path: "/profile",
        access: RouteAccess::Authenticated,
    },
    NavItem {
        label: "Users",
        path: "/users",
        access: RouteAccess::Admin,
    },
];

/// Navigation entries the guard would let `state` open.
pub fn navigation_items(state: &AuthState) -> Vec<NavItem> {
    NAV_ITEMS
        .iter()
        .copied()
        .filter(|item| evaluate(item.access, state).is_allowed())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::user;

    fn signed_in(role: UserRole) -> AuthState {
        AuthState {
            user: Some(user(1, role)),
            is_loading: false,
        }
    }

    #[test]
    fn signed_out_visitors_are_sent_to_landing() {
        let state = AuthState::default();
        assert_eq!(evaluate(RouteAccess::Public, &state), GuardDecision::Allow);
        assert_eq!(evaluate(RouteAccess::GuestOnly, &state), GuardDecision::Allow);
        assert_eq!(
            evaluate(RouteAccess::Authenticated, &state),
            GuardDecision::Redirect(LANDING_PATH)
        );
        assert_eq!(
            evaluate(RouteAccess::Admin, &state),
            GuardDecision::Redirect(LANDING_PATH)
        );
    }

    #[test]
    fn members_cannot_open_admin_routes() {
        let state = signed_in(UserRole::User);
        assert!(evaluate(RouteAccess::Authenticated, &state).is_allowed());
        assert_eq!(
            evaluate(RouteAccess::Admin, &state),
            GuardDecision::Redirect(LANDING_PATH)
        );
        assert_eq!(
            evaluate(RouteAccess::GuestOnly, &state),
            GuardDecision::Redirect(DASHBOARD_PATH)
        );
    }

    #[test]
    fn admins_open_everything_but_guest_pages() {
        let state = signed_in(UserRole::Admin);
        assert!(evaluate(RouteAccess::Admin, &state).is_allowed());
        assert!(evaluate(RouteAccess::Authenticated, &state).is_allowed());
        assert!(!evaluate(RouteAccess::GuestOnly, &state).is_allowed());
    }

    #[test]
    fn pending_sign_in_waits() {
        let state = AuthState {
            user: None,
            is_loading: true,
        };
        assert_eq!(evaluate(RouteAccess::Authenticated, &state), GuardDecision::Wait);
        assert_eq!(evaluate(RouteAccess::GuestOnly, &state), GuardDecision::Allow);
    }

    #[test]
    fn navigation_follows_role() {
        let labels = |state: &AuthState| {
            navigation_items(state)
                .into_iter()
                .map(|item| item.label)
                .collect::<Vec<_>>()
        };
        assert!(labels(&AuthState::default()).is_empty());
        assert_eq!(
            labels(&signed_in(UserRole::User)),
            vec!["Dashboard", "Vitals", "Profile"]
        );
        assert_eq!(
            labels(&signed_in(UserRole::Admin)),
            vec!["Dashboard", "Vitals", "Profile", "Users"]
        );
    }
}
