#![cfg_attr(not(test), forbid(unsafe_code))]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Shared building blocks for the IPHMS clients.
//!
//! The crate owns everything both front ends need to talk to the vitals API:
//! wire models, the persisted session store, the authenticated HTTP client
//! with its token refresh interceptor, the auth/user/vitals services, the
//! process-wide auth context, and the route guard.

pub mod client;
pub mod config;
pub mod guard;
pub mod models;
pub mod services;
pub mod session;
pub mod state;

#[cfg(test)]
mod testing;
