//! View-facing state shared by the front ends.

pub mod auth;
pub mod forms;
pub mod pagination;
pub mod users;
pub mod vitals;

pub use auth::{AuthContext, AuthState, Subscription};
pub use forms::{FieldErrors, FormModel, FormState};
pub use pagination::{PageInfo, PageNumber, Paginator};
pub use vitals::{ChartSeries, VitalsScope, chart_series};
