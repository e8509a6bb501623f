pub mod auth;
pub mod envelope;
pub mod notice;
pub mod timestamp;
pub mod user;
pub mod vitals;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest, TokenPair};
pub use envelope::{ApiEnvelope, ErrorBody};
pub use notice::{Notice, NoticeKind};
pub use timestamp::{Timestamp, format_date};
pub use user::{UpdateUserRequest, User, UserRole};
pub use vitals::{CreateVitalsRequest, VitalKind, Vitals, VitalsQuery};
