pub mod dashboard;
pub mod home;
pub mod login;
pub mod profile;
pub mod register;
pub mod users;
pub mod vitals_detail;
pub mod vitals_history;

pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;
pub use users::UsersPage;
pub use vitals_detail::VitalsDetailPage;
pub use vitals_history::VitalsHistoryPage;
