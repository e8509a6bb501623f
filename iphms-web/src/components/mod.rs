pub mod alert;
pub mod chart;
pub mod form_field;
pub mod layout;
pub mod loading;
pub mod navbar;
pub mod pagination;
pub mod vital_card;
