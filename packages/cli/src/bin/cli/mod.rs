pub mod admin;
pub mod catalog;
pub mod prefs;
pub mod utils;
