pub mod catalog;
pub mod interactions;
pub mod pages;
pub mod users;
