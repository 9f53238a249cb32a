pub mod catalog;
pub mod gateway;
