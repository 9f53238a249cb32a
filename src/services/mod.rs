pub mod catalog;
pub mod downstream;
pub mod main_screen;
pub mod pages;
