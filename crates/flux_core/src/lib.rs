pub mod catalog;
pub mod clock;
pub mod config;
pub mod input;
pub mod select;
pub mod session;
