pub mod available;
pub mod config;
pub mod request;
pub mod resolve;
