pub mod client;
pub mod error;
pub mod formatter;
pub mod poller;
pub mod validator;
