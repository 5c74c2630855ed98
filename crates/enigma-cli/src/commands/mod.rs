pub mod connection;
pub mod overview;
pub mod session;
pub mod settings;
pub mod utils;
