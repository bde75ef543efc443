pub mod server;
pub mod shows;
pub mod token;
