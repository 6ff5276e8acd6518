pub mod error;
pub mod registrations;
pub mod server;
