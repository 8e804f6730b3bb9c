pub mod models;
pub mod operations;
pub mod scaffold;
pub mod server;
