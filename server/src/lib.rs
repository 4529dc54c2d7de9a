pub mod modules;
pub mod server;

pub use modules::chat::ChatModule;
