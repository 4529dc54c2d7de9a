mod create_session;
mod delete_session;
mod edit_message;
mod rename_session;
mod send_message;

pub use create_session::*;
pub use delete_session::*;
pub use edit_message::*;
pub use rename_session::*;
pub use send_message::*;
