mod file_session_store;
mod in_memory_session_store;

pub use file_session_store::*;
pub use in_memory_session_store::*;
