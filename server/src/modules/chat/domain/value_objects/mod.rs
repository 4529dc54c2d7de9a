mod model;
mod prompt;
mod session_id;

pub use model::*;
pub use prompt::*;
pub use session_id::*;
