mod gemini;
mod mock;
mod openai;
mod registry;
mod router;

pub use gemini::*;
pub use mock::*;
pub use openai::*;
pub use registry::*;
pub use router::*;
