pub mod builtins;
pub mod error;
pub mod interpreter;
pub mod pipeline;

pub mod prelude {
    pub use super::{
        builtins::*,
        error::*,
        interpreter::*,
        pipeline::*
    };
}
