//! Seekho core: prompt rendering, model routing, the model gateway and the
//! curriculum, lesson and tutoring services built on top of them.

pub mod curriculum;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod policy;
pub mod prompts;
pub mod titles;
pub mod tutor;

pub use error::{Result, SeekhoError};
