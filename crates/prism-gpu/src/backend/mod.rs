//! Host backend implementations.

mod glow_backend;

pub use glow_backend::GlowBackend;
