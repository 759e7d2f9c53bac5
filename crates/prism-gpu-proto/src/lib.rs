//! Guest-visible texture and sampler state.
//!
//! These types sit between the command processor, which pulls raw
//! descriptor words out of guest memory, and the host texture pipeline in
//! `prism-gpu`. Enum encodings follow the guest GPU's descriptor layout;
//! the `from_raw` constructors are the boundary where unknown field values
//! become `None` for the caller to reject.

pub mod sampler;
pub mod texture;

pub use sampler::{MipFilter, SamplerState, TextureFilter, TextureWrap};
pub use texture::{SwizzleSource, TextureDescriptor, TextureFormat};
