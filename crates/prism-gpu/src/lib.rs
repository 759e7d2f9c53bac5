//! `prism-gpu` contains the host texture pipeline used by Prism.
//!
//! Currently this crate provides:
//! - Translation of guest texture descriptors to host upload formats (see
//!   [`format_map`]).
//! - A software ASTC decoder for hosts without native ASTC support (see
//!   [`decompress_astc_rgba8`]).
//! - A size-weighted, lockable LRU cache over host texture objects (see
//!   [`ResourceCache`]).
//! - The texture unit tying the above together behind a host backend trait
//!   (see [`TextureUnit`]).

mod astc_decompress;
mod cache;
mod error;
mod texture_unit;

pub mod backend;
pub mod format_map;
pub mod hal;

pub use astc_decompress::{
    decompress_astc_rgba8, AstcDecodeError, ASTC_BLOCK_BYTES, ASTC_FOOTPRINTS,
};
pub use cache::{CacheStats, ResourceCache, TextureKey};
pub use error::TextureError;
pub use texture_unit::{TextureUnit, DEFAULT_CACHE_CAPACITY_BYTES};
