//! Host texture backend abstraction.
//!
//! The production implementation drives OpenGL through `glow`
//! ([`crate::backend::GlowBackend`]); tests and benches use the in-memory
//! [`RecordingBackend`]. The trait is deliberately narrow: the texture unit
//! only ever creates, fills, parameterizes, binds and deletes 2D textures.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;

use crate::error::TextureError;

/// Block-compressed formats the host samples natively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompressedFormat {
    Bc1,
    Bc2,
    Bc3,
    Bc4,
    Bc5,
    Bc6hSigned,
    Bc6hUnsigned,
    Bc7,
}

/// Client texel layout for linear uploads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba,
    Rgb,
    Rg,
    Red,
}

/// Component type for linear uploads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelType {
    UnsignedByte,
    HalfFloat,
    Float,
    UnsignedShort565,
    UnsignedShort5551,
}

/// Minification filter with the mip selection folded in, GL-style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MagFilter {
    Nearest,
    Linear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
    ClampToBorder,
    MirrorClampToEdge,
}

/// Source for one output channel of a texture fetch, host terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwizzleComponent {
    Zero,
    One,
    Red,
    Green,
    Blue,
    Alpha,
}

/// Sampler parameters after guest→host translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplerDesc {
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub min_filter: MinFilter,
    pub mag_filter: MagFilter,
    pub border_color: [f32; 4],
}

/// Minimal host interface for 2D texture storage and sampling state.
///
/// Sampling state follows the classic GL model: [`apply_sampler`] affects
/// whatever texture is bound on the active unit, so callers bind first.
/// Uploads are full level-0 images; rows are tightly packed.
///
/// [`apply_sampler`]: TextureBackend::apply_sampler
pub trait TextureBackend {
    type Handle: Copy + Eq + fmt::Debug;

    /// Allocates an empty texture object.
    fn create_texture(&self) -> Result<Self::Handle, TextureError>;

    fn delete_texture(&self, handle: Self::Handle);

    fn upload_compressed_2d(
        &self,
        handle: Self::Handle,
        format: CompressedFormat,
        width: u32,
        height: u32,
        data: &[u8],
    );

    fn upload_2d(
        &self,
        handle: Self::Handle,
        format: PixelFormat,
        ty: PixelType,
        width: u32,
        height: u32,
        data: &[u8],
    );

    /// Sets the texture's channel swizzle, RGBA output order.
    fn set_swizzle(&self, handle: Self::Handle, swizzle: [SwizzleComponent; 4]);

    /// Binds `handle` to the numbered texture unit and leaves that unit
    /// active.
    fn bind_2d(&self, unit: u32, handle: Self::Handle);

    /// Applies sampler parameters to the texture bound on the active unit.
    fn apply_sampler(&self, sampler: &SamplerDesc);
}

/// One host call observed by [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq)]
pub enum BackendCall {
    CreateTexture {
        handle: u32,
    },
    DeleteTexture {
        handle: u32,
    },
    UploadCompressed2d {
        handle: u32,
        format: CompressedFormat,
        width: u32,
        height: u32,
        data: Vec<u8>,
    },
    Upload2d {
        handle: u32,
        format: PixelFormat,
        ty: PixelType,
        width: u32,
        height: u32,
        data: Vec<u8>,
    },
    SetSwizzle {
        handle: u32,
        swizzle: [SwizzleComponent; 4],
    },
    Bind2d {
        unit: u32,
        handle: u32,
    },
    ApplySampler(SamplerDesc),
}

/// In-memory backend for tests and benches: hands out sequential handles
/// starting at 1 and records every call in order.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_handle: Cell<u32>,
    calls: RefCell<Vec<BackendCall>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Ref<'_, [BackendCall]> {
        Ref::map(self.calls.borrow(), |v| v.as_slice())
    }

    /// Drains the recorded call log.
    pub fn take_calls(&self) -> Vec<BackendCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    /// Handles created and not yet deleted, in creation order.
    pub fn live_handles(&self) -> Vec<u32> {
        let mut live = Vec::new();
        for call in self.calls.borrow().iter() {
            match call {
                BackendCall::CreateTexture { handle } => live.push(*handle),
                BackendCall::DeleteTexture { handle } => live.retain(|h| h != handle),
                _ => {}
            }
        }
        live
    }

    pub fn deleted_handles(&self) -> Vec<u32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                BackendCall::DeleteTexture { handle } => Some(*handle),
                _ => None,
            })
            .collect()
    }
}

impl TextureBackend for RecordingBackend {
    type Handle = u32;

    fn create_texture(&self) -> Result<u32, TextureError> {
        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        self.calls
            .borrow_mut()
            .push(BackendCall::CreateTexture { handle });
        Ok(handle)
    }

    fn delete_texture(&self, handle: u32) {
        self.calls
            .borrow_mut()
            .push(BackendCall::DeleteTexture { handle });
    }

    fn upload_compressed_2d(
        &self,
        handle: u32,
        format: CompressedFormat,
        width: u32,
        height: u32,
        data: &[u8],
    ) {
        self.calls.borrow_mut().push(BackendCall::UploadCompressed2d {
            handle,
            format,
            width,
            height,
            data: data.to_vec(),
        });
    }

    fn upload_2d(
        &self,
        handle: u32,
        format: PixelFormat,
        ty: PixelType,
        width: u32,
        height: u32,
        data: &[u8],
    ) {
        self.calls.borrow_mut().push(BackendCall::Upload2d {
            handle,
            format,
            ty,
            width,
            height,
            data: data.to_vec(),
        });
    }

    fn set_swizzle(&self, handle: u32, swizzle: [SwizzleComponent; 4]) {
        self.calls
            .borrow_mut()
            .push(BackendCall::SetSwizzle { handle, swizzle });
    }

    fn bind_2d(&self, unit: u32, handle: u32) {
        self.calls
            .borrow_mut()
            .push(BackendCall::Bind2d { unit, handle });
    }

    fn apply_sampler(&self, sampler: &SamplerDesc) {
        self.calls
            .borrow_mut()
            .push(BackendCall::ApplySampler(*sampler));
    }
}
