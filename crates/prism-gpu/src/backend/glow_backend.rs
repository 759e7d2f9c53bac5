//! [`TextureBackend`] over a real OpenGL context via `glow`.

use std::rc::Rc;

use glow::HasContext;

use crate::error::TextureError;
use crate::hal::{
    CompressedFormat, MagFilter, MinFilter, PixelFormat, PixelType, SamplerDesc,
    SwizzleComponent, TextureBackend, WrapMode,
};

// Compressed internal formats and the mirror-clamp wrap come from GL
// extensions (EXT_texture_compression_s3tc, ARB_texture_compression_bptc,
// ARB_texture_mirror_clamp_to_edge); keep the raw values in one table.
mod gl_ext {
    pub const COMPRESSED_RGBA_S3TC_DXT1_EXT: u32 = 0x83f1;
    pub const COMPRESSED_RGBA_S3TC_DXT3_EXT: u32 = 0x83f2;
    pub const COMPRESSED_RGBA_S3TC_DXT5_EXT: u32 = 0x83f3;
    pub const COMPRESSED_RED_RGTC1: u32 = 0x8dbb;
    pub const COMPRESSED_RG_RGTC2: u32 = 0x8dbd;
    pub const COMPRESSED_RGBA_BPTC_UNORM: u32 = 0x8e8c;
    pub const COMPRESSED_RGB_BPTC_SIGNED_FLOAT: u32 = 0x8e8e;
    pub const COMPRESSED_RGB_BPTC_UNSIGNED_FLOAT: u32 = 0x8e8f;
    pub const MIRROR_CLAMP_TO_EDGE: u32 = 0x8743;
}

fn compressed_internal_format(format: CompressedFormat) -> u32 {
    match format {
        CompressedFormat::Bc1 => gl_ext::COMPRESSED_RGBA_S3TC_DXT1_EXT,
        CompressedFormat::Bc2 => gl_ext::COMPRESSED_RGBA_S3TC_DXT3_EXT,
        CompressedFormat::Bc3 => gl_ext::COMPRESSED_RGBA_S3TC_DXT5_EXT,
        CompressedFormat::Bc4 => gl_ext::COMPRESSED_RED_RGTC1,
        CompressedFormat::Bc5 => gl_ext::COMPRESSED_RG_RGTC2,
        CompressedFormat::Bc6hSigned => gl_ext::COMPRESSED_RGB_BPTC_SIGNED_FLOAT,
        CompressedFormat::Bc6hUnsigned => gl_ext::COMPRESSED_RGB_BPTC_UNSIGNED_FLOAT,
        CompressedFormat::Bc7 => gl_ext::COMPRESSED_RGBA_BPTC_UNORM,
    }
}

fn client_format(format: PixelFormat) -> u32 {
    match format {
        PixelFormat::Rgba => glow::RGBA,
        PixelFormat::Rgb => glow::RGB,
        PixelFormat::Rg => glow::RG,
        PixelFormat::Red => glow::RED,
    }
}

// Sized internal formats; an unsized one would let the driver store float
// texels as 8-bit normalized.
fn sized_internal_format(format: PixelFormat, ty: PixelType) -> u32 {
    match (format, ty) {
        (PixelFormat::Rgba, PixelType::Float) => glow::RGBA32F,
        (PixelFormat::Rgba, PixelType::HalfFloat) => glow::RGBA16F,
        (PixelFormat::Rgba, PixelType::UnsignedShort5551) => glow::RGB5_A1,
        (PixelFormat::Rgba, _) => glow::RGBA8,
        (PixelFormat::Rgb, PixelType::UnsignedShort565) => glow::RGB565,
        (PixelFormat::Rgb, _) => glow::RGB8,
        (PixelFormat::Rg, PixelType::Float) => glow::RG32F,
        (PixelFormat::Rg, PixelType::HalfFloat) => glow::RG16F,
        (PixelFormat::Rg, _) => glow::RG8,
        (PixelFormat::Red, PixelType::Float) => glow::R32F,
        (PixelFormat::Red, PixelType::HalfFloat) => glow::R16F,
        (PixelFormat::Red, _) => glow::R8,
    }
}

fn client_type(ty: PixelType) -> u32 {
    match ty {
        PixelType::UnsignedByte => glow::UNSIGNED_BYTE,
        PixelType::HalfFloat => glow::HALF_FLOAT,
        PixelType::Float => glow::FLOAT,
        PixelType::UnsignedShort565 => glow::UNSIGNED_SHORT_5_6_5,
        PixelType::UnsignedShort5551 => glow::UNSIGNED_SHORT_5_5_5_1,
    }
}

fn min_filter(filter: MinFilter) -> u32 {
    match filter {
        MinFilter::Nearest => glow::NEAREST,
        MinFilter::Linear => glow::LINEAR,
        MinFilter::NearestMipmapNearest => glow::NEAREST_MIPMAP_NEAREST,
        MinFilter::LinearMipmapNearest => glow::LINEAR_MIPMAP_NEAREST,
        MinFilter::NearestMipmapLinear => glow::NEAREST_MIPMAP_LINEAR,
        MinFilter::LinearMipmapLinear => glow::LINEAR_MIPMAP_LINEAR,
    }
}

fn mag_filter(filter: MagFilter) -> u32 {
    match filter {
        MagFilter::Nearest => glow::NEAREST,
        MagFilter::Linear => glow::LINEAR,
    }
}

fn wrap_mode(wrap: WrapMode) -> u32 {
    match wrap {
        WrapMode::Repeat => glow::REPEAT,
        WrapMode::MirroredRepeat => glow::MIRRORED_REPEAT,
        WrapMode::ClampToEdge => glow::CLAMP_TO_EDGE,
        WrapMode::ClampToBorder => glow::CLAMP_TO_BORDER,
        WrapMode::MirrorClampToEdge => gl_ext::MIRROR_CLAMP_TO_EDGE,
    }
}

fn swizzle_source(component: SwizzleComponent) -> u32 {
    match component {
        SwizzleComponent::Zero => glow::ZERO,
        SwizzleComponent::One => glow::ONE,
        SwizzleComponent::Red => glow::RED,
        SwizzleComponent::Green => glow::GREEN,
        SwizzleComponent::Blue => glow::BLUE,
        SwizzleComponent::Alpha => glow::ALPHA,
    }
}

/// Production backend over a shared [`glow::Context`].
///
/// Texture-object parameter calls bind the target texture on whatever unit
/// is currently active; [`TextureBackend::apply_sampler`] intentionally does
/// not bind, since sampling state targets the caller's current binding.
pub struct GlowBackend {
    gl: Rc<glow::Context>,
}

impl GlowBackend {
    pub fn new(gl: Rc<glow::Context>) -> Self {
        Self { gl }
    }
}

impl TextureBackend for GlowBackend {
    type Handle = <glow::Context as HasContext>::Texture;

    fn create_texture(&self) -> Result<Self::Handle, TextureError> {
        unsafe { self.gl.create_texture() }.map_err(TextureError::Backend)
    }

    fn delete_texture(&self, handle: Self::Handle) {
        unsafe { self.gl.delete_texture(handle) };
    }

    fn upload_compressed_2d(
        &self,
        handle: Self::Handle,
        format: CompressedFormat,
        width: u32,
        height: u32,
        data: &[u8],
    ) {
        let gl = &self.gl;
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(handle));
            gl.compressed_tex_image_2d(
                glow::TEXTURE_2D,
                0,
                compressed_internal_format(format) as i32,
                width as i32,
                height as i32,
                0,
                data.len() as i32,
                data,
            );
        }
    }

    fn upload_2d(
        &self,
        handle: Self::Handle,
        format: PixelFormat,
        ty: PixelType,
        width: u32,
        height: u32,
        data: &[u8],
    ) {
        let gl = &self.gl;
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(handle));
            // Guest rows are tightly packed; the default 4-byte row
            // alignment would skew 16-bit and single-channel images.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                sized_internal_format(format, ty) as i32,
                width as i32,
                height as i32,
                0,
                client_format(format),
                client_type(ty),
                Some(data),
            );
        }
    }

    fn set_swizzle(&self, handle: Self::Handle, swizzle: [SwizzleComponent; 4]) {
        let gl = &self.gl;
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(handle));
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_SWIZZLE_R,
                swizzle_source(swizzle[0]) as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_SWIZZLE_G,
                swizzle_source(swizzle[1]) as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_SWIZZLE_B,
                swizzle_source(swizzle[2]) as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_SWIZZLE_A,
                swizzle_source(swizzle[3]) as i32,
            );
        }
    }

    fn bind_2d(&self, unit: u32, handle: Self::Handle) {
        let gl = &self.gl;
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(handle));
        }
    }

    fn apply_sampler(&self, sampler: &SamplerDesc) {
        let gl = &self.gl;
        unsafe {
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                wrap_mode(sampler.wrap_s) as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                wrap_mode(sampler.wrap_t) as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                min_filter(sampler.min_filter) as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                mag_filter(sampler.mag_filter) as i32,
            );
            gl.tex_parameter_f32_slice(
                glow::TEXTURE_2D,
                glow::TEXTURE_BORDER_COLOR,
                &sampler.border_color,
            );
        }
    }
}
