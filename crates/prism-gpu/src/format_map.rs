//! Guest→host translation of texture formats and sampler state.
//!
//! Routing works off two predicates: [`is_host_compressed`] formats upload
//! as-is through the compressed path, [`is_software_decoded`] formats are
//! decoded to RGBA8 on the CPU first, and everything else goes through
//! [`pixel_format`] as linear texels.

use prism_gpu_proto::{MipFilter, SwizzleSource, TextureFilter, TextureFormat, TextureWrap};

use crate::error::TextureError;
use crate::hal;

/// True for formats the host samples natively in compressed form.
pub fn is_host_compressed(format: TextureFormat) -> bool {
    use TextureFormat as F;
    matches!(
        format,
        F::Bc1 | F::Bc2 | F::Bc3 | F::Bc4 | F::Bc5 | F::Bc6hSf16 | F::Bc6hUf16 | F::Bc7
    )
}

/// True for formats the host cannot sample at all, which the pipeline
/// decodes on the CPU before upload.
pub fn is_software_decoded(format: TextureFormat) -> bool {
    format.is_astc()
}

pub fn compressed_format(format: TextureFormat) -> Result<hal::CompressedFormat, TextureError> {
    use TextureFormat as F;
    Ok(match format {
        F::Bc1 => hal::CompressedFormat::Bc1,
        F::Bc2 => hal::CompressedFormat::Bc2,
        F::Bc3 => hal::CompressedFormat::Bc3,
        F::Bc4 => hal::CompressedFormat::Bc4,
        F::Bc5 => hal::CompressedFormat::Bc5,
        F::Bc6hSf16 => hal::CompressedFormat::Bc6hSigned,
        F::Bc6hUf16 => hal::CompressedFormat::Bc6hUnsigned,
        F::Bc7 => hal::CompressedFormat::Bc7,
        other => return Err(TextureError::NotCompressed(other)),
    })
}

/// (client format, component type) pair for the linear upload path.
pub fn pixel_format(
    format: TextureFormat,
) -> Result<(hal::PixelFormat, hal::PixelType), TextureError> {
    use hal::{PixelFormat as Pf, PixelType as Pt};
    use TextureFormat as F;
    Ok(match format {
        F::Rgba32Float => (Pf::Rgba, Pt::Float),
        F::Rgba16Float => (Pf::Rgba, Pt::HalfFloat),
        F::Rgba8Unorm => (Pf::Rgba, Pt::UnsignedByte),
        F::R32Float => (Pf::Red, Pt::Float),
        F::A1B5G5R5Unorm => (Pf::Rgba, Pt::UnsignedShort5551),
        F::B5G6R5Unorm => (Pf::Rgb, Pt::UnsignedShort565),
        F::Rg8Unorm => (Pf::Rg, Pt::UnsignedByte),
        F::R16Float => (Pf::Red, Pt::HalfFloat),
        F::R8Unorm => (Pf::Red, Pt::UnsignedByte),
        other => return Err(TextureError::NoLinearFormat(other)),
    })
}

pub fn min_filter(filter: TextureFilter, mip: MipFilter) -> hal::MinFilter {
    match (filter, mip) {
        (TextureFilter::Nearest, MipFilter::None) => hal::MinFilter::Nearest,
        (TextureFilter::Nearest, MipFilter::Nearest) => hal::MinFilter::NearestMipmapNearest,
        (TextureFilter::Nearest, MipFilter::Linear) => hal::MinFilter::NearestMipmapLinear,
        (TextureFilter::Linear, MipFilter::None) => hal::MinFilter::Linear,
        (TextureFilter::Linear, MipFilter::Nearest) => hal::MinFilter::LinearMipmapNearest,
        (TextureFilter::Linear, MipFilter::Linear) => hal::MinFilter::LinearMipmapLinear,
    }
}

pub fn mag_filter(filter: TextureFilter) -> hal::MagFilter {
    match filter {
        TextureFilter::Nearest => hal::MagFilter::Nearest,
        TextureFilter::Linear => hal::MagFilter::Linear,
    }
}

pub fn wrap_mode(wrap: TextureWrap) -> hal::WrapMode {
    match wrap {
        TextureWrap::Repeat => hal::WrapMode::Repeat,
        TextureWrap::Mirror => hal::WrapMode::MirroredRepeat,
        TextureWrap::ClampToEdge => hal::WrapMode::ClampToEdge,
        TextureWrap::ClampToBorder => hal::WrapMode::ClampToBorder,
        // Modern GL dropped the legacy CLAMP mode; edge clamp samples the
        // same texels for border-less textures.
        TextureWrap::Clamp => hal::WrapMode::ClampToEdge,
        TextureWrap::MirrorClampToEdge => hal::WrapMode::MirrorClampToEdge,
    }
}

pub fn swizzle_component(source: SwizzleSource) -> hal::SwizzleComponent {
    match source {
        SwizzleSource::Zero => hal::SwizzleComponent::Zero,
        SwizzleSource::Red => hal::SwizzleComponent::Red,
        SwizzleSource::Green => hal::SwizzleComponent::Green,
        SwizzleSource::Blue => hal::SwizzleComponent::Blue,
        SwizzleSource::Alpha => hal::SwizzleComponent::Alpha,
        // Integer/float distinction only matters for integer-typed views,
        // which this pipeline never creates.
        SwizzleSource::OneInt | SwizzleSource::OneFloat => hal::SwizzleComponent::One,
    }
}

pub fn swizzle(sources: [SwizzleSource; 4]) -> [hal::SwizzleComponent; 4] {
    sources.map(swizzle_component)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bc_family_routes_to_compressed_upload() {
        for format in [
            TextureFormat::Bc1,
            TextureFormat::Bc2,
            TextureFormat::Bc3,
            TextureFormat::Bc4,
            TextureFormat::Bc5,
            TextureFormat::Bc6hSf16,
            TextureFormat::Bc6hUf16,
            TextureFormat::Bc7,
        ] {
            assert!(is_host_compressed(format), "{format:?}");
            assert!(compressed_format(format).is_ok(), "{format:?}");
            assert!(!is_software_decoded(format), "{format:?}");
        }
        assert!(!is_host_compressed(TextureFormat::Rgba8Unorm));
        assert!(!is_host_compressed(TextureFormat::Astc4x4));
    }

    #[test]
    fn astc_routes_to_software_decode() {
        assert!(is_software_decoded(TextureFormat::Astc4x4));
        assert!(is_software_decoded(TextureFormat::Astc12x12));
        assert!(!is_software_decoded(TextureFormat::Rgba8Unorm));
    }

    #[test]
    fn compressed_format_rejects_linear_and_astc_formats() {
        assert_eq!(
            compressed_format(TextureFormat::Rgba8Unorm),
            Err(TextureError::NotCompressed(TextureFormat::Rgba8Unorm))
        );
        assert_eq!(
            compressed_format(TextureFormat::Astc8x8),
            Err(TextureError::NotCompressed(TextureFormat::Astc8x8))
        );
    }

    #[test]
    fn pixel_format_rejects_compressed_formats() {
        assert!(pixel_format(TextureFormat::Rgba8Unorm).is_ok());
        assert_eq!(
            pixel_format(TextureFormat::Bc3),
            Err(TextureError::NoLinearFormat(TextureFormat::Bc3))
        );
        assert_eq!(
            pixel_format(TextureFormat::Astc4x4),
            Err(TextureError::NoLinearFormat(TextureFormat::Astc4x4))
        );
    }

    #[test]
    fn min_filter_covers_all_mip_combinations() {
        assert_eq!(
            min_filter(TextureFilter::Nearest, MipFilter::None),
            hal::MinFilter::Nearest
        );
        assert_eq!(
            min_filter(TextureFilter::Linear, MipFilter::None),
            hal::MinFilter::Linear
        );
        assert_eq!(
            min_filter(TextureFilter::Nearest, MipFilter::Linear),
            hal::MinFilter::NearestMipmapLinear
        );
        assert_eq!(
            min_filter(TextureFilter::Linear, MipFilter::Nearest),
            hal::MinFilter::LinearMipmapNearest
        );
    }

    #[test]
    fn legacy_clamp_maps_to_edge_clamp() {
        assert_eq!(wrap_mode(TextureWrap::Clamp), hal::WrapMode::ClampToEdge);
        assert_eq!(
            wrap_mode(TextureWrap::ClampToBorder),
            hal::WrapMode::ClampToBorder
        );
    }

    #[test]
    fn one_sources_collapse_to_host_one() {
        assert_eq!(
            swizzle_component(SwizzleSource::OneInt),
            hal::SwizzleComponent::One
        );
        assert_eq!(
            swizzle_component(SwizzleSource::OneFloat),
            hal::SwizzleComponent::One
        );
        assert_eq!(
            swizzle([
                SwizzleSource::Red,
                SwizzleSource::Green,
                SwizzleSource::Blue,
                SwizzleSource::Zero,
            ]),
            [
                hal::SwizzleComponent::Red,
                hal::SwizzleComponent::Green,
                hal::SwizzleComponent::Blue,
                hal::SwizzleComponent::Zero,
            ]
        );
    }
}
