//! CPU decode of 2D LDR ASTC textures.
//!
//! The host GL context cannot sample ASTC, so ASTC payloads are
//! deterministically decoded into RGBA8 on the CPU and uploaded as linear
//! texels. The bit-level block codec is `astc-decode`; this module owns
//! payload validation and the image walk around it.

use astc_decode::Footprint;

/// Every ASTC block is 128 bits regardless of footprint.
pub const ASTC_BLOCK_BYTES: usize = 16;

/// The 14 LDR 2D block footprints, width × height in texels.
pub const ASTC_FOOTPRINTS: [(u32, u32); 14] = [
    (4, 4),
    (5, 4),
    (5, 5),
    (6, 5),
    (6, 6),
    (8, 5),
    (8, 6),
    (8, 8),
    (10, 5),
    (10, 6),
    (10, 8),
    (10, 10),
    (12, 10),
    (12, 12),
];

pub fn is_valid_footprint(block_width: u32, block_height: u32) -> bool {
    ASTC_FOOTPRINTS.contains(&(block_width, block_height))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstcDecodeError {
    #[error("unsupported ASTC block footprint {block_width}x{block_height}")]
    UnsupportedFootprint { block_width: u32, block_height: u32 },

    #[error("3D ASTC is not supported (block_depth={block_depth}, depth={depth})")]
    Unsupported3d { block_depth: u32, depth: u32 },

    #[error("ASTC payload truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// Decodes a 2D LDR ASTC payload into a `width * height * 4` RGBA8 buffer.
///
/// Edge blocks of images that are not footprint-aligned are cropped; texels
/// outside the image are never produced. Payloads longer than the block
/// grid are tolerated (guest allocations round up) and the tail is ignored.
/// All validation happens before the output buffer is allocated, so an
/// error never leaves a partial result.
pub fn decompress_astc_rgba8(
    block_width: u32,
    block_height: u32,
    block_depth: u32,
    width: u32,
    height: u32,
    depth: u32,
    data: &[u8],
) -> Result<Vec<u8>, AstcDecodeError> {
    if block_depth != 1 || depth != 1 {
        return Err(AstcDecodeError::Unsupported3d { block_depth, depth });
    }
    if !is_valid_footprint(block_width, block_height) {
        return Err(AstcDecodeError::UnsupportedFootprint {
            block_width,
            block_height,
        });
    }

    let blocks_w = width.div_ceil(block_width);
    let blocks_h = height.div_ceil(block_height);
    let expected = blocks_w as usize * blocks_h as usize * ASTC_BLOCK_BYTES;
    if data.len() < expected {
        return Err(AstcDecodeError::Truncated {
            expected,
            actual: data.len(),
        });
    }

    let mut out = vec![0u8; width as usize * height as usize * 4];
    let row = width as usize;
    astc_decode::astc_decode(
        &data[..expected],
        width,
        height,
        Footprint::new(block_width, block_height),
        |x, y, texel| {
            let at = (y as usize * row + x as usize) * 4;
            out[at..at + 4].copy_from_slice(&texel);
        },
    )
    .map_err(|_| AstcDecodeError::Truncated {
        expected,
        actual: data.len(),
    })?;

    Ok(out)
}
