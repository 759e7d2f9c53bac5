use std::rc::Rc;

use pretty_assertions::assert_eq;
use prism_gpu::hal::{self, BackendCall, RecordingBackend};
use prism_gpu::{TextureError, TextureUnit, ASTC_BLOCK_BYTES};
use prism_gpu_proto::{SwizzleSource, TextureDescriptor, TextureFormat};

const ASTC_FORMATS: [TextureFormat; 14] = [
    TextureFormat::Astc4x4,
    TextureFormat::Astc5x4,
    TextureFormat::Astc5x5,
    TextureFormat::Astc6x5,
    TextureFormat::Astc6x6,
    TextureFormat::Astc8x5,
    TextureFormat::Astc8x6,
    TextureFormat::Astc8x8,
    TextureFormat::Astc10x5,
    TextureFormat::Astc10x6,
    TextureFormat::Astc10x8,
    TextureFormat::Astc10x10,
    TextureFormat::Astc12x10,
    TextureFormat::Astc12x12,
];

fn new_unit() -> (TextureUnit<RecordingBackend>, Rc<RecordingBackend>) {
    let backend = Rc::new(RecordingBackend::new());
    let unit = TextureUnit::new(Rc::clone(&backend));
    (unit, backend)
}

fn descriptor(format: TextureFormat, width: u32, height: u32) -> TextureDescriptor {
    TextureDescriptor {
        width,
        height,
        format,
        swizzle: [
            SwizzleSource::Red,
            SwizzleSource::Green,
            SwizzleSource::Blue,
            SwizzleSource::Alpha,
        ],
    }
}

// Void-extent block: constant color, assembled by hand. See the decoder's
// unit tests for the bit layout.
fn void_extent_block(r: u16, g: u16, b: u16, a: u16) -> [u8; 16] {
    let low: u64 = 0xdfc | (u64::MAX << 12);
    let high: u64 = r as u64 | ((g as u64) << 16) | ((b as u64) << 32) | ((a as u64) << 48);
    let mut block = [0u8; 16];
    block[..8].copy_from_slice(&low.to_le_bytes());
    block[8..].copy_from_slice(&high.to_le_bytes());
    block
}

#[test]
fn astc_payloads_upload_as_decoded_rgba8() -> Result<(), TextureError> {
    let (mut unit, backend) = new_unit();
    let block = void_extent_block(0, 0xffff, 0, 0xffff);

    unit.create(0x4000, &block, descriptor(TextureFormat::Astc4x4, 4, 4))?;

    let decoded: Vec<u8> = std::iter::repeat([0u8, 255, 0, 255])
        .take(16)
        .flatten()
        .collect();
    let calls = backend.take_calls();
    assert_eq!(calls[0], BackendCall::CreateTexture { handle: 1 });
    assert_eq!(
        calls[1],
        BackendCall::Upload2d {
            handle: 1,
            format: hal::PixelFormat::Rgba,
            ty: hal::PixelType::UnsignedByte,
            width: 4,
            height: 4,
            data: decoded,
        },
    );
    Ok(())
}

#[test]
fn cached_descriptor_reports_the_rewritten_format() -> Result<(), TextureError> {
    let (mut unit, _backend) = new_unit();
    let block = void_extent_block(0xffff, 0xffff, 0xffff, 0xffff);
    let swizzle = [
        SwizzleSource::Blue,
        SwizzleSource::Green,
        SwizzleSource::Red,
        SwizzleSource::OneFloat,
    ];
    let mut desc = descriptor(TextureFormat::Astc4x4, 4, 4);
    desc.swizzle = swizzle;

    unit.create(0x4000, &block, desc)?;

    let cached = unit.cached_texture(0x4000, block.len()).unwrap();
    assert_eq!(cached.format, TextureFormat::Rgba8Unorm);
    assert_eq!(cached.width, 4);
    assert_eq!(cached.height, 4);
    assert_eq!(cached.swizzle, swizzle);
    Ok(())
}

#[test]
fn cache_weight_is_the_compressed_guest_size() -> Result<(), TextureError> {
    let (mut unit, _backend) = new_unit();
    let block = void_extent_block(0, 0, 0, 0xffff);

    unit.create(0x4000, &block, descriptor(TextureFormat::Astc4x4, 4, 4))?;

    // 16 compressed bytes became 64 decoded bytes; lookups and the byte
    // budget both track the guest's 16.
    assert_eq!(unit.cache_total_bytes(), block.len() as u64);
    assert!(unit.cached_texture(0x4000, block.len()).is_some());
    assert_eq!(unit.cached_texture(0x4000, 4 * 4 * 4), None);
    Ok(())
}

#[test]
fn a_failed_decode_creates_no_host_texture() {
    let (mut unit, backend) = new_unit();
    // One block cannot cover 8x8.
    let block = void_extent_block(0, 0, 0, 0);

    let err = unit
        .create(0x4000, &block, descriptor(TextureFormat::Astc4x4, 8, 8))
        .unwrap_err();

    assert!(matches!(err, TextureError::AstcDecode(_)));
    assert!(backend.calls().is_empty());
    assert_eq!(unit.cache_len(), 0);
}

#[test]
fn every_ldr_footprint_uploads_one_block_images() -> Result<(), TextureError> {
    let (mut unit, backend) = new_unit();
    let block = void_extent_block(0xffff, 0, 0xffff, 0xffff);

    for (i, format) in ASTC_FORMATS.into_iter().enumerate() {
        let (bw, bh) = format.astc_footprint().unwrap();
        unit.create(0x100 * i as u64, &block, descriptor(format, bw, bh))?;

        let calls = backend.take_calls();
        match &calls[1] {
            BackendCall::Upload2d {
                width,
                height,
                data,
                ..
            } => {
                assert_eq!((*width, *height), (bw, bh), "{format:?}");
                assert_eq!(data.len(), (bw * bh * 4) as usize, "{format:?}");
            }
            other => panic!("expected a linear upload for {format:?}, got {other:?}"),
        }
        assert_eq!(
            unit.cached_texture(0x100 * i as u64, ASTC_BLOCK_BYTES)
                .map(|d| d.format),
            Some(TextureFormat::Rgba8Unorm),
            "{format:?}"
        );
    }
    Ok(())
}
