use std::rc::Rc;

use pretty_assertions::assert_eq;
use prism_gpu::hal::RecordingBackend;
use prism_gpu::{TextureError, TextureUnit};
use prism_gpu_proto::{SwizzleSource, TextureDescriptor, TextureFormat};

const TEXEL_BYTES: u64 = 16;

fn unit_with_capacity(
    capacity_bytes: u64,
) -> (TextureUnit<RecordingBackend>, Rc<RecordingBackend>) {
    let backend = Rc::new(RecordingBackend::new());
    let unit = TextureUnit::with_capacity(Rc::clone(&backend), capacity_bytes);
    (unit, backend)
}

// 2x2 RGBA8: 16 bytes, the accounting unit for these scenarios.
fn create_small(unit: &mut TextureUnit<RecordingBackend>, key: u64) -> Result<(), TextureError> {
    let descriptor = TextureDescriptor {
        width: 2,
        height: 2,
        format: TextureFormat::Rgba8Unorm,
        swizzle: [
            SwizzleSource::Red,
            SwizzleSource::Green,
            SwizzleSource::Blue,
            SwizzleSource::Alpha,
        ],
    };
    unit.create(key, &[0xab; TEXEL_BYTES as usize], descriptor)
}

#[test]
fn over_budget_creates_evict_least_recently_used_first() -> Result<(), TextureError> {
    let (mut unit, backend) = unit_with_capacity(2 * TEXEL_BYTES);
    create_small(&mut unit, 0xa000)?;
    create_small(&mut unit, 0xb000)?;
    create_small(&mut unit, 0xc000)?;

    assert_eq!(backend.deleted_handles(), vec![1]);
    assert_eq!(backend.live_handles(), vec![2, 3]);
    assert_eq!(unit.cache_len(), 2);
    assert_eq!(unit.cache_total_bytes(), 2 * TEXEL_BYTES);
    assert_eq!(unit.cache_stats().evictions, 1);
    Ok(())
}

#[test]
fn binding_refreshes_recency_for_eviction() -> Result<(), TextureError> {
    let (mut unit, backend) = unit_with_capacity(2 * TEXEL_BYTES);
    create_small(&mut unit, 0xa000)?;
    create_small(&mut unit, 0xb000)?;
    unit.bind(0xa000, 0);
    create_small(&mut unit, 0xc000)?;

    // The bind touched 0xa000, so 0xb000 (handle 2) was the eviction victim.
    assert_eq!(backend.deleted_handles(), vec![2]);
    assert_eq!(backend.live_handles(), vec![1, 3]);
    Ok(())
}

#[test]
fn a_locked_cache_defers_eviction_to_the_final_unlock() -> Result<(), TextureError> {
    let (mut unit, backend) = unit_with_capacity(TEXEL_BYTES);

    unit.lock_cache();
    unit.lock_cache();
    create_small(&mut unit, 0xa000)?;
    create_small(&mut unit, 0xb000)?;
    create_small(&mut unit, 0xc000)?;
    assert!(backend.deleted_handles().is_empty());
    assert_eq!(unit.cache_total_bytes(), 3 * TEXEL_BYTES);

    unit.unlock_cache();
    assert!(backend.deleted_handles().is_empty(), "still locked once");

    unit.unlock_cache();
    assert_eq!(backend.deleted_handles(), vec![1, 2]);
    assert_eq!(backend.live_handles(), vec![3]);
    assert_eq!(unit.cache_total_bytes(), TEXEL_BYTES);
    assert_eq!(unit.cache_stats().evictions, 2);
    Ok(())
}

#[test]
fn with_locked_cache_releases_the_fence_on_exit() -> Result<(), TextureError> {
    let (mut unit, backend) = unit_with_capacity(TEXEL_BYTES);

    let created = unit.with_locked_cache(|unit| -> Result<u32, TextureError> {
        create_small(unit, 0xa000)?;
        create_small(unit, 0xb000)?;
        assert!(backend.deleted_handles().is_empty());
        Ok(2)
    })?;

    assert_eq!(created, 2);
    assert_eq!(backend.deleted_handles(), vec![1]);
    assert_eq!(backend.live_handles(), vec![2]);
    Ok(())
}

#[test]
fn replacing_a_key_releases_the_old_texture_even_while_locked() -> Result<(), TextureError> {
    let (mut unit, backend) = unit_with_capacity(1 << 20);

    unit.lock_cache();
    create_small(&mut unit, 0xa000)?;
    create_small(&mut unit, 0xa000)?;
    // The fence defers capacity eviction, not explicit overwrites.
    assert_eq!(backend.deleted_handles(), vec![1]);
    unit.unlock_cache();

    assert_eq!(backend.deleted_handles(), vec![1]);
    assert_eq!(unit.cache_stats().replacements, 1);
    Ok(())
}

#[test]
#[should_panic(expected = "unlock without a matching lock")]
fn unlocking_an_unlocked_cache_panics() {
    let (mut unit, _backend) = unit_with_capacity(1 << 20);
    unit.unlock_cache();
}

#[test]
fn dropping_the_unit_deletes_every_cached_texture() -> Result<(), TextureError> {
    let (mut unit, backend) = unit_with_capacity(1 << 20);
    create_small(&mut unit, 0xa000)?;
    create_small(&mut unit, 0xb000)?;

    drop(unit);

    assert_eq!(backend.deleted_handles(), vec![1, 2]);
    assert!(backend.live_handles().is_empty());
    Ok(())
}
