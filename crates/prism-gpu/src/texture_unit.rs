//! Texture unit orchestration: guest descriptors and payloads in, live and
//! cached host textures out.

use std::borrow::Cow;
use std::rc::Rc;

use prism_gpu_proto::{SamplerState, TextureDescriptor, TextureFormat};
use tracing::{debug, trace};

use crate::astc_decompress::decompress_astc_rgba8;
use crate::cache::{CacheStats, ResourceCache, TextureKey};
use crate::error::TextureError;
use crate::format_map;
use crate::hal::{self, TextureBackend};

/// Default byte budget for cached host textures, sized for a full guest
/// title's working set.
pub const DEFAULT_CACHE_CAPACITY_BYTES: u64 = 768 * 1024 * 1024;

struct CachedTexture<H> {
    handle: H,
    descriptor: TextureDescriptor,
}

#[derive(Debug)]
enum PreparedPixels<'a> {
    Compressed {
        format: hal::CompressedFormat,
        data: &'a [u8],
    },
    Linear {
        format: hal::PixelFormat,
        ty: hal::PixelType,
        data: Cow<'a, [u8]>,
    },
}

#[derive(Debug)]
struct PreparedImage<'a> {
    descriptor: TextureDescriptor,
    pixels: PreparedPixels<'a>,
}

/// Pure translate/decode stage of [`TextureUnit::create`]: routes the
/// payload to its upload path and, for ASTC, decodes to RGBA8 and derives
/// the rewritten descriptor. Fails before any host object exists.
fn prepare_image(
    descriptor: TextureDescriptor,
    data: &[u8],
) -> Result<PreparedImage<'_>, TextureError> {
    if format_map::is_host_compressed(descriptor.format) {
        let format = format_map::compressed_format(descriptor.format)?;
        return Ok(PreparedImage {
            descriptor,
            pixels: PreparedPixels::Compressed { format, data },
        });
    }

    if let Some((block_width, block_height)) = descriptor.format.astc_footprint() {
        debug!(
            format = ?descriptor.format,
            width = descriptor.width,
            height = descriptor.height,
            "decoding ASTC texture on the CPU"
        );
        let rgba = decompress_astc_rgba8(
            block_width,
            block_height,
            1,
            descriptor.width,
            descriptor.height,
            1,
            data,
        )?;
        let descriptor = descriptor.with_format(TextureFormat::Rgba8Unorm);
        let (format, ty) = format_map::pixel_format(descriptor.format)?;
        return Ok(PreparedImage {
            descriptor,
            pixels: PreparedPixels::Linear {
                format,
                ty,
                data: Cow::Owned(rgba),
            },
        });
    }

    let (format, ty) = format_map::pixel_format(descriptor.format)?;
    Ok(PreparedImage {
        descriptor,
        pixels: PreparedPixels::Linear {
            format,
            ty,
            data: Cow::Borrowed(data),
        },
    })
}

/// Host-side texture state for one guest GPU.
///
/// Owns the texture cache; the backend is shared so the cache's release
/// function can delete host textures when entries fall out.
pub struct TextureUnit<B: TextureBackend> {
    backend: Rc<B>,
    cache: ResourceCache<CachedTexture<B::Handle>>,
}

impl<B: TextureBackend + 'static> TextureUnit<B> {
    pub fn new(backend: Rc<B>) -> Self {
        Self::with_capacity(backend, DEFAULT_CACHE_CAPACITY_BYTES)
    }

    pub fn with_capacity(backend: Rc<B>, capacity_bytes: u64) -> Self {
        let releaser = Rc::clone(&backend);
        let cache = ResourceCache::new(
            capacity_bytes,
            move |cached: CachedTexture<B::Handle>| {
                releaser.delete_texture(cached.handle);
            },
        );
        Self { backend, cache }
    }

    /// Builds a host texture from one guest image and registers it in the
    /// cache under `key`.
    ///
    /// The cache entry is weighted by `data.len()`, the guest byte count
    /// rather than the (larger) decoded size on the ASTC path, because
    /// lookups compare against the guest's idea of the image. Replacing a
    /// key releases the prior host texture.
    pub fn create(
        &mut self,
        key: TextureKey,
        data: &[u8],
        descriptor: TextureDescriptor,
    ) -> Result<(), TextureError> {
        let image = prepare_image(descriptor, data)?;
        let handle = self.backend.create_texture()?;

        match &image.pixels {
            PreparedPixels::Compressed { format, data } => {
                self.backend.upload_compressed_2d(
                    handle,
                    *format,
                    image.descriptor.width,
                    image.descriptor.height,
                    data,
                );
            }
            PreparedPixels::Linear { format, ty, data } => {
                self.backend.upload_2d(
                    handle,
                    *format,
                    *ty,
                    image.descriptor.width,
                    image.descriptor.height,
                    data,
                );
            }
        }
        self.backend
            .set_swizzle(handle, format_map::swizzle(image.descriptor.swizzle));

        trace!(key, format = ?descriptor.format, size_bytes = data.len(), "created texture");
        self.cache.insert(
            key,
            CachedTexture {
                handle,
                descriptor: image.descriptor,
            },
            data.len() as u64,
        );
        Ok(())
    }

    /// Descriptor of the cached texture under `key`, provided the guest
    /// byte count still matches. A differing size means the guest reused
    /// the backing memory, so the entry is stale and this is a miss; the
    /// stale entry's recency is left untouched.
    pub fn cached_texture(
        &mut self,
        key: TextureKey,
        data_len: usize,
    ) -> Option<TextureDescriptor> {
        if self.cache.peek_size(key)? != data_len as u64 {
            return None;
        }
        self.cache.get(key).map(|cached| cached.descriptor)
    }

    /// Binds the cached texture to the numbered texture unit, refreshing
    /// its recency. A miss does nothing.
    pub fn bind(&mut self, key: TextureKey, unit: u32) {
        if let Some(cached) = self.cache.get(key) {
            self.backend.bind_2d(unit, cached.handle);
        }
    }

    /// Translates guest sampler state and applies it to the texture bound
    /// on the active unit. Callers bind first.
    pub fn set_sampler(&self, sampler: &SamplerState) {
        let desc = hal::SamplerDesc {
            wrap_s: format_map::wrap_mode(sampler.address_u),
            wrap_t: format_map::wrap_mode(sampler.address_v),
            min_filter: format_map::min_filter(sampler.min_filter, sampler.mip_filter),
            mag_filter: format_map::mag_filter(sampler.mag_filter),
            border_color: sampler.border_color,
        };
        self.backend.apply_sampler(&desc);
    }

    /// Fences cache eviction off until the matching
    /// [`unlock_cache`](TextureUnit::unlock_cache).
    pub fn lock_cache(&mut self) {
        self.cache.lock();
    }

    /// # Panics
    ///
    /// Panics when the cache is not locked.
    pub fn unlock_cache(&mut self) {
        self.cache.unlock();
    }

    /// Runs `f` with eviction fenced off; the fence drops on the way out,
    /// so it cannot leak on early return.
    pub fn with_locked_cache<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.lock_cache();
        let out = f(self);
        self.unlock_cache();
        out
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_total_bytes(&self) -> u64 {
        self.cache.total_bytes()
    }
}
