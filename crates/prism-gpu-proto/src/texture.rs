//! Guest texture image descriptors.

/// Guest texture storage formats, with the descriptor-word encoding as the
/// discriminant.
///
/// Three families matter to the upload pipeline: BC formats are handed to
/// the host compressed, ASTC formats are decoded on the CPU first, and
/// everything else uploads as linear texel data.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    Rgba32Float = 0x01,
    Rgba16Float = 0x03,
    Rgba8Unorm = 0x08,
    R32Float = 0x0f,
    Bc6hSf16 = 0x10,
    Bc6hUf16 = 0x11,
    A1B5G5R5Unorm = 0x14,
    B5G6R5Unorm = 0x15,
    Bc7 = 0x17,
    Rg8Unorm = 0x18,
    R16Float = 0x1b,
    R8Unorm = 0x1d,
    Bc1 = 0x24,
    Bc2 = 0x25,
    Bc3 = 0x26,
    Bc4 = 0x27,
    Bc5 = 0x28,
    Astc4x4 = 0x40,
    Astc5x4 = 0x41,
    Astc5x5 = 0x42,
    Astc6x5 = 0x43,
    Astc6x6 = 0x44,
    Astc8x5 = 0x45,
    Astc8x6 = 0x46,
    Astc8x8 = 0x47,
    Astc10x5 = 0x48,
    Astc10x6 = 0x49,
    Astc10x8 = 0x4a,
    Astc10x10 = 0x4b,
    Astc12x10 = 0x4c,
    Astc12x12 = 0x4d,
}

impl TextureFormat {
    pub const fn from_raw(v: u32) -> Option<Self> {
        match v {
            0x01 => Some(Self::Rgba32Float),
            0x03 => Some(Self::Rgba16Float),
            0x08 => Some(Self::Rgba8Unorm),
            0x0f => Some(Self::R32Float),
            0x10 => Some(Self::Bc6hSf16),
            0x11 => Some(Self::Bc6hUf16),
            0x14 => Some(Self::A1B5G5R5Unorm),
            0x15 => Some(Self::B5G6R5Unorm),
            0x17 => Some(Self::Bc7),
            0x18 => Some(Self::Rg8Unorm),
            0x1b => Some(Self::R16Float),
            0x1d => Some(Self::R8Unorm),
            0x24 => Some(Self::Bc1),
            0x25 => Some(Self::Bc2),
            0x26 => Some(Self::Bc3),
            0x27 => Some(Self::Bc4),
            0x28 => Some(Self::Bc5),
            0x40 => Some(Self::Astc4x4),
            0x41 => Some(Self::Astc5x4),
            0x42 => Some(Self::Astc5x5),
            0x43 => Some(Self::Astc6x5),
            0x44 => Some(Self::Astc6x6),
            0x45 => Some(Self::Astc8x5),
            0x46 => Some(Self::Astc8x6),
            0x47 => Some(Self::Astc8x8),
            0x48 => Some(Self::Astc10x5),
            0x49 => Some(Self::Astc10x6),
            0x4a => Some(Self::Astc10x8),
            0x4b => Some(Self::Astc10x10),
            0x4c => Some(Self::Astc12x10),
            0x4d => Some(Self::Astc12x12),
            _ => None,
        }
    }

    /// Block footprint in texels for the ASTC family, `None` for everything
    /// else.
    pub const fn astc_footprint(self) -> Option<(u32, u32)> {
        match self {
            Self::Astc4x4 => Some((4, 4)),
            Self::Astc5x4 => Some((5, 4)),
            Self::Astc5x5 => Some((5, 5)),
            Self::Astc6x5 => Some((6, 5)),
            Self::Astc6x6 => Some((6, 6)),
            Self::Astc8x5 => Some((8, 5)),
            Self::Astc8x6 => Some((8, 6)),
            Self::Astc8x8 => Some((8, 8)),
            Self::Astc10x5 => Some((10, 5)),
            Self::Astc10x6 => Some((10, 6)),
            Self::Astc10x8 => Some((10, 8)),
            Self::Astc10x10 => Some((10, 10)),
            Self::Astc12x10 => Some((12, 10)),
            Self::Astc12x12 => Some((12, 12)),
            _ => None,
        }
    }

    pub const fn is_astc(self) -> bool {
        self.astc_footprint().is_some()
    }
}

/// Source selector for one output channel of a texture fetch.
///
/// `1` is a hole in the descriptor encoding.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwizzleSource {
    Zero = 0,
    Red = 2,
    Green = 3,
    Blue = 4,
    Alpha = 5,
    OneInt = 6,
    OneFloat = 7,
}

impl SwizzleSource {
    pub const fn from_raw(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::Zero),
            2 => Some(Self::Red),
            3 => Some(Self::Green),
            4 => Some(Self::Blue),
            5 => Some(Self::Alpha),
            6 => Some(Self::OneInt),
            7 => Some(Self::OneFloat),
            _ => None,
        }
    }
}

/// One guest 2D texture image: dimensions, storage format and the four
/// output-channel swizzle sources, in RGBA output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureDescriptor {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub swizzle: [SwizzleSource; 4],
}

impl TextureDescriptor {
    /// The same image with a different storage format. Upload paths that
    /// substitute the texel data (ASTC decoded to RGBA8) use this to derive
    /// the descriptor the host actually sees; the input is left untouched.
    pub const fn with_format(self, format: TextureFormat) -> Self {
        Self { format, ..self }
    }
}
