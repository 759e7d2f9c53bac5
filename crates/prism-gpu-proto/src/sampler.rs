//! Guest sampler state.

/// Texture coordinate wrap modes, descriptor encoding as discriminant.
///
/// The two mirror-once-to-border combinations (raw 6 and 7) have no host
/// equivalent and are rejected at the parse boundary.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureWrap {
    Repeat = 0,
    Mirror = 1,
    ClampToEdge = 2,
    ClampToBorder = 3,
    Clamp = 4,
    MirrorClampToEdge = 5,
}

impl TextureWrap {
    pub const fn from_raw(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::Repeat),
            1 => Some(Self::Mirror),
            2 => Some(Self::ClampToEdge),
            3 => Some(Self::ClampToBorder),
            4 => Some(Self::Clamp),
            5 => Some(Self::MirrorClampToEdge),
            _ => None,
        }
    }
}

/// Texel filter for minification and magnification. Raw 0 is unassigned.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest = 1,
    Linear = 2,
}

impl TextureFilter {
    pub const fn from_raw(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::Nearest),
            2 => Some(Self::Linear),
            _ => None,
        }
    }
}

/// Filter applied across mip levels during minification.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MipFilter {
    None = 1,
    Nearest = 2,
    Linear = 3,
}

impl MipFilter {
    pub const fn from_raw(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::None),
            2 => Some(Self::Nearest),
            3 => Some(Self::Linear),
            _ => None,
        }
    }
}

/// One guest sampler: wrap modes per axis, filters and the border color
/// referenced by the border wrap modes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplerState {
    pub address_u: TextureWrap,
    pub address_v: TextureWrap,
    pub min_filter: TextureFilter,
    pub mip_filter: MipFilter,
    pub mag_filter: TextureFilter,
    pub border_color: [f32; 4],
}
