use prism_gpu_proto::TextureFormat;

use crate::astc_decompress::AstcDecodeError;

/// Errors surfaced by texture creation and format translation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextureError {
    /// A format outside the BC family reached the compressed-upload mapping.
    #[error("texture format {0:?} is not host-native compressed")]
    NotCompressed(TextureFormat),

    /// A compressed format reached the linear-upload mapping.
    #[error("texture format {0:?} has no linear upload mapping")]
    NoLinearFormat(TextureFormat),

    #[error(transparent)]
    AstcDecode(#[from] AstcDecodeError),

    /// The host backend refused an operation; the message is backend-specific.
    #[error("backend error: {0}")]
    Backend(String),
}
