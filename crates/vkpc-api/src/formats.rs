//! External pixel format enumeration
//!
//! Formats use the Vulkan core numbering: the discriminant of each variant is
//! the format code a client would pass through the API. The translator's
//! format table is indexed by these codes, so the ordering here is load
//! bearing and must stay in sync with that table.

use serde::{Deserialize, Serialize};

/// Pixel format codes accepted in pipeline descriptions.
///
/// Covers the core format range `0..=184`. Block-compressed formats are listed
/// so every core code has a stable name, even though none of them is usable as
/// a vertex input or color export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum PixelFormat {
    Undefined = 0,
    R4G4UnormPack8,
    R4G4B4A4UnormPack16,
    B4G4R4A4UnormPack16,
    R5G6B5UnormPack16,
    B5G6R5UnormPack16,
    R5G5B5A1UnormPack16,
    B5G5R5A1UnormPack16,
    A1R5G5B5UnormPack16,
    R8Unorm,
    R8Snorm,
    R8Uscaled,
    R8Sscaled,
    R8Uint,
    R8Sint,
    R8Srgb,
    R8G8Unorm,
    R8G8Snorm,
    R8G8Uscaled,
    R8G8Sscaled,
    R8G8Uint,
    R8G8Sint,
    R8G8Srgb,
    R8G8B8Unorm,
    R8G8B8Snorm,
    R8G8B8Uscaled,
    R8G8B8Sscaled,
    R8G8B8Uint,
    R8G8B8Sint,
    R8G8B8Srgb,
    B8G8R8Unorm,
    B8G8R8Snorm,
    B8G8R8Uscaled,
    B8G8R8Sscaled,
    B8G8R8Uint,
    B8G8R8Sint,
    B8G8R8Srgb,
    R8G8B8A8Unorm,
    R8G8B8A8Snorm,
    R8G8B8A8Uscaled,
    R8G8B8A8Sscaled,
    R8G8B8A8Uint,
    R8G8B8A8Sint,
    R8G8B8A8Srgb,
    B8G8R8A8Unorm,
    B8G8R8A8Snorm,
    B8G8R8A8Uscaled,
    B8G8R8A8Sscaled,
    B8G8R8A8Uint,
    B8G8R8A8Sint,
    B8G8R8A8Srgb,
    A8B8G8R8UnormPack32,
    A8B8G8R8SnormPack32,
    A8B8G8R8UscaledPack32,
    A8B8G8R8SscaledPack32,
    A8B8G8R8UintPack32,
    A8B8G8R8SintPack32,
    A8B8G8R8SrgbPack32,
    A2R10G10B10UnormPack32,
    A2R10G10B10SnormPack32,
    A2R10G10B10UscaledPack32,
    A2R10G10B10SscaledPack32,
    A2R10G10B10UintPack32,
    A2R10G10B10SintPack32,
    A2B10G10R10UnormPack32,
    A2B10G10R10SnormPack32,
    A2B10G10R10UscaledPack32,
    A2B10G10R10SscaledPack32,
    A2B10G10R10UintPack32,
    A2B10G10R10SintPack32,
    R16Unorm,
    R16Snorm,
    R16Uscaled,
    R16Sscaled,
    R16Uint,
    R16Sint,
    R16Sfloat,
    R16G16Unorm,
    R16G16Snorm,
    R16G16Uscaled,
    R16G16Sscaled,
    R16G16Uint,
    R16G16Sint,
    R16G16Sfloat,
    R16G16B16Unorm,
    R16G16B16Snorm,
    R16G16B16Uscaled,
    R16G16B16Sscaled,
    R16G16B16Uint,
    R16G16B16Sint,
    R16G16B16Sfloat,
    R16G16B16A16Unorm,
    R16G16B16A16Snorm,
    R16G16B16A16Uscaled,
    R16G16B16A16Sscaled,
    R16G16B16A16Uint,
    R16G16B16A16Sint,
    R16G16B16A16Sfloat,
    R32Uint,
    R32Sint,
    R32Sfloat,
    R32G32Uint,
    R32G32Sint,
    R32G32Sfloat,
    R32G32B32Uint,
    R32G32B32Sint,
    R32G32B32Sfloat,
    R32G32B32A32Uint,
    R32G32B32A32Sint,
    R32G32B32A32Sfloat,
    R64Uint,
    R64Sint,
    R64Sfloat,
    R64G64Uint,
    R64G64Sint,
    R64G64Sfloat,
    R64G64B64Uint,
    R64G64B64Sint,
    R64G64B64Sfloat,
    R64G64B64A64Uint,
    R64G64B64A64Sint,
    R64G64B64A64Sfloat,
    B10G11R11UfloatPack32,
    E5B9G9R9UfloatPack32,
    D16Unorm,
    X8D24UnormPack32,
    D32Sfloat,
    S8Uint,
    D16UnormS8Uint,
    D24UnormS8Uint,
    D32SfloatS8Uint,
    Bc1RgbUnormBlock,
    Bc1RgbSrgbBlock,
    Bc1RgbaUnormBlock,
    Bc1RgbaSrgbBlock,
    Bc2UnormBlock,
    Bc2SrgbBlock,
    Bc3UnormBlock,
    Bc3SrgbBlock,
    Bc4UnormBlock,
    Bc4SnormBlock,
    Bc5UnormBlock,
    Bc5SnormBlock,
    Bc6hUfloatBlock,
    Bc6hSfloatBlock,
    Bc7UnormBlock,
    Bc7SrgbBlock,
    Etc2R8G8B8UnormBlock,
    Etc2R8G8B8SrgbBlock,
    Etc2R8G8B8A1UnormBlock,
    Etc2R8G8B8A1SrgbBlock,
    Etc2R8G8B8A8UnormBlock,
    Etc2R8G8B8A8SrgbBlock,
    EacR11UnormBlock,
    EacR11SnormBlock,
    EacR11G11UnormBlock,
    EacR11G11SnormBlock,
    Astc4x4UnormBlock,
    Astc4x4SrgbBlock,
    Astc5x4UnormBlock,
    Astc5x4SrgbBlock,
    Astc5x5UnormBlock,
    Astc5x5SrgbBlock,
    Astc6x5UnormBlock,
    Astc6x5SrgbBlock,
    Astc6x6UnormBlock,
    Astc6x6SrgbBlock,
    Astc8x5UnormBlock,
    Astc8x5SrgbBlock,
    Astc8x6UnormBlock,
    Astc8x6SrgbBlock,
    Astc8x8UnormBlock,
    Astc8x8SrgbBlock,
    Astc10x5UnormBlock,
    Astc10x5SrgbBlock,
    Astc10x6UnormBlock,
    Astc10x6SrgbBlock,
    Astc10x8UnormBlock,
    Astc10x8SrgbBlock,
    Astc10x10UnormBlock,
    Astc10x10SrgbBlock,
    Astc12x10UnormBlock,
    Astc12x10SrgbBlock,
    Astc12x12UnormBlock,
    Astc12x12SrgbBlock,
}

impl PixelFormat {
    /// Number of core format codes, one past the largest discriminant.
    pub const COUNT: u32 = 185;

    /// The numeric format code as passed through the API.
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        PixelFormat::Undefined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_codes_match_core_numbering() {
        // Spot-check the block boundaries of the numbering; the full table
        // consistency check lives with the format table itself.
        assert_eq!(PixelFormat::Undefined.code(), 0);
        assert_eq!(PixelFormat::R8Unorm.code(), 9);
        assert_eq!(PixelFormat::R8G8B8A8Unorm.code(), 37);
        assert_eq!(PixelFormat::A2B10G10R10UnormPack32.code(), 64);
        assert_eq!(PixelFormat::R16Unorm.code(), 70);
        assert_eq!(PixelFormat::R32Uint.code(), 98);
        assert_eq!(PixelFormat::R64Uint.code(), 110);
        assert_eq!(PixelFormat::B10G11R11UfloatPack32.code(), 122);
        assert_eq!(PixelFormat::D32SfloatS8Uint.code(), 130);
        assert_eq!(PixelFormat::Bc1RgbUnormBlock.code(), 131);
        assert_eq!(PixelFormat::Etc2R8G8B8UnormBlock.code(), 147);
        assert_eq!(PixelFormat::Astc4x4UnormBlock.code(), 157);
        assert_eq!(PixelFormat::Astc12x12SrgbBlock.code(), 184);
        assert_eq!(PixelFormat::Astc12x12SrgbBlock.code() + 1, PixelFormat::COUNT);
    }
}
