//! Pixel format mapping
//!
//! One static table maps every core pixel format code to the middle end's
//! (data format, numeric format) pair, flagged per use: a format can be valid
//! as a vertex input, as a color export, both, or neither. The table is
//! indexed by the format code itself; an entry also records its own format so
//! the indexing invariant is checkable.

use vkpc_api::PixelFormat;
use vkpc_ir::{BufDataFormat, BufNumFormat};

/// What a format lookup is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatUse {
    VertexInput,
    ColorExport,
}

struct FormatEntry {
    format: PixelFormat,
    dfmt: BufDataFormat,
    nfmt: BufNumFormat,
    valid_vertex: bool,
    valid_export: bool,
}

const fn invalid(format: PixelFormat) -> FormatEntry {
    FormatEntry {
        format,
        dfmt: BufDataFormat::Invalid,
        nfmt: BufNumFormat::Unorm,
        valid_vertex: false,
        valid_export: false,
    }
}

const fn vertex(format: PixelFormat, dfmt: BufDataFormat, nfmt: BufNumFormat) -> FormatEntry {
    FormatEntry { format, dfmt, nfmt, valid_vertex: true, valid_export: false }
}

const fn color(format: PixelFormat, dfmt: BufDataFormat, nfmt: BufNumFormat) -> FormatEntry {
    FormatEntry { format, dfmt, nfmt, valid_vertex: false, valid_export: true }
}

const fn both(format: PixelFormat, dfmt: BufDataFormat, nfmt: BufNumFormat) -> FormatEntry {
    FormatEntry { format, dfmt, nfmt, valid_vertex: true, valid_export: true }
}

use BufDataFormat as D;
use BufNumFormat as N;
use PixelFormat as F;

/// Indexed by format code.
static FORMAT_TABLE: [FormatEntry; PixelFormat::COUNT as usize] = [
    invalid(F::Undefined),
    color(F::R4G4UnormPack8, D::Fmt4_4, N::Unorm),
    color(F::R4G4B4A4UnormPack16, D::Fmt4_4_4_4, N::Unorm),
    color(F::B4G4R4A4UnormPack16, D::Fmt4_4_4_4_Bgra, N::Unorm),
    color(F::R5G6B5UnormPack16, D::Fmt5_6_5, N::Unorm),
    color(F::B5G6R5UnormPack16, D::Fmt5_6_5_Bgr, N::Unorm),
    color(F::R5G5B5A1UnormPack16, D::Fmt5_6_5_1, N::Unorm),
    color(F::B5G5R5A1UnormPack16, D::Fmt5_6_5_1_Bgra, N::Unorm),
    color(F::A1R5G5B5UnormPack16, D::Fmt1_5_6_5, N::Unorm),
    both(F::R8Unorm, D::Fmt8, N::Unorm),
    both(F::R8Snorm, D::Fmt8, N::Snorm),
    both(F::R8Uscaled, D::Fmt8, N::Uscaled),
    both(F::R8Sscaled, D::Fmt8, N::Sscaled),
    both(F::R8Uint, D::Fmt8, N::Uint),
    both(F::R8Sint, D::Fmt8, N::Sint),
    color(F::R8Srgb, D::Fmt8, N::Srgb),
    both(F::R8G8Unorm, D::Fmt8_8, N::Unorm),
    both(F::R8G8Snorm, D::Fmt8_8, N::Snorm),
    both(F::R8G8Uscaled, D::Fmt8_8, N::Uscaled),
    both(F::R8G8Sscaled, D::Fmt8_8, N::Sscaled),
    both(F::R8G8Uint, D::Fmt8_8, N::Uint),
    both(F::R8G8Sint, D::Fmt8_8, N::Sint),
    color(F::R8G8Srgb, D::Fmt8_8, N::Srgb),
    color(F::R8G8B8Unorm, D::Fmt8_8_8, N::Unorm),
    color(F::R8G8B8Snorm, D::Fmt8_8_8, N::Snorm),
    color(F::R8G8B8Uscaled, D::Fmt8_8_8, N::Uscaled),
    color(F::R8G8B8Sscaled, D::Fmt8_8_8, N::Sscaled),
    color(F::R8G8B8Uint, D::Fmt8_8_8, N::Uint),
    color(F::R8G8B8Sint, D::Fmt8_8_8, N::Sint),
    color(F::R8G8B8Srgb, D::Fmt8_8_8, N::Srgb),
    color(F::B8G8R8Unorm, D::Fmt8_8_8_Bgr, N::Unorm),
    color(F::B8G8R8Snorm, D::Fmt8_8_8_Bgr, N::Snorm),
    color(F::B8G8R8Uscaled, D::Fmt8_8_8_Bgr, N::Uscaled),
    color(F::B8G8R8Sscaled, D::Fmt8_8_8_Bgr, N::Sscaled),
    color(F::B8G8R8Uint, D::Fmt8_8_8_Bgr, N::Uint),
    color(F::B8G8R8Sint, D::Fmt8_8_8_Bgr, N::Sint),
    color(F::B8G8R8Srgb, D::Fmt8_8_8_Bgr, N::Srgb),
    both(F::R8G8B8A8Unorm, D::Fmt8_8_8_8, N::Unorm),
    both(F::R8G8B8A8Snorm, D::Fmt8_8_8_8, N::Snorm),
    both(F::R8G8B8A8Uscaled, D::Fmt8_8_8_8, N::Uscaled),
    both(F::R8G8B8A8Sscaled, D::Fmt8_8_8_8, N::Sscaled),
    both(F::R8G8B8A8Uint, D::Fmt8_8_8_8, N::Uint),
    both(F::R8G8B8A8Sint, D::Fmt8_8_8_8, N::Sint),
    color(F::R8G8B8A8Srgb, D::Fmt8_8_8_8, N::Srgb),
    both(F::B8G8R8A8Unorm, D::Fmt8_8_8_8_Bgra, N::Unorm),
    both(F::B8G8R8A8Snorm, D::Fmt8_8_8_8_Bgra, N::Snorm),
    both(F::B8G8R8A8Uscaled, D::Fmt8_8_8_8_Bgra, N::Uscaled),
    both(F::B8G8R8A8Sscaled, D::Fmt8_8_8_8_Bgra, N::Sscaled),
    both(F::B8G8R8A8Uint, D::Fmt8_8_8_8_Bgra, N::Uint),
    both(F::B8G8R8A8Sint, D::Fmt8_8_8_8_Bgra, N::Sint),
    color(F::B8G8R8A8Srgb, D::Fmt8_8_8_8_Bgra, N::Srgb),
    both(F::A8B8G8R8UnormPack32, D::Fmt8_8_8_8, N::Unorm),
    both(F::A8B8G8R8SnormPack32, D::Fmt8_8_8_8, N::Snorm),
    both(F::A8B8G8R8UscaledPack32, D::Fmt8_8_8_8, N::Uscaled),
    both(F::A8B8G8R8SscaledPack32, D::Fmt8_8_8_8, N::Sscaled),
    both(F::A8B8G8R8UintPack32, D::Fmt8_8_8_8, N::Uint),
    both(F::A8B8G8R8SintPack32, D::Fmt8_8_8_8, N::Sint),
    color(F::A8B8G8R8SrgbPack32, D::Fmt8_8_8_8, N::Srgb),
    both(F::A2R10G10B10UnormPack32, D::Fmt2_10_10_10_Bgra, N::Unorm),
    both(F::A2R10G10B10SnormPack32, D::Fmt2_10_10_10_Bgra, N::Snorm),
    both(F::A2R10G10B10UscaledPack32, D::Fmt2_10_10_10_Bgra, N::Uscaled),
    both(F::A2R10G10B10SscaledPack32, D::Fmt2_10_10_10_Bgra, N::Sscaled),
    both(F::A2R10G10B10UintPack32, D::Fmt2_10_10_10_Bgra, N::Uint),
    both(F::A2R10G10B10SintPack32, D::Fmt2_10_10_10_Bgra, N::Sint),
    both(F::A2B10G10R10UnormPack32, D::Fmt2_10_10_10, N::Unorm),
    vertex(F::A2B10G10R10SnormPack32, D::Fmt2_10_10_10, N::Snorm),
    both(F::A2B10G10R10UscaledPack32, D::Fmt2_10_10_10, N::Uscaled),
    vertex(F::A2B10G10R10SscaledPack32, D::Fmt2_10_10_10, N::Sscaled),
    both(F::A2B10G10R10UintPack32, D::Fmt2_10_10_10, N::Uint),
    vertex(F::A2B10G10R10SintPack32, D::Fmt2_10_10_10, N::Sint),
    both(F::R16Unorm, D::Fmt16, N::Unorm),
    both(F::R16Snorm, D::Fmt16, N::Snorm),
    both(F::R16Uscaled, D::Fmt16, N::Uscaled),
    both(F::R16Sscaled, D::Fmt16, N::Sscaled),
    both(F::R16Uint, D::Fmt16, N::Uint),
    both(F::R16Sint, D::Fmt16, N::Sint),
    both(F::R16Sfloat, D::Fmt16, N::Float),
    both(F::R16G16Unorm, D::Fmt16_16, N::Unorm),
    both(F::R16G16Snorm, D::Fmt16_16, N::Snorm),
    both(F::R16G16Uscaled, D::Fmt16_16, N::Uscaled),
    both(F::R16G16Sscaled, D::Fmt16_16, N::Sscaled),
    both(F::R16G16Uint, D::Fmt16_16, N::Uint),
    both(F::R16G16Sint, D::Fmt16_16, N::Sint),
    both(F::R16G16Sfloat, D::Fmt16_16, N::Float),
    invalid(F::R16G16B16Unorm),
    invalid(F::R16G16B16Snorm),
    invalid(F::R16G16B16Uscaled),
    invalid(F::R16G16B16Sscaled),
    invalid(F::R16G16B16Uint),
    invalid(F::R16G16B16Sint),
    invalid(F::R16G16B16Sfloat),
    both(F::R16G16B16A16Unorm, D::Fmt16_16_16_16, N::Unorm),
    both(F::R16G16B16A16Snorm, D::Fmt16_16_16_16, N::Snorm),
    both(F::R16G16B16A16Uscaled, D::Fmt16_16_16_16, N::Uscaled),
    both(F::R16G16B16A16Sscaled, D::Fmt16_16_16_16, N::Sscaled),
    both(F::R16G16B16A16Uint, D::Fmt16_16_16_16, N::Uint),
    both(F::R16G16B16A16Sint, D::Fmt16_16_16_16, N::Sint),
    both(F::R16G16B16A16Sfloat, D::Fmt16_16_16_16, N::Float),
    both(F::R32Uint, D::Fmt32, N::Uint),
    both(F::R32Sint, D::Fmt32, N::Sint),
    both(F::R32Sfloat, D::Fmt32, N::Float),
    both(F::R32G32Uint, D::Fmt32_32, N::Uint),
    both(F::R32G32Sint, D::Fmt32_32, N::Sint),
    both(F::R32G32Sfloat, D::Fmt32_32, N::Float),
    both(F::R32G32B32Uint, D::Fmt32_32_32, N::Uint),
    both(F::R32G32B32Sint, D::Fmt32_32_32, N::Sint),
    both(F::R32G32B32Sfloat, D::Fmt32_32_32, N::Float),
    both(F::R32G32B32A32Uint, D::Fmt32_32_32_32, N::Uint),
    both(F::R32G32B32A32Sint, D::Fmt32_32_32_32, N::Sint),
    both(F::R32G32B32A32Sfloat, D::Fmt32_32_32_32, N::Float),
    vertex(F::R64Uint, D::Fmt64, N::Uint),
    vertex(F::R64Sint, D::Fmt64, N::Sint),
    vertex(F::R64Sfloat, D::Fmt64, N::Float),
    vertex(F::R64G64Uint, D::Fmt64_64, N::Uint),
    vertex(F::R64G64Sint, D::Fmt64_64, N::Sint),
    vertex(F::R64G64Sfloat, D::Fmt64_64, N::Float),
    vertex(F::R64G64B64Uint, D::Fmt64_64_64, N::Uint),
    vertex(F::R64G64B64Sint, D::Fmt64_64_64, N::Sint),
    vertex(F::R64G64B64Sfloat, D::Fmt64_64_64, N::Float),
    vertex(F::R64G64B64A64Uint, D::Fmt64_64_64_64, N::Uint),
    vertex(F::R64G64B64A64Sint, D::Fmt64_64_64_64, N::Sint),
    vertex(F::R64G64B64A64Sfloat, D::Fmt64_64_64_64, N::Float),
    both(F::B10G11R11UfloatPack32, D::Fmt10_11_11, N::Float),
    color(F::E5B9G9R9UfloatPack32, D::Fmt5_9_9_9, N::Float),
    color(F::D16Unorm, D::Fmt16, N::Unorm),
    invalid(F::X8D24UnormPack32),
    color(F::D32Sfloat, D::Fmt32, N::Float),
    color(F::S8Uint, D::Fmt8, N::Uint),
    color(F::D16UnormS8Uint, D::Fmt16, N::Float),
    invalid(F::D24UnormS8Uint),
    color(F::D32SfloatS8Uint, D::Fmt32, N::Float),
    invalid(F::Bc1RgbUnormBlock),
    invalid(F::Bc1RgbSrgbBlock),
    invalid(F::Bc1RgbaUnormBlock),
    invalid(F::Bc1RgbaSrgbBlock),
    invalid(F::Bc2UnormBlock),
    invalid(F::Bc2SrgbBlock),
    invalid(F::Bc3UnormBlock),
    invalid(F::Bc3SrgbBlock),
    invalid(F::Bc4UnormBlock),
    invalid(F::Bc4SnormBlock),
    invalid(F::Bc5UnormBlock),
    invalid(F::Bc5SnormBlock),
    invalid(F::Bc6hUfloatBlock),
    invalid(F::Bc6hSfloatBlock),
    invalid(F::Bc7UnormBlock),
    invalid(F::Bc7SrgbBlock),
    invalid(F::Etc2R8G8B8UnormBlock),
    invalid(F::Etc2R8G8B8SrgbBlock),
    invalid(F::Etc2R8G8B8A1UnormBlock),
    invalid(F::Etc2R8G8B8A1SrgbBlock),
    invalid(F::Etc2R8G8B8A8UnormBlock),
    invalid(F::Etc2R8G8B8A8SrgbBlock),
    invalid(F::EacR11UnormBlock),
    invalid(F::EacR11SnormBlock),
    invalid(F::EacR11G11UnormBlock),
    invalid(F::EacR11G11SnormBlock),
    invalid(F::Astc4x4UnormBlock),
    invalid(F::Astc4x4SrgbBlock),
    invalid(F::Astc5x4UnormBlock),
    invalid(F::Astc5x4SrgbBlock),
    invalid(F::Astc5x5UnormBlock),
    invalid(F::Astc5x5SrgbBlock),
    invalid(F::Astc6x5UnormBlock),
    invalid(F::Astc6x5SrgbBlock),
    invalid(F::Astc6x6UnormBlock),
    invalid(F::Astc6x6SrgbBlock),
    invalid(F::Astc8x5UnormBlock),
    invalid(F::Astc8x5SrgbBlock),
    invalid(F::Astc8x6UnormBlock),
    invalid(F::Astc8x6SrgbBlock),
    invalid(F::Astc8x8UnormBlock),
    invalid(F::Astc8x8SrgbBlock),
    invalid(F::Astc10x5UnormBlock),
    invalid(F::Astc10x5SrgbBlock),
    invalid(F::Astc10x6UnormBlock),
    invalid(F::Astc10x6SrgbBlock),
    invalid(F::Astc10x8UnormBlock),
    invalid(F::Astc10x8SrgbBlock),
    invalid(F::Astc10x10UnormBlock),
    invalid(F::Astc10x10SrgbBlock),
    invalid(F::Astc12x10UnormBlock),
    invalid(F::Astc12x10SrgbBlock),
    invalid(F::Astc12x12UnormBlock),
    invalid(F::Astc12x12SrgbBlock),
];

/// Maps a pixel format to a middle-end (data format, numeric format) pair.
///
/// Total function: a format outside the table or not valid for `usage`
/// yields `(BufDataFormat::Invalid, BufNumFormat::Unorm)`, which callers
/// treat as "skip this attribute or target".
pub fn map_pixel_format(format: PixelFormat, usage: FormatUse) -> (BufDataFormat, BufNumFormat) {
    let Some(entry) = FORMAT_TABLE.get(format.code() as usize) else {
        return (BufDataFormat::Invalid, BufNumFormat::Unorm);
    };
    debug_assert_eq!(entry.format, format);

    let valid = match usage {
        FormatUse::VertexInput => entry.valid_vertex,
        FormatUse::ColorExport => entry.valid_export,
    };
    if valid {
        (entry.dfmt, entry.nfmt)
    } else {
        (BufDataFormat::Invalid, BufNumFormat::Unorm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_self_consistent() {
        // Every entry must sit at the index of its own format code, and an
        // invalid data format must never be flagged valid for any use.
        for (index, entry) in FORMAT_TABLE.iter().enumerate() {
            assert_eq!(entry.format.code() as usize, index);
            if entry.dfmt == BufDataFormat::Invalid {
                assert!(!entry.valid_vertex && !entry.valid_export);
            }
        }
    }

    #[test]
    fn lookup_respects_the_use_flag() {
        // Valid for both uses.
        assert_eq!(
            map_pixel_format(PixelFormat::R32G32Sfloat, FormatUse::VertexInput),
            (BufDataFormat::Fmt32_32, BufNumFormat::Float)
        );
        assert_eq!(
            map_pixel_format(PixelFormat::R32G32Sfloat, FormatUse::ColorExport),
            (BufDataFormat::Fmt32_32, BufNumFormat::Float)
        );

        // Vertex-only: 64-bit formats cannot be exported.
        assert_eq!(
            map_pixel_format(PixelFormat::R64Sfloat, FormatUse::VertexInput),
            (BufDataFormat::Fmt64, BufNumFormat::Float)
        );
        assert_eq!(
            map_pixel_format(PixelFormat::R64Sfloat, FormatUse::ColorExport),
            (BufDataFormat::Invalid, BufNumFormat::Unorm)
        );

        // Export-only: sRGB is not a vertex format.
        assert_eq!(
            map_pixel_format(PixelFormat::R8G8B8A8Srgb, FormatUse::ColorExport),
            (BufDataFormat::Fmt8_8_8_8, BufNumFormat::Srgb)
        );
        assert_eq!(
            map_pixel_format(PixelFormat::R8G8B8A8Srgb, FormatUse::VertexInput),
            (BufDataFormat::Invalid, BufNumFormat::Unorm)
        );

        // Invalid for both uses regardless of the flag.
        for usage in [FormatUse::VertexInput, FormatUse::ColorExport] {
            assert_eq!(
                map_pixel_format(PixelFormat::Bc7UnormBlock, usage),
                (BufDataFormat::Invalid, BufNumFormat::Unorm)
            );
            assert_eq!(
                map_pixel_format(PixelFormat::Undefined, usage),
                (BufDataFormat::Invalid, BufNumFormat::Unorm)
            );
        }
    }

    #[test]
    fn lookup_is_deterministic() {
        for entry in FORMAT_TABLE.iter() {
            let first = map_pixel_format(entry.format, FormatUse::VertexInput);
            let second = map_pixel_format(entry.format, FormatUse::VertexInput);
            assert_eq!(first, second);
        }
    }
}
