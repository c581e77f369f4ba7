//! Resource binding description
//!
//! A shader stage describes its user data layout as a tree of resource
//! mapping nodes: plain descriptor ranges keyed by (set, binding), nested
//! descriptor tables holding further nodes, and a couple of pointer kinds
//! whose payload lives outside the table. Static descriptor values supply
//! compile-time-constant descriptor words for immutable bindings.

use serde::Deserialize;

/// Kinds of plain descriptor ranges.
///
/// `YCbCrSampler` has a fixed wide descriptor layout and is always handled by
/// name rather than by numeric value; its code is not guaranteed stable
/// across schema revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DescriptorKind {
    Resource,
    Sampler,
    YCbCrSampler,
    CombinedTexture,
    TexelBuffer,
    Fmask,
    Buffer,
    PushConst,
    BufferCompact,
}

/// One node in a resource mapping tree.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceMappingNode {
    /// Size of the node in dwords within its table.
    pub size_in_dwords: u32,
    /// Offset of the node in dwords within its table.
    pub offset_in_dwords: u32,
    /// What the node binds.
    pub kind: ResourceMappingKind,
}

/// Payload of a resource mapping node.
#[derive(Debug, Clone, Deserialize)]
pub enum ResourceMappingKind {
    /// A plain descriptor range addressed by (set, binding).
    Descriptor {
        kind: DescriptorKind,
        set: u32,
        binding: u32,
    },
    /// A pointer to a nested descriptor table. Tables nest to arbitrary depth.
    DescriptorTable { nodes: Vec<ResourceMappingNode> },
    /// A pointer to indirect user data of the given dword size.
    IndirectUserData { size_in_dwords: u32 },
    /// A pointer to the stream-out table of the given dword size.
    StreamOutTable { size_in_dwords: u32 },
}

impl ResourceMappingNode {
    /// Convenience constructor for a plain descriptor node.
    pub fn descriptor(
        kind: DescriptorKind,
        set: u32,
        binding: u32,
        offset_in_dwords: u32,
        size_in_dwords: u32,
    ) -> Self {
        ResourceMappingNode {
            size_in_dwords,
            offset_in_dwords,
            kind: ResourceMappingKind::Descriptor { kind, set, binding },
        }
    }

    /// Convenience constructor for a nested table pointer node.
    pub fn table(offset_in_dwords: u32, nodes: Vec<ResourceMappingNode>) -> Self {
        ResourceMappingNode {
            size_in_dwords: 1,
            offset_in_dwords,
            kind: ResourceMappingKind::DescriptorTable { nodes },
        }
    }
}

/// A compile-time-constant descriptor value for one (set, binding).
///
/// `words` holds `array_size` consecutive descriptor elements; how many words
/// one element occupies depends on the descriptor kind of the node the value
/// attaches to. A value whose (set, binding) never appears in the mapping
/// tree is simply unused.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticDescriptorValue {
    pub set: u32,
    pub binding: u32,
    /// Number of descriptor elements described by `words`.
    pub array_size: u32,
    /// Raw descriptor words, element-major.
    pub words: Vec<u32>,
}
