//! Flattened resource node table
//!
//! The middle end consumes user data layouts as one contiguous arena of
//! nodes. Top-level nodes sit at the front of the arena; every nested table
//! owns a [`NodeRange`] view over a sub-range carved from the tail of the
//! same arena, so no node moves once written and views never dangle.

use bytemuck::{Pod, Zeroable};

/// Descriptor node types, middle-end numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptorType {
    #[default]
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

/// A contiguous sub-range of the node arena owned by a nested table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeRange {
    pub start: usize,
    pub count: usize,
}

/// One 8-dword descriptor element of an immutable value.
///
/// Narrow descriptor kinds populate the first four dwords and leave the tail
/// zero; the wide YCbCr layout uses all eight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct ImmutableElement(pub [u32; 8]);

/// A constant descriptor array attached to a descriptor node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImmutableValue {
    pub elements: Vec<ImmutableElement>,
}

/// Payload of a flattened resource node.
#[derive(Debug, Clone, Default)]
pub enum ResourceNodeKind {
    /// Placeholder for an arena slot not yet written; never observed by the
    /// middle end once translation completes.
    #[default]
    Empty,
    /// A plain descriptor range.
    Descriptor {
        ty: DescriptorType,
        set: u32,
        binding: u32,
        /// Constant descriptor contents for an immutable binding.
        immutable_value: Option<ImmutableValue>,
    },
    /// A nested table; `inner` views a sub-range of the owning arena.
    DescriptorTable { inner: NodeRange },
    /// Indirect user data of the given dword size.
    IndirectUserData { indirect_size_in_dwords: u32 },
    /// Stream-out table of the given dword size.
    StreamOutTable { indirect_size_in_dwords: u32 },
}

/// One node of the flattened table.
#[derive(Debug, Clone, Default)]
pub struct ResourceNode {
    pub size_in_dwords: u32,
    pub offset_in_dwords: u32,
    pub kind: ResourceNodeKind,
}

/// The arena of flattened resource nodes.
///
/// Indices `0..top_level_count` hold the top-level nodes in their original
/// order; the remainder holds nested tables, addressed through the
/// [`NodeRange`] views of their parents.
#[derive(Debug, Clone, Default)]
pub struct ResourceNodeTable {
    nodes: Vec<ResourceNode>,
    top_level_count: usize,
}

impl ResourceNodeTable {
    /// Assembles a table from a fully written arena.
    ///
    /// The front end calls this after the flattening pass; `nodes` must
    /// contain `top_level_count` top-level entries at the front.
    pub fn new(nodes: Vec<ResourceNode>, top_level_count: usize) -> Self {
        debug_assert!(top_level_count <= nodes.len());
        ResourceNodeTable { nodes, top_level_count }
    }

    /// The top-level nodes, in description order.
    pub fn top_level(&self) -> &[ResourceNode] {
        &self.nodes[..self.top_level_count]
    }

    /// The nodes of a nested table.
    pub fn table(&self, range: NodeRange) -> &[ResourceNode] {
        &self.nodes[range.start..range.start + range.count]
    }

    /// Every node in the arena, top-level and nested.
    pub fn all_nodes(&self) -> &[ResourceNode] {
        &self.nodes
    }

    /// Total number of arena slots.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the arena holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
