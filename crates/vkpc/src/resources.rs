//! Resource node tree flattening
//!
//! Translates the tree of resource mapping nodes of the first active stage
//! into the middle end's contiguous node arena. The arena is allocated once
//! from a counting pre-pass and then written with two cursors: each table
//! writes its own entries forward from its assigned start, while a single
//! backward cursor shared across the whole call carves the slots of every
//! nested table from the unused tail. The cursors meet exactly when the tree
//! has been consumed; a gap or an overlap is a counting bug.
//!
//! Static descriptor values are indexed by (set, binding) up front and
//! attached to matching descriptor nodes as constant element arrays.

use std::collections::HashMap;
use vkpc_api as api;
use vkpc_ir as ir;

/// Total slot count of a mapping tree: its own nodes plus, recursively, the
/// nodes of every nested table.
fn count_nodes(nodes: &[api::ResourceMappingNode]) -> usize {
    let mut count = nodes.len();
    for node in nodes {
        if let api::ResourceMappingKind::DescriptorTable { nodes: children } = &node.kind {
            count += count_nodes(children);
        }
    }
    count
}

fn descriptor_type(kind: api::DescriptorKind) -> ir::DescriptorType {
    match kind {
        api::DescriptorKind::Resource => ir::DescriptorType::Resource,
        api::DescriptorKind::Sampler => ir::DescriptorType::Sampler,
        api::DescriptorKind::YCbCrSampler => ir::DescriptorType::YCbCrSampler,
        api::DescriptorKind::CombinedTexture => ir::DescriptorType::CombinedTexture,
        api::DescriptorKind::TexelBuffer => ir::DescriptorType::TexelBuffer,
        api::DescriptorKind::Fmask => ir::DescriptorType::Fmask,
        api::DescriptorKind::Buffer => ir::DescriptorType::Buffer,
        api::DescriptorKind::PushConst => ir::DescriptorType::PushConst,
        api::DescriptorKind::BufferCompact => ir::DescriptorType::BufferCompact,
    }
}

/// Builds the constant element array for an immutable binding.
///
/// Narrow descriptor kinds occupy four source words per element, the wide
/// YCbCr sampler layout eight; every element is stored zero-padded to the
/// wide width. Source words past the end of the value's word array read as
/// zero rather than failing the translation.
fn build_immutable_value(kind: api::DescriptorKind, value: &api::StaticDescriptorValue) -> ir::ImmutableValue {
    let element_words: usize = if kind == api::DescriptorKind::YCbCrSampler { 8 } else { 4 };

    let mut elements = Vec::with_capacity(value.array_size as usize);
    for element_index in 0..value.array_size as usize {
        let mut words = [0u32; 8];
        for (word_index, word) in words.iter_mut().take(element_words).enumerate() {
            *word = value.words.get(element_index * element_words + word_index).copied().unwrap_or(0);
        }
        elements.push(ir::ImmutableElement(words));
    }
    ir::ImmutableValue { elements }
}

struct Flattener<'a> {
    arena: Vec<ir::ResourceNode>,
    /// Backward cursor shared across the whole call; nested tables claim
    /// their slots by decrementing it.
    inner_cursor: usize,
    immutable: HashMap<(u32, u32), &'a api::StaticDescriptorValue>,
}

impl<'a> Flattener<'a> {
    fn new(total: usize, values: &'a [api::StaticDescriptorValue]) -> Self {
        // Duplicate (set, binding) keys resolve last-wins in input order.
        let mut immutable = HashMap::with_capacity(values.len());
        for value in values {
            immutable.insert((value.set, value.binding), value);
        }
        Flattener {
            arena: vec![ir::ResourceNode::default(); total],
            inner_cursor: total,
            immutable,
        }
    }

    /// Writes one table's nodes at `start..start + nodes.len()`, carving and
    /// recursing into nested tables as they are encountered.
    fn fill_table(&mut self, nodes: &[api::ResourceMappingNode], start: usize) {
        for (index, node) in nodes.iter().enumerate() {
            let kind = match &node.kind {
                api::ResourceMappingKind::DescriptorTable { nodes: children } => {
                    self.inner_cursor -= children.len();
                    let inner = ir::NodeRange { start: self.inner_cursor, count: children.len() };
                    self.fill_table(children, inner.start);
                    ir::ResourceNodeKind::DescriptorTable { inner }
                }
                api::ResourceMappingKind::IndirectUserData { size_in_dwords } => {
                    ir::ResourceNodeKind::IndirectUserData { indirect_size_in_dwords: *size_in_dwords }
                }
                api::ResourceMappingKind::StreamOutTable { size_in_dwords } => {
                    ir::ResourceNodeKind::StreamOutTable { indirect_size_in_dwords: *size_in_dwords }
                }
                api::ResourceMappingKind::Descriptor { kind, set, binding } => {
                    let immutable_value = self
                        .immutable
                        .get(&(*set, *binding))
                        .filter(|value| value.array_size != 0)
                        .map(|value| build_immutable_value(*kind, value));
                    ir::ResourceNodeKind::Descriptor {
                        ty: descriptor_type(*kind),
                        set: *set,
                        binding: *binding,
                        immutable_value,
                    }
                }
            };
            self.arena[start + index] = ir::ResourceNode {
                size_in_dwords: node.size_in_dwords,
                offset_in_dwords: node.offset_in_dwords,
                kind,
            };
        }
    }
}

/// Flattens one stage's mapping tree into the middle end's node arena.
pub(crate) fn build_user_data_nodes(
    nodes: &[api::ResourceMappingNode],
    values: &[api::StaticDescriptorValue],
) -> ir::ResourceNodeTable {
    let total = count_nodes(nodes);
    let mut flattener = Flattener::new(total, values);
    flattener.fill_table(nodes, 0);

    // The forward and backward cursors must meet exactly at the end of the
    // top-level table.
    debug_assert_eq!(flattener.inner_cursor, nodes.len());

    ir::ResourceNodeTable::new(flattener.arena, nodes.len())
}
