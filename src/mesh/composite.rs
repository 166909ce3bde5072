//! Multi-block container.

use crate::mesh::MeshOutput;

/// One named slot of a [`Composite`]; `data` is `None` for a hole.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    pub name: Option<String>,
    pub data: Option<MeshOutput>,
}

/// Ordered, named, sparsely populated collection of outputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Composite {
    blocks: Vec<Block>,
}

impl Composite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Container with `count` empty, unnamed slots.
    pub fn with_blocks(count: usize) -> Self {
        Self {
            blocks: vec![Block::default(); count],
        }
    }

    /// Append a slot and return its index.
    pub fn push(&mut self, name: Option<String>, data: Option<MeshOutput>) -> usize {
        self.blocks.push(Block { name, data });
        self.blocks.len() - 1
    }

    /// Name slot `index`, growing the container if needed.
    pub fn set_name(&mut self, index: usize, name: impl Into<String>) {
        self.ensure(index);
        self.blocks[index].name = Some(name.into());
    }

    /// Fill slot `index`, growing the container if needed.
    pub fn set(&mut self, index: usize, data: MeshOutput) {
        self.ensure(index);
        self.blocks[index].data = Some(data);
    }

    fn ensure(&mut self, index: usize) {
        if index >= self.blocks.len() {
            self.blocks.resize(index + 1, Block::default());
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Output in slot `index`, if the slot exists and is filled.
    pub fn get(&self, index: usize) -> Option<&MeshOutput> {
        self.blocks.get(index).and_then(|b| b.data.as_ref())
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.blocks.get(index).and_then(|b| b.name.as_deref())
    }

    /// First filled slot named `name`.
    pub fn get_by_name(&self, name: &str) -> Option<&MeshOutput> {
        self.blocks
            .iter()
            .find(|b| b.name.as_deref() == Some(name))
            .and_then(|b| b.data.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Number of filled slots.
    pub fn filled(&self) -> usize {
        self.blocks.iter().filter(|b| b.data.is_some()).count()
    }

    /// Filled leaves of the whole tree, depth first.
    pub fn leaves(&self) -> Vec<&MeshOutput> {
        let mut out = Vec::new();
        for block in &self.blocks {
            match &block.data {
                Some(MeshOutput::Composite(inner)) => out.extend(inner.leaves()),
                Some(leaf) => out.push(leaf),
                None => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::UnstructuredMesh;

    #[test]
    fn holes_are_preserved() {
        let mut c = Composite::with_blocks(3);
        c.set_name(0, "a");
        c.set_name(2, "c");
        c.set(2, MeshOutput::Unstructured(UnstructuredMesh::new()));
        assert_eq!(c.len(), 3);
        assert_eq!(c.filled(), 1);
        assert!(c.get(0).is_none());
        assert_eq!(c.name(2), Some("c"));
        assert!(c.get_by_name("c").is_some());
    }

    #[test]
    fn leaves_flatten_nested_containers() {
        let mut inner = Composite::new();
        inner.push(None, Some(MeshOutput::Unstructured(UnstructuredMesh::new())));
        let mut outer = Composite::new();
        outer.push(Some("inner".into()), Some(MeshOutput::Composite(inner)));
        outer.push(Some("hole".into()), None);
        outer.push(None, Some(MeshOutput::Unstructured(UnstructuredMesh::new())));
        assert_eq!(outer.leaves().len(), 2);
    }
}
