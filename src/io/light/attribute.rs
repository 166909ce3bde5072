//! Attribute descriptors.

use serde::{Deserialize, Serialize};

use crate::data::field::ActiveRole;
use crate::io::heavy::ArrayRef;

/// Semantic type of an attribute.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum AttributeType {
    Scalar,
    Vector,
    Tensor,
    /// Symmetric 3x3 tensor stored as `xx, xy, xz, yy, yz, zz`.
    Tensor6,
    Matrix,
    GlobalId,
}

impl AttributeType {
    /// Role an active attribute of this type takes in its field bucket.
    pub fn active_role(self) -> Option<ActiveRole> {
        match self {
            AttributeType::Scalar => Some(ActiveRole::Scalars),
            AttributeType::Vector => Some(ActiveRole::Vectors),
            AttributeType::Tensor | AttributeType::Tensor6 => Some(ActiveRole::Tensors),
            AttributeType::GlobalId => Some(ActiveRole::GlobalIds),
            AttributeType::Matrix => None,
        }
    }
}

/// Where attribute values live.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Center {
    Grid,
    Cell,
    Face,
    Edge,
    Node,
}

/// One field array of a grid or set.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeDescriptor {
    pub name: String,
    pub attribute_type: AttributeType,
    pub center: Center,
    pub active: bool,
    pub values: ArrayRef,
    /// Columns of a `Matrix` attribute.
    pub matrix_components: Option<usize>,
}

impl AttributeDescriptor {
    pub fn new(
        name: impl Into<String>,
        attribute_type: AttributeType,
        center: Center,
        values: impl Into<ArrayRef>,
    ) -> Self {
        Self {
            name: name.into(),
            attribute_type,
            center,
            active: false,
            values: values.into(),
            matrix_components: None,
        }
    }

    pub fn scalar(name: impl Into<String>, center: Center, values: impl Into<ArrayRef>) -> Self {
        Self::new(name, AttributeType::Scalar, center, values)
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_matrix_components(mut self, components: usize) -> Self {
        self.matrix_components = Some(components);
        self
    }

    /// Tuple width as stored in heavy data.
    pub fn components(&self) -> usize {
        match self.attribute_type {
            AttributeType::Scalar | AttributeType::GlobalId => 1,
            AttributeType::Vector => 3,
            AttributeType::Tensor => 9,
            AttributeType::Tensor6 => 6,
            AttributeType::Matrix => self.matrix_components.unwrap_or(1).max(1),
        }
    }
}
