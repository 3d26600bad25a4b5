//! Scene nodes and their transforms

use cgmath::{Matrix4, Rad, SquareMatrix, Vector3};

use crate::gfx::resources::material::MaterialId;

/// Handle to a node stored in a [`super::Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a geometry stored in a [`super::Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(pub(crate) usize);

impl GeometryId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Local transform of a node
///
/// Rotation holds Euler angles in radians applied in XYZ order, so the local
/// matrix is `T * Rx * Ry * Rz * S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn from_position(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            ..Default::default()
        }
    }

    /// Builds the local model matrix
    pub fn matrix(&self) -> Matrix4<f32> {
        let translation = Matrix4::from_translation(self.position);
        let rotation = Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z));
        let scale = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        translation * rotation * scale
    }

    /// True when an odd number of scale axes are negative
    pub fn is_mirrored(&self) -> bool {
        self.scale.x * self.scale.y * self.scale.z < 0.0
    }
}

/// Whether a node draws anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Group,
    Mesh {
        geometry: GeometryId,
        material: MaterialId,
    },
}

/// A node in the scene hierarchy
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub visible: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(name: &str, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            transform: Transform::default(),
            kind,
            cast_shadow: false,
            receive_shadow: false,
            visible: true,
            parent,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh { .. })
    }

    pub fn material(&self) -> Option<MaterialId> {
        match self.kind {
            NodeKind::Mesh { material, .. } => Some(material),
            NodeKind::Group => None,
        }
    }

    pub fn geometry(&self) -> Option<GeometryId> {
        match self.kind {
            NodeKind::Mesh { geometry, .. } => Some(geometry),
            NodeKind::Group => None,
        }
    }
}

/// Builder for fluent node configuration
///
/// Returned by [`super::Scene::add_mesh`] and [`super::Scene::add_group`];
/// finish with [`NodeBuilder::id`].
pub struct NodeBuilder<'a> {
    node: &'a mut Node,
    id: NodeId,
}

impl<'a> NodeBuilder<'a> {
    pub(crate) fn new(node: &'a mut Node, id: NodeId) -> Self {
        Self { node, id }
    }

    pub fn position(self, x: f32, y: f32, z: f32) -> Self {
        self.node.transform.position = Vector3::new(x, y, z);
        self
    }

    pub fn rotation(self, x: f32, y: f32, z: f32) -> Self {
        self.node.transform.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn scale(self, x: f32, y: f32, z: f32) -> Self {
        self.node.transform.scale = Vector3::new(x, y, z);
        self
    }

    pub fn cast_shadow(self) -> Self {
        self.node.cast_shadow = true;
        self
    }

    pub fn receive_shadow(self) -> Self {
        self.node.receive_shadow = true;
        self
    }

    pub fn id(self) -> NodeId {
        self.id
    }
}

/// Determinant sign check for a composed world matrix
pub fn is_mirrored_matrix(matrix: &Matrix4<f32>) -> bool {
    matrix.determinant() < 0.0
}
