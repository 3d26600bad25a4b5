use cgmath::{Matrix4, SquareMatrix};

use crate::gfx::{
    color::Color,
    geometry::GeometryData,
    resources::material::{Material, MaterialId, MaterialManager},
};

use super::{
    light::Light,
    node::{GeometryId, Node, NodeBuilder, NodeId, NodeKind, Transform},
};

/// Main scene containing nodes, geometries, materials and lights
///
/// Nodes live in a flat arena. A parent is always added before its children,
/// so arena order is also a valid top-down evaluation order.
pub struct Scene {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    geometries: Vec<GeometryData>,
    lights: Vec<Light>,
    pub material_manager: MaterialManager,
    pub background: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            geometries: Vec::new(),
            lights: Vec::new(),
            material_manager: MaterialManager::new(),
            background: Color::WHITE,
        }
    }

    /// Stores a geometry so mesh nodes can share it
    pub fn add_geometry(&mut self, geometry: GeometryData) -> GeometryId {
        self.geometries.push(geometry);
        GeometryId(self.geometries.len() - 1)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&GeometryData> {
        self.geometries.get(id.0)
    }

    pub fn geometries(&self) -> &[GeometryData] {
        &self.geometries
    }

    /// Creates a new material and adds it to the material manager
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.material_manager.add_material(material)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.material_manager.get_material(id)
    }

    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.material_manager.get_material_mut(id)
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Adds an empty transform node
    ///
    /// # Arguments
    /// * `parent` - Parent node, or `None` for a root
    /// * `name` - Node name used by [`Scene::find_by_name`]
    pub fn add_group(&mut self, parent: Option<NodeId>, name: &str) -> NodeBuilder<'_> {
        self.insert(parent, name, NodeKind::Group)
    }

    /// Adds a mesh node pairing a stored geometry with a material
    pub fn add_mesh(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        geometry: GeometryId,
        material: MaterialId,
    ) -> NodeBuilder<'_> {
        self.insert(parent, name, NodeKind::Mesh { geometry, material })
    }

    fn insert(&mut self, parent: Option<NodeId>, name: &str, kind: NodeKind) -> NodeBuilder<'_> {
        let id = NodeId(self.nodes.len());
        // an unknown parent degrades to a root rather than a dangling link
        let parent = parent.filter(|p| p.0 < self.nodes.len());

        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        self.nodes.push(Node::new(name, kind, parent));

        let node = &mut self.nodes[id.0];
        NodeBuilder::new(node, id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(id.0).map(|n| &mut n.transform)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Visits every node depth-first, parents before children
    pub fn traverse(&self, mut visit: impl FnMut(NodeId, &Node)) {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            visit(id, node);
            stack.extend(node.children.iter().rev().copied());
        }
    }

    /// Mesh nodes in traversal order
    pub fn mesh_nodes(&self) -> Vec<NodeId> {
        let mut meshes = Vec::new();
        self.traverse(|id, node| {
            if node.is_mesh() {
                meshes.push(id);
            }
        });
        meshes
    }

    pub fn mesh_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_mesh()).count()
    }

    /// Number of mesh nodes in the subtree rooted at `root`, including itself
    pub fn subtree_mesh_count(&self, root: NodeId) -> usize {
        let Some(node) = self.node(root) else {
            return 0;
        };
        let own = usize::from(node.is_mesh());
        own + node
            .children
            .iter()
            .map(|&c| self.subtree_mesh_count(c))
            .sum::<usize>()
    }

    /// First node with the given name, in arena order
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// World matrices for every node, indexed by [`NodeId::index`]
    ///
    /// Each entry is `parent_world * local`.
    pub fn world_matrices(&self) -> Vec<Matrix4<f32>> {
        let mut world: Vec<Matrix4<f32>> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let local = node.transform.matrix();
            let matrix = match node.parent {
                Some(p) => world[p.0] * local,
                None => local,
            };
            world.push(matrix);
        }
        world
    }

    /// World matrix of a single node, walking up its parents
    pub fn world_matrix(&self, id: NodeId) -> Matrix4<f32> {
        let mut matrix = Matrix4::identity();
        let mut current = Some(id);
        while let Some(node) = current.and_then(|c| self.node(c)) {
            matrix = node.transform.matrix() * matrix;
            current = node.parent;
        }
        matrix
    }

    /// A node is drawn only if it and all its ancestors are visible
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current.and_then(|c| self.node(c)) {
            if !node.visible {
                return false;
            }
            current = node.parent;
        }
        true
    }

    /// Gets statistics about the scene
    pub fn statistics(&self) -> SceneStatistics {
        let mut stats = SceneStatistics {
            node_count: self.nodes.len(),
            mesh_count: 0,
            light_count: self.lights.len(),
            material_count: self.material_manager.len(),
            geometry_count: self.geometries.len(),
            total_triangles: 0,
            total_vertices: 0,
        };

        for node in &self.nodes {
            if let Some(geometry) = node.geometry().and_then(|g| self.geometry(g)) {
                stats.mesh_count += 1;
                stats.total_triangles += geometry.triangle_count();
                stats.total_vertices += geometry.vertex_count();
            }
        }

        stats
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub node_count: usize,
    pub mesh_count: usize,
    pub light_count: usize,
    pub material_count: usize,
    pub geometry_count: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{generate_box, generate_sphere};
    use cgmath::{InnerSpace, Vector3, Vector4};

    fn small_scene() -> (Scene, NodeId, NodeId, NodeId) {
        let mut scene = Scene::new();
        let sphere = scene.add_geometry(generate_sphere(0.1, 8, 6));
        let cube = scene.add_geometry(generate_box(0.1, 0.1, 0.1));
        let skin = scene.add_material(Material::lambert("skin", 0x8B5C2B));

        let root = scene.add_group(None, "player").position(0.0, 1.0, 0.0).id();
        let head = scene
            .add_mesh(Some(root), "head", sphere, skin)
            .position(0.0, 1.0, 0.0)
            .cast_shadow()
            .id();
        let nose = scene
            .add_mesh(Some(head), "nose", cube, skin)
            .position(0.0, 0.0, 0.5)
            .id();
        (scene, root, head, nose)
    }

    #[test]
    fn test_hierarchy_links() {
        let (scene, root, head, nose) = small_scene();
        assert_eq!(scene.roots(), &[root]);
        assert_eq!(scene.children(root), &[head]);
        assert_eq!(scene.node(nose).unwrap().parent(), Some(head));
        assert!(scene.node(head).unwrap().cast_shadow);
        assert_eq!(scene.find_by_name("nose"), Some(nose));
        assert_eq!(scene.find_by_name("ankle"), None);
    }

    #[test]
    fn test_traverse_is_preorder() {
        let (mut scene, root, head, nose) = small_scene();
        let sibling = scene.add_group(Some(root), "arm").id();

        let mut order = Vec::new();
        scene.traverse(|id, _| order.push(id));
        assert_eq!(order, vec![root, head, nose, sibling]);
        assert_eq!(scene.mesh_nodes(), vec![head, nose]);
        assert_eq!(scene.mesh_count(), 2);
        assert_eq!(scene.subtree_mesh_count(root), 2);
        assert_eq!(scene.subtree_mesh_count(nose), 1);
    }

    #[test]
    fn test_world_matrices_compose_parents() {
        let (mut scene, root, _, nose) = small_scene();
        scene.transform_mut(root).unwrap().scale = Vector3::new(2.0, 2.0, 2.0);

        let world = scene.world_matrices();
        let p = world[nose.index()] * Vector4::new(0.0, 0.0, 0.0, 1.0);
        // root (0,1,0) + 2 * (head (0,1,0) + nose (0,0,0.5))
        assert!((p.truncate() - Vector3::new(0.0, 3.0, 1.0)).magnitude() < 1e-5);
        let q = scene.world_matrix(nose) * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((p - q).magnitude() < 1e-5);
    }

    #[test]
    fn test_visibility_inherits() {
        let (mut scene, root, _, nose) = small_scene();
        assert!(scene.is_visible(nose));
        scene.node_mut(root).unwrap().visible = false;
        assert!(!scene.is_visible(nose));
    }

    #[test]
    fn test_statistics() {
        let (scene, ..) = small_scene();
        let stats = scene.statistics();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.mesh_count, 2);
        assert_eq!(stats.material_count, 1);
        assert_eq!(stats.geometry_count, 2);
        assert_eq!(stats.total_vertices, 9 * 7 + 24);
    }
}
