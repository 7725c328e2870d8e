//! Edge adjacency for planar triangulations.
//!
//! Provides lookups from undirected edges to the faces that own them, which
//! is what boundary classification and edge flipping need.

use hashbrown::HashMap;

/// Edge-to-face adjacency for a triangulation.
///
/// Edges are stored undirected as `(v0, v1)` with `v0 < v1`.
#[derive(Debug, Clone, Default)]
pub struct EdgeAdjacency {
    edge_to_faces: HashMap<(u32, u32), Vec<usize>>,
}

impl EdgeAdjacency {
    /// Build adjacency information from a list of faces.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_delaunay::EdgeAdjacency;
    ///
    /// let faces = vec![[0, 1, 2], [1, 3, 2]];
    /// let adj = EdgeAdjacency::build(&faces);
    ///
    /// assert_eq!(adj.boundary_edge_count(), 4);
    /// assert_eq!(adj.faces_for_edge(2, 1), Some(&[0, 1][..]));
    /// ```
    #[must_use]
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut adjacency = Self {
            edge_to_faces: HashMap::with_capacity(faces.len() * 3 / 2 + 3),
        };
        for (face_idx, face) in faces.iter().enumerate() {
            adjacency.insert_face(face_idx, *face);
        }
        adjacency
    }

    /// Get faces adjacent to an edge, in either direction.
    ///
    /// Returns `None` if the edge doesn't exist in the mesh.
    #[must_use]
    pub fn faces_for_edge(&self, v0: u32, v1: u32) -> Option<&[usize]> {
        self.edge_to_faces
            .get(&normalize_edge(v0, v1))
            .map(Vec::as_slice)
    }

    /// Iterate over all boundary edges (edges with exactly one adjacent face).
    pub fn boundary_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edge_to_faces
            .iter()
            .filter(|(_, faces)| faces.len() == 1)
            .map(|(&edge, _)| edge)
    }

    /// Count the number of boundary edges.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_to_faces
            .values()
            .filter(|faces| faces.len() == 1)
            .count()
    }

    /// Interior edges (exactly two adjacent faces), sorted.
    #[must_use]
    pub fn interior_edges(&self) -> Vec<(u32, u32)> {
        let mut edges: Vec<_> = self
            .edge_to_faces
            .iter()
            .filter(|(_, faces)| faces.len() == 2)
            .map(|(&edge, _)| edge)
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Iterate over edges shared by more than two faces, with their face count.
    pub fn non_manifold_edges(&self) -> impl Iterator<Item = ((u32, u32), usize)> + '_ {
        self.edge_to_faces
            .iter()
            .filter(|(_, faces)| faces.len() > 2)
            .map(|(&edge, faces)| (edge, faces.len()))
    }

    /// Check if every edge has at most two adjacent faces.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.edge_to_faces.values().all(|faces| faces.len() <= 2)
    }

    /// Get the total number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_to_faces.len()
    }

    /// Per-vertex flags: `true` for endpoints of boundary edges.
    ///
    /// Edge endpoints outside `0..vertex_count` are ignored.
    #[must_use]
    pub fn boundary_vertex_flags(&self, vertex_count: usize) -> Vec<bool> {
        let mut flags = vec![false; vertex_count];
        for (v0, v1) in self.boundary_edges() {
            for v in [v0, v1] {
                if let Some(flag) = flags.get_mut(v as usize) {
                    *flag = true;
                }
            }
        }
        flags
    }

    /// Faces owning at least one boundary edge, sorted and deduplicated.
    #[must_use]
    pub fn boundary_faces(&self) -> Vec<usize> {
        let mut faces: Vec<usize> = self
            .edge_to_faces
            .values()
            .filter(|faces| faces.len() == 1)
            .map(|faces| faces[0])
            .collect();
        faces.sort_unstable();
        faces.dedup();
        faces
    }

    /// Re-register face `face_idx` after its vertices changed from `old` to `new`.
    pub fn replace_face(&mut self, face_idx: usize, old: [u32; 3], new: [u32; 3]) {
        for edge in face_edges(old) {
            if let Some(faces) = self.edge_to_faces.get_mut(&edge) {
                faces.retain(|&f| f != face_idx);
                if faces.is_empty() {
                    self.edge_to_faces.remove(&edge);
                }
            }
        }
        self.insert_face(face_idx, new);
    }

    fn insert_face(&mut self, face_idx: usize, face: [u32; 3]) {
        for edge in face_edges(face) {
            self.edge_to_faces.entry(edge).or_default().push(face_idx);
        }
    }
}

/// The three undirected edges of a face.
#[inline]
pub(crate) fn face_edges(face: [u32; 3]) -> [(u32, u32); 3] {
    [
        normalize_edge(face[0], face[1]),
        normalize_edge(face[1], face[2]),
        normalize_edge(face[2], face[0]),
    ]
}

/// Normalize edge direction so v0 < v1.
#[inline]
pub(crate) fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}
