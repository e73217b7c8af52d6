//! Vertex normal computation.
//!
//! Area-weighted: each triangle's unnormalized face normal (length equal
//! to twice its area) is added to its three vertices, then every vertex
//! normal is normalized.

use glam::Vec3;

use crate::surface::SurfaceMesh;

/// Recomputes the surface's vertex normals from its current positions.
///
/// Vertices touched only by degenerate triangles keep a zero normal.
pub fn compute_vertex_normals(mesh: &mut SurfaceMesh) {
    let mut accum = vec![Vec3::ZERO; mesh.vertex_count()];

    for t in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(t).map(|i| i as usize);
        let pa = mesh.position(a);
        let face = (mesh.position(b) - pa).cross(mesh.position(c) - pa);
        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }

    for (i, n) in accum.into_iter().enumerate() {
        mesh.set_normal(i, n.normalize_or_zero());
    }
}
