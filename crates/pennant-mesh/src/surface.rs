//! Render-side surface mesh with SoA (Structure of Arrays) layout.
//!
//! This is the buffer the renderer owns: vertex positions copied from the
//! cloth each frame, per-vertex normals recomputed from them, and a fixed
//! triangle list. The simulator reads the normals from here to apply wind,
//! so the wind in step `n` always sees the shape produced by step `n - 1`.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use pennant_types::{PennantError, PennantResult};

use crate::cloth::ClothMesh;
use crate::normals::compute_vertex_normals;

/// A triangle mesh stored in Structure-of-Arrays layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceMesh {
    // --- Vertex data (SoA) ---
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    pub normal_x: Vec<f32>,
    pub normal_y: Vec<f32>,
    pub normal_z: Vec<f32>,

    pub uv_u: Vec<f32>,
    pub uv_v: Vec<f32>,

    // --- Triangle data ---
    /// Flat triangle indices: `[t0v0, t0v1, t0v2, t1v0, ...]`.
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            normal_x: Vec::with_capacity(vertex_capacity),
            normal_y: Vec::with_capacity(vertex_capacity),
            normal_z: Vec::with_capacity(vertex_capacity),
            uv_u: Vec::with_capacity(vertex_capacity),
            uv_v: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Triangulates the cloth grid, two triangles per cell.
    ///
    /// Vertex `i` of the surface is particle `i` of the cloth. For the cell
    /// with corners `a=(u,v)`, `b=(u+1,v)`, `c=(u+1,v+1)`, `d=(u,v+1)` the
    /// triangles are `(a, b, d)` and `(b, c, d)`. Normals are computed
    /// from the initial positions.
    pub fn from_cloth(cloth: &ClothMesh) -> Self {
        let n = cloth.particle_count();
        let (w, h) = (cloth.width(), cloth.height());
        let mut mesh = Self::with_capacity(n, (w * h * 2) as usize);

        for p in cloth.particles() {
            mesh.pos_x.push(p.position.x);
            mesh.pos_y.push(p.position.y);
            mesh.pos_z.push(p.position.z);
            let [u, v] = p.uv();
            mesh.uv_u.push(u);
            mesh.uv_v.push(v);
        }
        mesh.normal_x.resize(n, 0.0);
        mesh.normal_y.resize(n, 0.0);
        mesh.normal_z.resize(n, 0.0);

        let row = w + 1;
        for v in 0..h {
            for u in 0..w {
                let a = v * row + u;
                let b = a + 1;
                let d = a + row;
                let c = d + 1;
                mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        compute_vertex_normals(&mut mesh);
        mesh
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    #[inline]
    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::new(self.normal_x[i], self.normal_y[i], self.normal_z[i])
    }

    #[inline]
    pub fn set_normal(&mut self, i: usize, n: Vec3) {
        self.normal_x[i] = n.x;
        self.normal_y[i] = n.y;
        self.normal_z[i] = n.z;
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Copies the cloth's current positions into the vertex buffer.
    ///
    /// Normals are left as they were; call
    /// [`compute_vertex_normals`] afterwards to refresh them.
    pub fn sync_positions(&mut self, cloth: &ClothMesh) -> PennantResult<()> {
        if cloth.particle_count() != self.vertex_count() {
            return Err(PennantError::InvalidMesh(format!(
                "surface has {} vertices but cloth has {} particles",
                self.vertex_count(),
                cloth.particle_count()
            )));
        }
        for (i, p) in cloth.particles().iter().enumerate() {
            self.pos_x[i] = p.position.x;
            self.pos_y[i] = p.position.y;
            self.pos_z[i] = p.position.z;
        }
        Ok(())
    }

    /// Validates mesh integrity.
    ///
    /// Checks that every SoA channel has the same length, that the index
    /// buffer holds whole triangles within bounds, and that no triangle
    /// repeats a vertex.
    pub fn validate(&self) -> PennantResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(PennantError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }
        if self.normal_x.len() != n || self.normal_y.len() != n || self.normal_z.len() != n {
            return Err(PennantError::InvalidMesh(
                "Normal arrays have inconsistent lengths".into(),
            ));
        }
        if self.uv_u.len() != n || self.uv_v.len() != n {
            return Err(PennantError::InvalidMesh(
                "UV arrays have inconsistent lengths".into(),
            ));
        }
        if self.indices.len() % 3 != 0 {
            return Err(PennantError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }
        if let Some(i) = self.indices.iter().position(|&idx| idx as usize >= n) {
            return Err(PennantError::InvalidMesh(format!(
                "Index {} at position {i} is out of range (vertex count: {n})",
                self.indices[i]
            )));
        }
        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(PennantError::InvalidMesh(format!(
                    "Triangle {t} has repeated vertex indices: [{a}, {b}, {c}]"
                )));
            }
        }
        Ok(())
    }
}
