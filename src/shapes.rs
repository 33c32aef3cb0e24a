// src/shapes.rs

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::terrain::{Mesh, Vec3};

/// Collision data shipped alongside exported geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Collider {
    /// Axis-aligned box fitted to the mesh bounds.
    #[serde(rename = "BoxCollider")]
    Box { center: [f32; 3], size: [f32; 3] },
    /// Full triangle-mesh collider.
    #[serde(rename = "MeshCollider")]
    Mesh {
        convex: bool,
        vertices: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
    },
}

/// Simple prop shapes placed alongside sculpted terrain, modeled as tagged
/// variants over a shared mesh/collider capability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrimitiveShape {
    Rectangle {
        width: f32,
        height: f32,
        depth: f32,
    },
    Circle {
        radius: f32,
        depth: f32,
        segments: u32,
    },
}

impl PrimitiveShape {
    /// A closed triangle mesh for the shape, centered on the origin, with
    /// accumulated vertex normals and default UVs.
    pub fn generate_mesh(&self) -> Mesh {
        let mut mesh = match *self {
            PrimitiveShape::Rectangle {
                width,
                height,
                depth,
            } => box_mesh(width, height, depth),
            PrimitiveShape::Circle {
                radius,
                depth,
                segments,
            } => cylinder_mesh(radius, depth, segments.max(3)),
        };
        mesh.recompute_normals();
        mesh.uvs = vec![[0.0, 0.0]; mesh.vertices.len()];
        mesh
    }

    /// Axis-aligned box collider fitted to the generated mesh.
    pub fn generate_collider(&self) -> Collider {
        let mesh = self.generate_mesh();
        match mesh.bounds() {
            Some((min, max)) => Collider::Box {
                center: [
                    (min.x + max.x) / 2.0,
                    (min.y + max.y) / 2.0,
                    (min.z + max.z) / 2.0,
                ],
                size: [max.x - min.x, max.y - min.y, max.z - min.z],
            },
            None => Collider::Box {
                center: [0.0; 3],
                size: [0.0; 3],
            },
        }
    }
}

fn box_mesh(width: f32, height: f32, depth: f32) -> Mesh {
    let (w, h, d) = (width / 2.0, height / 2.0, depth / 2.0);
    let vertices = vec![
        Vec3::new(-w, -h, -d),
        Vec3::new(w, -h, -d),
        Vec3::new(w, h, -d),
        Vec3::new(-w, h, -d),
        Vec3::new(-w, -h, d),
        Vec3::new(w, -h, d),
        Vec3::new(w, h, d),
        Vec3::new(-w, h, d),
    ];
    // two triangles per face
    let triangles = vec![
        [0, 1, 2],
        [0, 2, 3],
        [4, 7, 6],
        [4, 6, 5],
        [0, 3, 7],
        [0, 7, 4],
        [1, 5, 6],
        [1, 6, 2],
        [3, 2, 6],
        [3, 6, 7],
        [0, 4, 5],
        [0, 5, 1],
    ];
    Mesh {
        vertices,
        triangles,
        ..Mesh::default()
    }
}

fn cylinder_mesh(radius: f32, depth: f32, segments: u32) -> Mesh {
    let mut vertices = Vec::with_capacity(2 + 2 * segments as usize);
    let mut triangles = Vec::with_capacity(4 * segments as usize);

    let top_center = 0u32;
    let bottom_center = 1u32;
    vertices.push(Vec3::new(0.0, 0.0, depth / 2.0));
    vertices.push(Vec3::new(0.0, 0.0, -depth / 2.0));

    for i in 0..segments {
        let angle = TAU * i as f32 / segments as f32;
        let x = radius * angle.cos();
        let y = radius * angle.sin();
        vertices.push(Vec3::new(x, y, depth / 2.0));
        vertices.push(Vec3::new(x, y, -depth / 2.0));

        let top = i * 2 + 2;
        let bottom = i * 2 + 3;
        let next_top = ((i + 1) % segments) * 2 + 2;
        let next_bottom = ((i + 1) % segments) * 2 + 3;

        triangles.push([top_center, top, next_top]);
        triangles.push([bottom_center, next_bottom, bottom]);
        // side quad
        triangles.push([top, bottom, next_bottom]);
        triangles.push([top, next_bottom, next_top]);
    }

    Mesh {
        vertices,
        triangles,
        ..Mesh::default()
    }
}
