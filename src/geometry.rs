//! Vertex data for the two primitives the scene is made of.
//!
//! A *wall* is a unit cube stretched by a non-uniform scale and moved by a
//! translation; it is used for towers, walls, the house, the door and trees.
//! A *plane* is a unit quad in the XY plane, drawn as a triangle strip, used
//! for the ground surfaces.
//!
//! Every builder here is pure: it returns plain arrays which the caller
//! uploads to the GPU. Translation and scale are baked directly into the
//! positions, so two walls with different transforms never share a buffer.

use cgmath::Vector3;

use crate::pipelines::scene::attributes;

/// Number of vertices of a wall (6 faces with 4 corners each).
pub const WALL_VERTEX_COUNT: usize = 24;
/// Number of indices of a wall (2 triangles per face).
pub const WALL_INDEX_COUNT: usize = 36;
/// Number of vertices of a plane strip.
pub const PLANE_VERTEX_COUNT: usize = 4;

/// Describes how the bytes of a vertex type map to shader locations.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// Position and texture coordinate of one wall corner (5 floats).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WallVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

/// Outward normal of one wall corner, uploaded as its own vertex stream.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WallNormal {
    pub normal: [f32; 3],
}

/// Position of one plane corner. Texture coordinates are implied by the
/// corner's position in the strip.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 2],
}

impl Vertex for WallVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<WallVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: attributes::POSITION,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: attributes::TEX_COORDS,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

impl Vertex for WallNormal {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<WallNormal>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: attributes::NORMAL,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

impl Vertex for PlaneVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlaneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: attributes::POSITION,
                format: wgpu::VertexFormat::Float32x2,
            }],
        }
    }
}

/// Faces of a wall in the order their vertices appear in the buffers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Face {
    Top,
    Left,
    Right,
    Front,
    Back,
    Bottom,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Left,
        Face::Right,
        Face::Front,
        Face::Back,
        Face::Bottom,
    ];

    pub fn outward_normal(self) -> [f32; 3] {
        match self {
            Face::Top => [0.0, 1.0, 0.0],
            Face::Left => [-1.0, 0.0, 0.0],
            Face::Right => [1.0, 0.0, 0.0],
            Face::Front => [0.0, 0.0, 1.0],
            Face::Back => [0.0, 0.0, -1.0],
            Face::Bottom => [0.0, -1.0, 0.0],
        }
    }
}

/// Unit cube corners (sign per axis) and their texture coordinates,
/// grouped by face in `Face::ALL` order.
#[rustfmt::skip]
const WALL_CORNERS: [([f32; 3], [f32; 2]); WALL_VERTEX_COUNT] = [
    // Top
    ([-1.0,  1.0, -1.0], [0.0, 0.0]),
    ([-1.0,  1.0,  1.0], [0.0, 1.0]),
    ([ 1.0,  1.0,  1.0], [1.0, 1.0]),
    ([ 1.0,  1.0, -1.0], [1.0, 0.0]),
    // Left
    ([-1.0,  1.0,  1.0], [0.0, 0.0]),
    ([-1.0, -1.0,  1.0], [1.0, 0.0]),
    ([-1.0, -1.0, -1.0], [1.0, 1.0]),
    ([-1.0,  1.0, -1.0], [0.0, 1.0]),
    // Right
    ([ 1.0,  1.0,  1.0], [1.0, 1.0]),
    ([ 1.0, -1.0,  1.0], [0.0, 1.0]),
    ([ 1.0, -1.0, -1.0], [0.0, 0.0]),
    ([ 1.0,  1.0, -1.0], [1.0, 0.0]),
    // Front
    ([ 1.0,  1.0,  1.0], [1.0, 1.0]),
    ([ 1.0, -1.0,  1.0], [1.0, 0.0]),
    ([-1.0, -1.0,  1.0], [0.0, 0.0]),
    ([-1.0,  1.0,  1.0], [0.0, 1.0]),
    // Back
    ([ 1.0,  1.0, -1.0], [0.0, 0.0]),
    ([ 1.0, -1.0, -1.0], [0.0, 1.0]),
    ([-1.0, -1.0, -1.0], [1.0, 1.0]),
    ([-1.0,  1.0, -1.0], [1.0, 0.0]),
    // Bottom
    ([-1.0, -1.0, -1.0], [1.0, 1.0]),
    ([-1.0, -1.0,  1.0], [1.0, 0.0]),
    ([ 1.0, -1.0,  1.0], [0.0, 0.0]),
    ([ 1.0, -1.0, -1.0], [0.0, 1.0]),
];

// The Left, Front and Bottom faces are listed in a different corner order
// than the others; their triangles are wound accordingly so every face is
// counter-clockwise seen from outside.
#[rustfmt::skip]
const WALL_INDICES: [u16; WALL_INDEX_COUNT] = [
    // Top
    0, 1, 2,
    0, 2, 3,
    // Left
    5, 4, 6,
    6, 4, 7,
    // Right
    8, 9, 10,
    8, 10, 11,
    // Front
    13, 12, 14,
    15, 14, 12,
    // Back
    16, 17, 18,
    16, 18, 19,
    // Bottom
    21, 20, 22,
    22, 20, 23,
];

/// Corners of a wall centred on `translation` with half extents `scale`.
pub fn build_wall_vertices(
    translation: Vector3<f32>,
    scale: Vector3<f32>,
) -> [WallVertex; WALL_VERTEX_COUNT] {
    WALL_CORNERS.map(|(sign, tex_coords)| WallVertex {
        position: [
            sign[0] * scale.x + translation.x,
            sign[1] * scale.y + translation.y,
            sign[2] * scale.z + translation.z,
        ],
        tex_coords,
    })
}

/// Per-corner outward normals. They do not depend on the transform because
/// walls are only ever scaled along their own axes.
pub fn build_wall_normals() -> [WallNormal; WALL_VERTEX_COUNT] {
    let mut normals = [WallNormal { normal: [0.0; 3] }; WALL_VERTEX_COUNT];
    for (face_idx, face) in Face::ALL.iter().enumerate() {
        for corner in 0..4 {
            normals[face_idx * 4 + corner].normal = face.outward_normal();
        }
    }
    normals
}

pub fn build_wall_indices() -> [u16; WALL_INDEX_COUNT] {
    WALL_INDICES
}

/// Quad corners in strip order: top-left, top-right, bottom-left, bottom-right.
pub fn build_plane_vertices(
    translation: Vector3<f32>,
    scale: Vector3<f32>,
) -> [PlaneVertex; PLANE_VERTEX_COUNT] {
    let (left, right) = (translation.x - scale.x, translation.x + scale.x);
    let (bottom, top) = (translation.y - scale.y, translation.y + scale.y);
    [
        PlaneVertex { position: [left, top] },
        PlaneVertex { position: [right, top] },
        PlaneVertex { position: [left, bottom] },
        PlaneVertex { position: [right, bottom] },
    ]
}
