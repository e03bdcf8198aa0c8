//! Geometry uploaded once at startup and shared between scene objects.

use std::collections::HashMap;

use wgpu::util::DeviceExt;

use crate::{
    camera::MatrixUniform,
    geometry::{self, WALL_INDEX_COUNT},
    scene::{ObjectKind, SceneObject},
};

/// Identifies geometry that would come out of the factory byte-for-byte
/// identical: same primitive, same translation and same scale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeometryKey {
    kind: ObjectKind,
    translation: [u32; 3],
    scale: [u32; 3],
}

impl GeometryKey {
    pub fn of(obj: &SceneObject) -> Self {
        let t = obj.transform.translation;
        let s = obj.transform.scale;
        Self {
            kind: obj.kind,
            translation: [t.x.to_bits(), t.y.to_bits(), t.z.to_bits()],
            scale: [s.x.to_bits(), s.y.to_bits(), s.z.to_bits()],
        }
    }
}

/// Meshes built once per unique [`GeometryKey`], plus the mesh each scene
/// object uses.
#[derive(Debug)]
pub struct GeometryCache<M> {
    meshes: Vec<M>,
    slots: Vec<usize>,
}

impl<M> GeometryCache<M> {
    pub fn build<F>(scene: &[SceneObject], mut make: F) -> Self
    where
        F: FnMut(&SceneObject) -> M,
    {
        let mut known: HashMap<GeometryKey, usize> = HashMap::new();
        let mut meshes = Vec::new();
        let slots = scene
            .iter()
            .map(|obj| {
                *known.entry(GeometryKey::of(obj)).or_insert_with(|| {
                    meshes.push(make(obj));
                    meshes.len() - 1
                })
            })
            .collect();
        Self { meshes, slots }
    }

    /// Mesh of the scene object at `object`.
    pub fn mesh_for(&self, object: usize) -> Option<&M> {
        self.slots.get(object).and_then(|slot| self.meshes.get(*slot))
    }

    pub fn unique_meshes(&self) -> usize {
        self.meshes.len()
    }
}

/// Vertex data of one primitive instance on the GPU.
#[derive(Debug)]
pub enum GpuMesh {
    Wall {
        vertex_buffer: wgpu::Buffer,
        normal_buffer: wgpu::Buffer,
        index_buffer: wgpu::Buffer,
        num_elements: u32,
    },
    Plane {
        vertex_buffer: wgpu::Buffer,
        num_vertices: u32,
    },
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, obj: &SceneObject) -> Self {
        let transform = obj.transform;
        match obj.kind {
            ObjectKind::Wall => {
                let vertices = geometry::build_wall_vertices(transform.translation, transform.scale);
                let normals = geometry::build_wall_normals();
                let indices = geometry::build_wall_indices();
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Vertex Buffer", obj.name)),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let normal_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Normal Buffer", obj.name)),
                    contents: bytemuck::cast_slice(&normals),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Index Buffer", obj.name)),
                    contents: bytemuck::cast_slice(&indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                GpuMesh::Wall {
                    vertex_buffer,
                    normal_buffer,
                    index_buffer,
                    num_elements: WALL_INDEX_COUNT as u32,
                }
            }
            ObjectKind::Plane => {
                let vertices = geometry::build_plane_vertices(transform.translation, transform.scale);
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Vertex Buffer", obj.name)),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                GpuMesh::Plane {
                    vertex_buffer,
                    num_vertices: vertices.len() as u32,
                }
            }
        }
    }
}

/// The world matrix uniform of a single scene object. Every object owns one
/// so that writing a rotated matrix can never affect another draw.
#[derive(Debug)]
pub struct WorldUniform {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl WorldUniform {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, name: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} World Buffer", name)),
            contents: bytemuck::cast_slice(&[MatrixUniform::identity()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(&format!("{} world_bind_group", name)),
        });
        Self { buffer, bind_group }
    }
}
