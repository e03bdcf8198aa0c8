//! The per-frame driver.
//!
//! [`FrameRenderer`] owns the scene table and, once setup has succeeded, the
//! GPU resources built from it. Every frame it turns the host's clock into a
//! [`FramePlan`], writes the plan's matrices into their uniforms and records
//! one draw per scene object into a single render pass.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --setup ok--> Ready --first frame--> Rendering --close--> Stopped
//!                                                      ^    |
//!                                                      +----+ every frame
//! ```

use std::iter;

use crate::{
    camera::MatrixUniform,
    config::RenderSettings,
    context::Context,
    data_structures::mesh::{GeometryCache, GpuMesh, WorldUniform},
    error::SetupError,
    frame::FramePlan,
    pipelines::scene::{
        FRAGMENT_SHADER, PROJECTION, ScenePipelines, TEXTURE_GROUP, VERTEX_SHADER, VIEW, WORLD,
        setup_scene_pipelines,
    },
    resources::texture::{
        ImageSource, SceneTexture, TextureError, TextureSet, bind_textures, upload_scene_texture,
    },
    scene::{Material, SceneObject},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RendererState {
    Uninitialized,
    Ready,
    Rendering,
    Stopped,
}

impl RendererState {
    /// State after setup completed successfully.
    pub fn on_setup(self) -> Self {
        match self {
            RendererState::Uninitialized => RendererState::Ready,
            other => other,
        }
    }

    /// State while drawing a frame, or `None` if frames are not accepted.
    pub fn on_frame(self) -> Option<Self> {
        match self {
            RendererState::Ready | RendererState::Rendering => Some(RendererState::Rendering),
            RendererState::Uninitialized | RendererState::Stopped => None,
        }
    }

    pub fn on_stop(self) -> Self {
        RendererState::Stopped
    }

    /// Whether a frame callback should be requested after the current one.
    pub fn schedules_next_frame(self) -> bool {
        self == RendererState::Rendering
    }
}

/// GPU resources created once and reused by every frame.
#[derive(Debug)]
pub struct SceneResources {
    pipelines: ScenePipelines,
    view_buffer: wgpu::Buffer,
    projection_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    textures: TextureSet<SceneTexture>,
    geometry: GeometryCache<GpuMesh>,
    worlds: Vec<WorldUniform>,
}

impl SceneResources {
    /// Builds the program and uploads everything the frames draw with.
    /// `color_format` is the format of the targets frames are rendered into.
    pub async fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        scene: &[SceneObject],
        sources: &[ImageSource],
    ) -> Result<Self, SetupError> {
        let pipelines =
            setup_scene_pipelines(device, color_format, VERTEX_SHADER, FRAGMENT_SHADER).await?;

        let textures = bind_textures(sources, |source| {
            upload_scene_texture(device, queue, &pipelines.texture_layout, source)
        })?;
        for material in Material::ALL {
            if textures.index_of(material.id()) != Some(material.index()) {
                return Err(TextureError::Missing(material.id().to_string()).into());
            }
        }

        let view_buffer = uniform_buffer(device, "View Buffer");
        let projection_buffer = uniform_buffer(device, "Projection Buffer");
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &pipelines.camera_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: VIEW.binding,
                    resource: view_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: PROJECTION.binding,
                    resource: projection_buffer.as_entire_binding(),
                },
            ],
            label: Some("camera_bind_group"),
        });

        let geometry = GeometryCache::build(scene, |obj| GpuMesh::upload(device, obj));
        let worlds = scene
            .iter()
            .map(|obj| WorldUniform::new(device, &pipelines.world_layout, obj.name))
            .collect();
        log::info!(
            "Uploaded {} objects sharing {} meshes and {} textures",
            scene.len(),
            geometry.unique_meshes(),
            textures.len()
        );

        Ok(Self {
            pipelines,
            view_buffer,
            projection_buffer,
            camera_bind_group,
            textures,
            geometry,
            worlds,
        })
    }

    pub fn textures(&self) -> &TextureSet<SceneTexture> {
        &self.textures
    }

    pub fn geometry(&self) -> &GeometryCache<GpuMesh> {
        &self.geometry
    }

    /// Writes the plan's view, projection and per-object world matrices.
    pub fn write_uniforms(&self, queue: &wgpu::Queue, plan: &FramePlan) {
        queue.write_buffer(
            &self.view_buffer,
            0,
            bytemuck::cast_slice(&[MatrixUniform::from(plan.camera.view_matrix())]),
        );
        queue.write_buffer(
            &self.projection_buffer,
            0,
            bytemuck::cast_slice(&[MatrixUniform::from(plan.camera.projection_matrix())]),
        );
        for draw in &plan.draws {
            queue.write_buffer(
                &self.worlds[draw.object].buffer,
                0,
                bytemuck::cast_slice(&[MatrixUniform::from(draw.world)]),
            );
        }
    }

    /// Records one render pass into `color` and `depth`: clear, then one draw
    /// per object of `plan` in order.
    pub fn encode_frame(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        plan: &FramePlan,
        clear_colour: wgpu::Color,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_colour),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
            multiview_mask: None,
        });

        render_pass.set_bind_group(VIEW.group, &self.camera_bind_group, &[]);
        for draw in &plan.draws {
            let (Some(mesh), Some(texture), Some(world)) = (
                self.geometry.mesh_for(draw.object),
                self.textures.get(draw.material.index()),
                self.worlds.get(draw.object),
            ) else {
                log::warn!("Scene object {} has no GPU resources, skipping", draw.object);
                continue;
            };
            render_pass.set_bind_group(WORLD.group, &world.bind_group, &[]);
            render_pass.set_bind_group(TEXTURE_GROUP, &texture.bind_group, &[]);
            match mesh {
                GpuMesh::Wall {
                    vertex_buffer,
                    normal_buffer,
                    index_buffer,
                    num_elements,
                } => {
                    render_pass.set_pipeline(&self.pipelines.wall);
                    render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                    render_pass.set_vertex_buffer(1, normal_buffer.slice(..));
                    render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                    render_pass.draw_indexed(0..*num_elements, 0, 0..1);
                }
                GpuMesh::Plane {
                    vertex_buffer,
                    num_vertices,
                } => {
                    render_pass.set_pipeline(&self.pipelines.plane);
                    render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                    render_pass.draw(0..*num_vertices, 0..1);
                }
            }
        }
    }
}

fn uniform_buffer(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    use wgpu::util::DeviceExt;
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&[MatrixUniform::identity()]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

#[derive(Debug)]
pub struct FrameRenderer {
    state: RendererState,
    scene: Vec<SceneObject>,
    settings: RenderSettings,
    resources: Option<SceneResources>,
}

impl FrameRenderer {
    pub fn new(scene: Vec<SceneObject>, settings: RenderSettings) -> Self {
        Self {
            state: RendererState::Uninitialized,
            scene,
            settings,
            resources: None,
        }
    }

    pub fn state(&self) -> RendererState {
        self.state
    }

    pub fn scene(&self) -> &[SceneObject] {
        &self.scene
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn ready(&mut self, resources: SceneResources) {
        self.resources = Some(resources);
        self.state = self.state.on_setup();
    }

    pub fn stop(&mut self) {
        self.state = self.state.on_stop();
    }

    pub fn plan(&self, time_ms: f64, aspect: f32) -> FramePlan {
        FramePlan::new(&self.scene, time_ms, aspect, &self.settings)
    }

    /// Draws one frame. Returns whether the next frame should be requested.
    pub fn render(&mut self, ctx: &Context, time_ms: f64) -> Result<bool, wgpu::SurfaceError> {
        let Some(next) = self.state.on_frame() else {
            return Ok(false);
        };
        let Some(res) = &self.resources else {
            return Ok(false);
        };
        let plan = FramePlan::new(&self.scene, time_ms, ctx.aspect(), &self.settings);
        res.write_uniforms(&ctx.queue, &plan);

        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        res.encode_frame(
            &mut encoder,
            &view,
            &ctx.depth_texture.view,
            &plan,
            self.settings.clear_colour,
        );

        ctx.queue.submit(iter::once(encoder.finish()));
        output.present();

        self.state = next;
        Ok(self.state.schedules_next_frame())
    }
}
