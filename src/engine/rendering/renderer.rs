//! Owns the [`State`] and the single mesh pipeline, and turns a [`Scene`] into a frame.

use crate::rendering::error::*;
use crate::rendering::{DEPTH_FORMAT, Globals, GpuTexture, InstanceRaw, State, Vertex, unit_cube};
use crate::scene::{Scene, TextureKey};
use crate::utils::{srgb_channel_to_linear, srgb_to_linear};
use itertools::Itertools;
use log::{debug, warn};
use nalgebra::Vector4;
use std::collections::HashMap;
use std::sync::Arc;
use wgpu::util::{BufferInitDescriptor, DeviceExt};
use wgpu::*;
use winit::dpi::PhysicalSize;
use winit::window::Window;

const INITIAL_INSTANCE_CAPACITY: usize = 64;

pub struct Renderer {
    pub state: State,
    window: Arc<Window>,
    pipeline: RenderPipeline,
    globals_buffer: Buffer,
    globals_bind_group: BindGroup,
    texture_layout: BindGroupLayout,
    white_texture: GpuTexture,
    textures: HashMap<TextureKey, GpuTexture>,
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    index_count: u32,
    instance_buffer: Buffer,
    instance_capacity: usize,
    instances: Vec<InstanceRaw>,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let state = State::new(window.clone()).await?;
        let device = &state.device;

        let globals_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Globals Layout"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX_FRAGMENT,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let texture_layout = GpuTexture::bind_group_layout(device);

        let globals_buffer = device.create_buffer(&BufferDescriptor {
            label: Some("Globals Buffer"),
            size: size_of::<Globals>() as BufferAddress,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &globals_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let pipeline = Self::create_pipeline(
            device,
            state.config.format,
            &[&globals_layout, &texture_layout],
        );

        let (vertices, indices) = unit_cube();
        let vertex_buffer = device.create_buffer_init(&BufferInitDescriptor {
            label: Some("Cube Vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&BufferInitDescriptor {
            label: Some("Cube Indices"),
            contents: bytemuck::cast_slice(&indices),
            usage: BufferUsages::INDEX,
        });

        let instance_buffer = Self::create_instance_buffer(device, INITIAL_INSTANCE_CAPACITY);
        let white_texture = GpuTexture::white(device, &state.queue, &texture_layout);

        Ok(Renderer {
            state,
            window,
            pipeline,
            globals_buffer,
            globals_bind_group,
            texture_layout,
            white_texture,
            textures: HashMap::new(),
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            instances: Vec::new(),
        })
    }

    fn create_pipeline(
        device: &Device,
        format: TextureFormat,
        bind_group_layouts: &[&BindGroupLayout],
    ) -> RenderPipeline {
        let shader = device.create_shader_module(include_wgsl!("shaders/mesh.wgsl"));
        let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("Mesh Pipeline"),
            layout: Some(&layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: PipelineCompilationOptions::default(),
                buffers: &[Vertex::layout(), InstanceRaw::layout()],
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: PipelineCompilationOptions::default(),
                targets: &[Some(ColorTargetState {
                    format,
                    blend: Some(BlendState::REPLACE),
                    write_mask: ColorWrites::ALL,
                })],
            }),
            primitive: PrimitiveState {
                cull_mode: Some(Face::Back),
                ..PrimitiveState::default()
            },
            depth_stencil: Some(DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: CompareFunction::Less,
                stencil: StencilState::default(),
                bias: DepthBiasState::default(),
            }),
            multisample: MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_instance_buffer(device: &Device, capacity: usize) -> Buffer {
        device.create_buffer(&BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (capacity * size_of::<InstanceRaw>()) as BufferAddress,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.state.resize(new_size);
    }

    /// Draws one frame. A lost or outdated surface is reconfigured and the frame skipped,
    /// running out of memory is fatal.
    pub fn render(&mut self, scene: &Scene) -> Result<()> {
        let output = match self.state.surface.get_current_texture() {
            Ok(output) => output,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                debug!("Surface lost, reconfiguring");
                self.state.reconfigure();
                return Ok(());
            }
            Err(SurfaceError::OutOfMemory) => return OutOfMemoryErr.fail(),
            Err(e) => {
                warn!("Dropped a frame: {e}");
                return Ok(());
            }
        };

        self.upload_textures(scene);
        self.write_globals(scene);
        let batches = self.prepare_instances(scene);

        let view = output
            .texture
            .create_view(&TextureViewDescriptor::default());
        let mut encoder = self
            .state
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        {
            let background = scene.background.map(srgb_channel_to_linear);
            let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(Color {
                            r: background.x as f64,
                            g: background.y as f64,
                            b: background.z as f64,
                            a: 1.0,
                        }),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                    view: self.state.depth_view(),
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..RenderPassDescriptor::default()
            });

            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            rpass.set_index_buffer(self.index_buffer.slice(..), IndexFormat::Uint16);

            for (texture, range) in batches {
                let texture = texture
                    .and_then(|key| self.textures.get(&key))
                    .unwrap_or(&self.white_texture);
                rpass.set_bind_group(1, &texture.bind_group, &[]);
                rpass.draw_indexed(0..self.index_count, 0, range);
            }
        }

        self.state.queue.submit(Some(encoder.finish()));
        output.present();

        Ok(())
    }

    fn upload_textures(&mut self, scene: &Scene) {
        for (key, data) in scene.textures() {
            if self.textures.contains_key(&key) {
                continue;
            }

            debug!("Uploading texture {}", data.name);
            let texture = GpuTexture::from_image(
                &self.state.device,
                &self.state.queue,
                &self.texture_layout,
                &data.name,
                &data.image,
            );
            self.textures.insert(key, texture);
        }
    }

    fn write_globals(&self, scene: &Scene) {
        let camera = &scene.camera;
        let sun = &scene.sun;
        let ambient = &scene.ambient;

        let globals = Globals {
            view_proj: camera.view_projection(),
            camera_pos: camera.eye().to_homogeneous(),
            light_dir: (-sun.direction()).push(0.0),
            light_color: (srgb_to_linear(&sun.color) * sun.intensity).push(1.0),
            ambient: (srgb_to_linear(&ambient.color) * ambient.intensity).push(1.0),
        };

        self.state
            .queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
    }

    /// Fills the instance buffer grouped by diffuse texture and returns the instance
    /// range of every group.
    fn prepare_instances(&mut self, scene: &Scene) -> Vec<(Option<TextureKey>, std::ops::Range<u32>)> {
        let mut meshes: Vec<_> = scene.meshes().map(|(_, mesh)| mesh).collect();
        meshes.sort_by_key(|mesh| mesh.material.diffuse_texture);

        self.instances.clear();
        let mut batches = Vec::new();
        for (texture, group) in &meshes.iter().chunk_by(|mesh| mesh.material.diffuse_texture) {
            let start = self.instances.len() as u32;
            self.instances.extend(group.map(|mesh| {
                let material = &mesh.material;
                InstanceRaw {
                    model: mesh.model_matrix(),
                    color: srgb_to_linear(&material.color).push(1.0),
                    params: Vector4::new(
                        material.texture_repeat.x,
                        material.texture_repeat.y,
                        material.shininess,
                        0.0,
                    ),
                }
            }));
            batches.push((texture, start..self.instances.len() as u32));
        }

        if self.instances.len() > self.instance_capacity {
            self.instance_capacity = self.instances.len().next_power_of_two();
            self.instance_buffer =
                Self::create_instance_buffer(&self.state.device, self.instance_capacity);
        }

        if !self.instances.is_empty() {
            self.state.queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&self.instances),
            );
        }

        batches
    }
}
