use crate::constants::{
    CLEAR_COLOR, GLOBE_COLOR, GLOBE_HEIGHT_SEGMENTS, GLOBE_WIDTH_SEGMENTS, INITIAL_LINE_VERTICES,
};
use globe_core::{Camera, GLOBE_RADIUS, GLOBE_WGSL};
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
pub mod mesh;

use helpers::PipelineSpec;
pub use mesh::Vertex;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
}

impl SceneUniforms {
    fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    #[allow(dead_code)]
    depth_texture: wgpu::Texture, // owns the storage behind depth_view
    depth_view: wgpu::TextureView,

    globe_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    globe_vertices: wgpu::Buffer,
    globe_indices: wgpu::Buffer,
    globe_index_count: u32,

    // Overlay lines are rebuilt every frame
    line_buffer: wgpu::Buffer,
    line_capacity: usize,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no texture formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);

        let (depth_texture, depth_view) = helpers::create_depth_texture(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("globe_wgsl"),
            source: wgpu::ShaderSource::Wgsl(GLOBE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_layout"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let globe_pipeline = helpers::make_scene_pipeline(
            &device,
            &layout,
            &shader,
            format,
            PipelineSpec {
                label: "globe_pipeline",
                frag_entry: "fs_globe",
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                blend: None,
                depth_write: true,
            },
        );
        let line_pipeline = helpers::make_scene_pipeline(
            &device,
            &layout,
            &shader,
            format,
            PipelineSpec {
                label: "line_pipeline",
                frag_entry: "fs_line",
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth_write: false,
            },
        );

        let (sphere_vertices, sphere_indices) = mesh::sphere(
            GLOBE_RADIUS,
            GLOBE_WIDTH_SEGMENTS,
            GLOBE_HEIGHT_SEGMENTS,
            GLOBE_COLOR,
        );
        let globe_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globe_vertices"),
            contents: bytemuck::cast_slice(&sphere_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let globe_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globe_indices"),
            contents: bytemuck::cast_slice(&sphere_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let line_capacity = INITIAL_LINE_VERTICES;
        let line_buffer = create_line_buffer(&device, line_capacity);

        let [r, g, b, a] = CLEAR_COLOR;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_texture,
            depth_view,
            globe_pipeline,
            line_pipeline,
            uniform_buffer,
            bind_group,
            globe_vertices,
            globe_indices,
            globe_index_count: sphere_indices.len() as u32,
            line_buffer,
            line_capacity,
            width,
            height,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        let (tex, view) = helpers::create_depth_texture(&self.device, width, height);
        self.depth_texture = tex;
        self.depth_view = view;
        log::debug!("[gpu] resized to {}x{}", width, height);
    }

    /// Reapply the current configuration after a lost or outdated surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn upload_lines(&mut self, lines: &[Vertex]) {
        if lines.len() > self.line_capacity {
            let grown = lines.len().next_power_of_two();
            log::debug!("[gpu] line buffer {} -> {} vertices", self.line_capacity, grown);
            self.line_buffer = create_line_buffer(&self.device, grown);
            self.line_capacity = grown;
        }
        if !lines.is_empty() {
            self.queue
                .write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(lines));
        }
    }

    pub fn render(&mut self, camera: &Camera, lines: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let uniforms = SceneUniforms::from_camera(camera);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        self.upload_lines(lines);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_bind_group(0, &self.bind_group, &[]);

            pass.set_pipeline(&self.globe_pipeline);
            pass.set_vertex_buffer(0, self.globe_vertices.slice(..));
            pass.set_index_buffer(self.globe_indices.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.globe_index_count, 0, 0..1);

            if !lines.is_empty() {
                let bytes = (lines.len() * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress;
                pass.set_pipeline(&self.line_pipeline);
                pass.set_vertex_buffer(0, self.line_buffer.slice(..bytes));
                pass.draw(0..lines.len() as u32, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_line_buffer(device: &wgpu::Device, vertices: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("overlay_lines"),
        size: (vertices * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
