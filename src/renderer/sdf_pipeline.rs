//! SDF-based WebGPU render pipeline
//!
//! Circles queued between `clear` and `present` are uploaded as one uniform
//! array and shaded in a single fullscreen pass.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use wgpu::util::DeviceExt;

use super::{DrawSurface, RenderError};
use crate::consts::MAX_CIRCLES;
use crate::palette::FillColor;

/// Background the viewport is cleared to
const CLEAR_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    resolution: [f32; 2],   // offset 0
    logical_size: [f32; 2], // offset 8
    clear_color: [f32; 4],  // offset 16
    circle_count: u32,      // offset 32
    _pad: [u32; 3],         // pad to 48 bytes
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct CircleData {
    center: [f32; 2],
    radius: f32,
    _pad: f32,
    color: [f32; 4],
}

// ============================================================================
// SDF RENDER STATE
// ============================================================================

pub struct SdfRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,

    globals_buffer: wgpu::Buffer,
    circles_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    /// Physical surface size
    pub size: (u32, u32),
    /// Canvas-pixel size the simulation works in
    logical_size: Vec2,

    /// Circles queued for the current frame
    circles: Vec<CircleData>,
}

impl SdfRenderState {
    /// Returns `None` when no device can be created for the surface.
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        logical_size: Vec2,
    ) -> Option<Self> {
        let (device, queue) = match adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sdf-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
        {
            Ok(pair) => pair,
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return None;
            }
        };

        let surface_caps = surface.get_capabilities(adapter);
        log::debug!("Surface formats: {:?}", surface_caps.formats);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())?;
        let alpha_mode = surface_caps.alpha_modes.first().copied()?;

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sdf_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("sdf_shader.wgsl").into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Globals {
                resolution: [width as f32, height as f32],
                logical_size: logical_size.to_array(),
                clear_color: CLEAR_COLOR,
                circle_count: 0,
                _pad: [0; 3],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let circles_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("circles"),
            size: (std::mem::size_of::<CircleData>() * MAX_CIRCLES) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sdf_bind_group_layout"),
            entries: &[uniform_entry(0), uniform_entry(1)],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sdf_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: circles_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sdf_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sdf_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[], // No vertex buffers - fullscreen triangle
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Some(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            circles_buffer,
            bind_group,
            size: (width, height),
            logical_size,
            circles: Vec::with_capacity(MAX_CIRCLES),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Recover from a failed frame where possible
    pub fn handle_error(&mut self, err: &RenderError) {
        match err {
            RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.resize(self.size.0, self.size.1);
            }
            RenderError::Surface(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            RenderError::Surface(e) => log::warn!("Render error: {:?}", e),
        }
    }

    /// Draw the queued circles
    fn draw_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let circle_count = self.circles.len().min(MAX_CIRCLES);

        let globals = Globals {
            resolution: [self.size.0 as f32, self.size.1 as f32],
            logical_size: self.logical_size.to_array(),
            clear_color: CLEAR_COLOR,
            circle_count: circle_count as u32,
            _pad: [0; 3],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let mut circles_data = [CircleData::zeroed(); MAX_CIRCLES];
        circles_data[..circle_count].copy_from_slice(&self.circles[..circle_count]);
        self.queue
            .write_buffer(&self.circles_buffer, 0, bytemuck::cast_slice(&circles_data));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sdf_encoder"),
            });

        {
            let [r, g, b, a] = CLEAR_COLOR;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sdf_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl DrawSurface for SdfRenderState {
    fn clear(&mut self) {
        self.circles.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: FillColor) {
        if self.circles.len() >= MAX_CIRCLES {
            log::debug!("Circle limit ({}) reached, dropping draw", MAX_CIRCLES);
            return;
        }
        self.circles.push(CircleData {
            center: center.to_array(),
            radius,
            _pad: 0.0,
            color: color.rgba(),
        });
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.draw_frame().map_err(RenderError::from)
    }
}
