use crate::dom;
use anyhow::anyhow;
use landing_core::{GradientMap, RenderStatus, Scene, SceneRenderer, Viewport};
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
mod meshes;

use helpers::PipelineSpec;
use meshes::GpuMesh;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    light: [f32; 4],
    viewport: [f32; 4],
    particle_color: [f32; 4],
}

pub struct GpuState {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    #[allow(dead_code)]
    depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,

    globals_buffer: wgpu::Buffer,
    globals_bgl: wgpu::BindGroupLayout,
    globals_bind_group: wgpu::BindGroup,
    #[allow(dead_code)]
    gradient_tex: wgpu::Texture,
    gradient_view: wgpu::TextureView,
    gradient_sampler: wgpu::Sampler,

    wire_pipeline: wgpu::RenderPipeline,
    model_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,

    // one per section mesh, same order as `Scene::meshes`
    meshes: Vec<GpuMesh>,
    model: Option<GpuMesh>,
    particle_buffer: wgpu::Buffer,
    particle_count: u32,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, scene: &Scene) -> anyhow::Result<Self> {
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
            .ok_or_else(|| anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow!(format!("request_device error: {:?}", e)))?;
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
            .ok_or_else(|| anyhow!("surface reports no formats"))?;
        // transparent canvas over the page
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
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
        log::info!(
            "[gpu] {}x{} format={:?} alpha={:?}",
            width,
            height,
            format,
            alpha_mode
        );

        let (depth_tex, depth_view) = helpers::create_depth_texture(&device, width, height);

        let gradient = GradientMap::default();
        let (gradient_tex, gradient_view) =
            helpers::create_gradient_texture(&device, &queue, &gradient);
        let gradient_sampler = helpers::create_gradient_sampler(&device, gradient.filter);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(landing_core::SCENE_WGSL.into()),
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    // gradient
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = create_globals_bind_group(
            &device,
            &globals_bgl,
            &globals_buffer,
            &gradient_view,
            &gradient_sampler,
        );
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });

        let mesh_buffers = [meshes::vertex_layout(), meshes::instance_layout()];
        let wire_pipeline = helpers::make_scene_pipeline(
            &device,
            &layout,
            &shader,
            format,
            &PipelineSpec {
                label: "wire_pipeline",
                vs_entry: "vs_mesh",
                fs_entry: "fs_toon",
                buffers: &mesh_buffers,
                topology: wgpu::PrimitiveTopology::LineList,
            },
        );
        let model_pipeline = helpers::make_scene_pipeline(
            &device,
            &layout,
            &shader,
            format,
            &PipelineSpec {
                label: "model_pipeline",
                vs_entry: "vs_mesh",
                fs_entry: "fs_model",
                buffers: &mesh_buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );
        let particle_pipeline = helpers::make_scene_pipeline(
            &device,
            &layout,
            &shader,
            format,
            &PipelineSpec {
                label: "particle_pipeline",
                vs_entry: "vs_particle",
                fs_entry: "fs_particle",
                buffers: &[meshes::particle_layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );

        let meshes = scene
            .meshes
            .iter()
            .map(|mesh| {
                let data = mesh.kind.build();
                GpuMesh::new(
                    &device,
                    mesh.kind.name(),
                    &data.vertices(scene.material.color),
                    &data.wireframe_indices(),
                    mesh.transform.matrix(),
                )
            })
            .collect::<Vec<_>>();

        let particle_positions: Vec<[f32; 3]> = scene
            .particles
            .positions()
            .iter()
            .map(|p| p.to_array())
            .collect();
        let particle_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particles"),
            contents: bytemuck::cast_slice(&particle_positions),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self {
            canvas: canvas.clone(),
            surface,
            device,
            queue,
            config,
            depth_tex,
            depth_view,
            globals_buffer,
            globals_bgl,
            globals_bind_group,
            gradient_tex,
            gradient_view,
            gradient_sampler,
            wire_pipeline,
            model_pipeline,
            particle_pipeline,
            meshes,
            model: None,
            particle_buffer,
            particle_count: particle_positions.len() as u32,
            width,
            height,
            clear_color: wgpu::Color::TRANSPARENT,
        })
    }

    /// Replace the toon gradient; takes effect on the next frame.
    pub fn set_gradient(&mut self, map: &GradientMap) {
        let (tex, view) = helpers::create_gradient_texture(&self.device, &self.queue, map);
        self.gradient_tex = tex;
        self.gradient_view = view;
        self.gradient_sampler = helpers::create_gradient_sampler(&self.device, map.filter);
        self.globals_bind_group = create_globals_bind_group(
            &self.device,
            &self.globals_bgl,
            &self.globals_buffer,
            &self.gradient_view,
            &self.gradient_sampler,
        );
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            (self.depth_tex, self.depth_view) =
                helpers::create_depth_texture(&self.device, width, height);
        }
    }

    fn upload_model(&mut self, scene: &Scene) {
        if self.model.is_some() {
            return;
        }
        if let Some(placed) = scene.model() {
            self.model = Some(GpuMesh::new(
                &self.device,
                "model",
                &placed.asset.vertices,
                &placed.asset.indices,
                placed.transform.matrix(),
            ));
            log::info!(
                "[gpu] model uploaded, {} vertices",
                placed.asset.vertices.len()
            );
        }
    }

    fn write_globals(&self, scene: &Scene) {
        let light = scene.light.direction().extend(scene.light.intensity);
        let globals = Globals {
            view_proj: scene.rig.view_projection().to_cols_array_2d(),
            view: scene.rig.view_matrix().to_cols_array_2d(),
            light: light.to_array(),
            viewport: [
                self.width as f32,
                self.height as f32,
                scene.particles.size,
                0.0,
            ],
            particle_color: scene.particles.color,
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
    }
}

impl SceneRenderer for GpuState {
    fn resize(&mut self, viewport: &Viewport) {
        dom::sync_canvas_backing_size(&self.canvas, viewport);
        let (w, h) = viewport.physical_size();
        self.resize_if_needed(w, h);
    }

    fn render(&mut self, scene: &Scene) -> anyhow::Result<RenderStatus> {
        self.upload_model(scene);
        self.write_globals(scene);
        for (gpu_mesh, mesh) in self.meshes.iter().zip(&scene.meshes) {
            gpu_mesh.write_model(&self.queue, mesh.transform.matrix());
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(RenderStatus::Skipped);
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(RenderStatus::Skipped),
            Err(e) => return Err(anyhow!("surface error: {:?}", e)),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
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
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);

            rpass.set_pipeline(&self.wire_pipeline);
            for mesh in &self.meshes {
                mesh.draw(&mut rpass);
            }

            if let Some(model) = &self.model {
                rpass.set_pipeline(&self.model_pipeline);
                model.draw(&mut rpass);
            }

            if self.particle_count > 0 {
                rpass.set_pipeline(&self.particle_pipeline);
                rpass.set_vertex_buffer(0, self.particle_buffer.slice(..));
                rpass.draw(0..6, 0..self.particle_count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(RenderStatus::Presented)
    }
}

fn create_globals_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    gradient: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("globals_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(gradient),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
