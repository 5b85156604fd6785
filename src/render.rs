use crate::assets::{DecodedImage, TextureSlot};
use crate::camera::Camera;
use crate::scene::Scene;
use web_sys as web;

mod helpers;
mod post;
mod scene_pass;
mod targets;

use post::PostResources;
use scene_pass::ScenePass;
use targets::RenderTargets;

/// WebGPU device, swapchain and every pass the frame draws.
///
/// The scene is lit into an HDR target, the bright parts are blurred at
/// half resolution, and the two are composited into the swapchain.
pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    _config: wgpu::SurfaceConfiguration,
    view_format: wgpu::TextureFormat,
    targets: RenderTargets,
    scene_pass: ScenePass,
    post: PostResources,
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
                    // Default limits; older WebGPU impls reject unknown fields
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let (format, view_format) = helpers::pick_surface_formats(&caps.formats)
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        if !view_format.is_srgb() {
            log::warn!("[gpu] no sRGB view for {:?}, colours will be dark", format);
        }
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
            view_formats: if view_format == format {
                vec![]
            } else {
                vec![view_format]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] surface {}x{} {:?} (view {:?})",
            width,
            height,
            format,
            view_format
        );

        let targets = RenderTargets::new(&device, width, height);
        let scene_pass = ScenePass::new(&device, &queue);

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::shaders::POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post = post::create_post_resources(
            &device,
            &queue,
            &post_shader,
            &targets,
            &linear_sampler,
            view_format,
        );

        Ok(Self {
            surface,
            device,
            queue,
            _config: config,
            view_format,
            targets,
            scene_pass,
            post,
        })
    }

    pub fn upload_texture(&mut self, slot: TextureSlot, image: &DecodedImage) {
        self.scene_pass
            .upload_texture(&self.device, &self.queue, slot, image);
    }

    pub fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        self.scene_pass.encode(
            &self.queue,
            &mut encoder,
            &self.targets.hdr_view,
            &self.targets.depth_view,
            scene,
            camera,
        );
        self.post.encode(&mut encoder, &self.targets, &view);

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
