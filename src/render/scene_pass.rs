use super::helpers::{self, DEPTH_FORMAT};
use super::targets::HDR_FORMAT;
use crate::assets::{DecodedImage, TextureSlot};
use crate::camera::Camera;
use crate::constants::*;
use crate::mesh::{uv_sphere, MeshData, MeshVertex};
use crate::scene::Scene;
use glam::Mat4;
use std::num::NonZeroU64;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    light_pos: [f32; 4],
    light_color: [f32; 4],
    ambient: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    model: [[f32; 4]; 4],
    base_color: [f32; 4],
    emissive: [f32; 4],
    material: [f32; 4],
    extra: [f32; 4],
}

// Dynamic-offset slots: background, then markers, then profile spheres.
const OBJECT_STRIDE: u64 = 256;
const SLOT_BACKGROUND: usize = 0;
const SLOT_FIRST_MARKER: usize = 1;
const SLOT_FIRST_PROFILE: usize = SLOT_FIRST_MARKER + MARKER_COUNT;
const OBJECT_SLOTS: usize = SLOT_FIRST_PROFILE + PROFILE_COUNT;

const VERTEX_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

#[inline]
fn srgb_to_linear(c: [f32; 3]) -> [f32; 3] {
    c.map(|v| v.powf(2.2))
}

#[inline]
fn slot_offset(slot: usize) -> u32 {
    (slot as u64 * OBJECT_STRIDE) as u32
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// A texture and the group-2 bind group that samples it.
struct MaterialTexture {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

pub(crate) struct ScenePass {
    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    objects_buffer: wgpu::Buffer,
    objects_bg: wgpu::BindGroup,
    material_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    background_pipeline: wgpu::RenderPipeline,
    opaque_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    profile_mesh: GpuMesh,
    marker_mesh: GpuMesh,
    background: Option<MaterialTexture>,
    thumbnails: Vec<MaterialTexture>,
    white: MaterialTexture,
    clear_color: wgpu::Color,
}

fn mesh_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    blend: Option<wgpu::BlendState>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_mesh"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &VERTEX_ATTRS,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_mesh"),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn make_material(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    label: &str,
    image: &DecodedImage,
) -> MaterialTexture {
    let (texture, view) = helpers::create_image_texture(device, queue, label, image);
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    MaterialTexture {
        _texture: texture,
        bind_group,
    }
}

impl ScenePass {
    pub(crate) fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::shaders::SCENE_WGSL.into()),
        });

        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
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
        let object_size = std::mem::size_of::<ObjectUniforms>() as u64;
        let objects_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("objects_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(object_size),
                },
                count: None,
            }],
        });
        let material_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
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
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let objects_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("objects"),
            size: OBJECT_STRIDE * OBJECT_SLOTS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let objects_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("objects_bg"),
            layout: &objects_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &objects_buffer,
                    offset: 0,
                    size: NonZeroU64::new(object_size),
                }),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("material_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl, &objects_bgl, &material_bgl],
            push_constant_ranges: &[],
        });
        let opaque_pipeline = mesh_pipeline(device, &layout, &shader, "opaque_pipeline", None);
        let transparent_pipeline = mesh_pipeline(
            device,
            &layout,
            &shader,
            "transparent_pipeline",
            Some(wgpu::BlendState::ALPHA_BLENDING),
        );
        let background_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("background_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_background"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_background"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let profile_mesh = GpuMesh::upload(
            device,
            "profile_mesh",
            &uv_sphere(PROFILE_RADIUS, PROFILE_SEGMENTS, PROFILE_SEGMENTS),
        );
        let marker_mesh = GpuMesh::upload(
            device,
            "marker_mesh",
            &uv_sphere(MARKER_RADIUS, MARKER_SEGMENTS, MARKER_SEGMENTS),
        );

        let white_image = DecodedImage::white();
        let white = make_material(
            device,
            queue,
            &material_bgl,
            &sampler,
            "white_tex",
            &white_image,
        );
        // Thumbnails render with a plain white map until their images arrive.
        let thumbnails = (0..PROFILE_COUNT)
            .map(|_| {
                make_material(
                    device,
                    queue,
                    &material_bgl,
                    &sampler,
                    "thumbnail_placeholder",
                    &white_image,
                )
            })
            .collect();

        Self {
            globals_buffer,
            globals_bg,
            objects_buffer,
            objects_bg,
            material_bgl,
            sampler,
            background_pipeline,
            opaque_pipeline,
            transparent_pipeline,
            profile_mesh,
            marker_mesh,
            background: None,
            thumbnails,
            white,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        }
    }

    pub(crate) fn upload_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        slot: TextureSlot,
        image: &DecodedImage,
    ) {
        match slot {
            TextureSlot::Background => {
                self.background = Some(make_material(
                    device,
                    queue,
                    &self.material_bgl,
                    &self.sampler,
                    "background_tex",
                    image,
                ));
            }
            TextureSlot::Thumbnail(i) if i < self.thumbnails.len() => {
                self.thumbnails[i] = make_material(
                    device,
                    queue,
                    &self.material_bgl,
                    &self.sampler,
                    "thumbnail_tex",
                    image,
                );
            }
            TextureSlot::Thumbnail(i) => {
                log::warn!("[gpu] no thumbnail slot {}", i);
            }
        }
    }

    fn write_uniforms(&self, queue: &wgpu::Queue, scene: &Scene, camera: &Camera) {
        let light = scene.point_light_world();
        let ambient = srgb_to_linear(AMBIENT_LIGHT_COLOR);
        let globals = Globals {
            view_proj: camera.view_proj().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            light_pos: [light.x, light.y, light.z, POINT_LIGHT_RANGE],
            light_color: [
                POINT_LIGHT_COLOR[0],
                POINT_LIGHT_COLOR[1],
                POINT_LIGHT_COLOR[2],
                POINT_LIGHT_INTENSITY,
            ],
            ambient: [ambient[0], ambient[1], ambient[2], 1.0],
        };
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let mut objects = vec![0u8; (OBJECT_STRIDE as usize) * OBJECT_SLOTS];
        let mut put = |slot: usize, u: ObjectUniforms| {
            let start = slot * OBJECT_STRIDE as usize;
            let bytes = bytemuck::bytes_of(&u);
            objects[start..start + bytes.len()].copy_from_slice(bytes);
        };
        put(
            SLOT_BACKGROUND,
            ObjectUniforms {
                model: Mat4::IDENTITY.to_cols_array_2d(),
                base_color: [1.0; 4],
                emissive: [0.0; 4],
                material: [1.0, 0.0, 0.0, 0.0],
                extra: [0.0; 4],
            },
        );
        let o = scene.orientation;
        for m in scene.markers.iter() {
            let c = srgb_to_linear(m.color);
            put(
                SLOT_FIRST_MARKER + m.index,
                ObjectUniforms {
                    model: m.model_matrix(o).to_cols_array_2d(),
                    base_color: [c[0], c[1], c[2], 1.0],
                    emissive: [c[0], c[1], c[2], m.emissive_intensity],
                    material: [1.0, 0.0, 0.0, 0.0],
                    extra: [0.5, 0.0, 0.0, 0.0],
                },
            );
        }
        for s in scene.spheres.iter() {
            put(
                SLOT_FIRST_PROFILE + s.index,
                ObjectUniforms {
                    model: s.model_matrix(o).to_cols_array_2d(),
                    base_color: [1.0, 1.0, 1.0, PROFILE_OPACITY],
                    emissive: [0.0; 4],
                    material: [
                        PROFILE_ROUGHNESS,
                        PROFILE_METALNESS,
                        PROFILE_CLEARCOAT,
                        PROFILE_CLEARCOAT_ROUGHNESS,
                    ],
                    extra: [PROFILE_REFLECTIVITY, 0.0, 0.0, 0.0],
                },
            );
        }
        queue.write_buffer(&self.objects_buffer, 0, &objects);
    }

    /// Draw background, opaque markers, then the glassy spheres back to front.
    pub(crate) fn encode(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        color: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        scene: &Scene,
        camera: &Camera,
    ) {
        self.write_uniforms(queue, scene, camera);

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_bind_group(0, &self.globals_bg, &[]);

        if let Some(bg) = &self.background {
            rpass.set_pipeline(&self.background_pipeline);
            rpass.set_bind_group(1, &self.objects_bg, &[slot_offset(SLOT_BACKGROUND)]);
            rpass.set_bind_group(2, &bg.bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }

        rpass.set_pipeline(&self.opaque_pipeline);
        rpass.set_vertex_buffer(0, self.marker_mesh.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.marker_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.set_bind_group(2, &self.white.bind_group, &[]);
        for m in scene.markers.iter() {
            rpass.set_bind_group(1, &self.objects_bg, &[slot_offset(SLOT_FIRST_MARKER + m.index)]);
            rpass.draw_indexed(0..self.marker_mesh.index_count, 0, 0..1);
        }

        let mut order: Vec<(usize, f32)> = scene
            .spheres
            .iter()
            .map(|s| (s.index, s.world_center(scene.orientation).distance_squared(camera.eye)))
            .collect();
        order.sort_by(|a, b| b.1.total_cmp(&a.1));

        rpass.set_pipeline(&self.transparent_pipeline);
        rpass.set_vertex_buffer(0, self.profile_mesh.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.profile_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        for (i, _) in order {
            rpass.set_bind_group(1, &self.objects_bg, &[slot_offset(SLOT_FIRST_PROFILE + i)]);
            rpass.set_bind_group(2, &self.thumbnails[i].bind_group, &[]);
            rpass.draw_indexed(0..self.profile_mesh.index_count, 0, 0..1);
        }
    }
}
