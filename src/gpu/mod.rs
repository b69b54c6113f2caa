//! GPU strategy: the escape-time kernel as a wgpu compute shader, one
//! logical thread per pixel, results read back through a staging buffer
//! and reshaped into the row-major field.

use crate::field::{EscapeField, FieldParams};
use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use futures_intrusive::channel::shared::oneshot_channel;
use wgpu::{ComputePipeline, Device, Queue};

const WORKGROUP_SIZE: u32 = 16;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct KernelParams {
    width: u32,
    height: u32,
    max_iterations: u32,
    padding: u32, // 16-byte uniform alignment
}

pub struct GpuFieldEngine {
    device: Device,
    queue: Queue,
    pipeline: ComputePipeline,
}

impl GpuFieldEngine {
    /// Initialize the GPU engine. Fails (strategy unavailable) when no
    /// adapter is present or the adapter cannot do f64 arithmetic. An
    /// f32 kernel would diverge from the oracle near escape boundaries,
    /// which the equivalence harness treats as a defect.
    pub async fn new() -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable GPU adapter found")?;

        if !adapter.features().contains(wgpu::Features::SHADER_F64) {
            return Err(anyhow::anyhow!(
                "GPU adapter '{}' does not support f64 shader arithmetic",
                adapter.get_info().name
            ));
        }

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::SHADER_F64,
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .context("failed to create GPU device")?;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Escape Time Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../../assets/shaders/mandelbrot.wgsl").into(),
            ),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Escape Time Bind Group Layout"),
            entries: &[
                // Output field buffer
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Grid dimensions and iteration bound
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Escape Time Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Escape Time Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: "main",
            compilation_options: Default::default(),
            cache: None,
        });

        Ok(Self {
            device,
            queue,
            pipeline,
        })
    }

    /// Dispatch one thread per pixel and marshal the flat output buffer
    /// back into the dense field (`index = y * width + x`).
    pub async fn compute(&self, params: &FieldParams) -> Result<EscapeField> {
        let output_size = (params.pixel_count() * std::mem::size_of::<u32>()) as u64;

        let field_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Field Buffer"),
            size: output_size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let kernel_params = KernelParams {
            width: params.width,
            height: params.height,
            max_iterations: params.max_iterations,
            padding: 0,
        };
        let params_data = bytemuck::bytes_of(&kernel_params);
        let params_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Kernel Params Buffer"),
            size: params_data.len() as u64,
            usage: wgpu::BufferUsages::UNIFORM,
            mapped_at_creation: true,
        });
        params_buffer
            .slice(..)
            .get_mapped_range_mut()
            .copy_from_slice(params_data);
        params_buffer.unmap();

        let staging_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Staging Buffer"),
            size: output_size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Escape Time Bind Group"),
            layout: &self.pipeline.get_bind_group_layout(0),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: field_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: params_buffer.as_entire_binding(),
                },
            ],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Escape Time Encoder"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Escape Time Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            let dispatch_x = (params.width + WORKGROUP_SIZE - 1) / WORKGROUP_SIZE;
            let dispatch_y = (params.height + WORKGROUP_SIZE - 1) / WORKGROUP_SIZE;
            pass.dispatch_workgroups(dispatch_x, dispatch_y, 1);
        }
        encoder.copy_buffer_to_buffer(&field_buffer, 0, &staging_buffer, 0, output_size);
        self.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = staging_buffer.slice(..);
        let (sender, receiver) = oneshot_channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.device.poll(wgpu::Maintain::wait()).panic_on_timeout();
        receiver
            .receive()
            .await
            .context("GPU readback channel closed")?
            .context("failed to map staging buffer")?;

        let data = buffer_slice.get_mapped_range();
        let values: Vec<u32> = bytemuck::cast_slice(&data).to_vec();
        drop(data);
        staging_buffer.unmap();

        EscapeField::from_raw(params.width, params.height, values)
    }

    pub fn adapter_limits(&self) -> wgpu::Limits {
        self.device.limits()
    }
}
