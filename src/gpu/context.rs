use anyhow::Context as _;

/// Texture units the scene addresses, matching the classic 16 sampler slots.
pub const NOMINAL_TEXTURE_UNITS: usize = 16;

/// A windowless GPU device and queue.
#[derive(Debug)]
pub struct GpuContext {
    pub adapter_info: wgpu::AdapterInfo,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuContext {
    pub async fn headless() -> anyhow::Result<Self> {
        // The instance is a handle to our GPU
        // BackendBit::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable GPU adapter")?;
        let adapter_info = adapter.get_info();
        log::info!("using adapter {} ({:?})", adapter_info.name, adapter_info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("tabletop device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
                ..Default::default()
            })
            .await
            .context("could not create GPU device")?;

        Ok(Self {
            adapter_info,
            device,
            queue,
        })
    }

    /// Sampler units usable per draw: the nominal 16, or fewer if the device
    /// cannot sample that many textures in one shader stage.
    pub fn max_texture_units(&self) -> usize {
        let limit = self.device.limits().max_sampled_textures_per_shader_stage as usize;
        limit.min(NOMINAL_TEXTURE_UNITS)
    }
}
