use bytemuck::{Pod, Zeroable};

/// Per-body render data in a flat, GPU-friendly layout: 8 floats = 32 bytes stride.
///
/// Positions and radii are already in screen space.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    /// Screen-space radius.
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// `Overlay` discriminant as a float.
    pub overlay: f32,
    /// 1.0 when a planetary ring is drawn, else 0.0.
    pub ring: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Instance buffer for one frame.
#[derive(Debug, Clone, Default)]
pub struct InstanceBuffer {
    pub instances: Vec<BodyInstance>,
}

impl InstanceBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { instances: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, instance: BodyInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Flat float view, ready for upload.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}
