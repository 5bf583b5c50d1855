//! GPU-resident terrain mesh: wgpu buffer handles behind the terrain's
//! mesh seam.
//!
//! The vertex buffer is created once from the terrain's static data. The
//! index buffer is rewritten in place with `Queue::write_buffer` whenever
//! LOD selection changes, and only recreated when the new triangle list
//! outgrows it (which can't happen after the first full-detail frame).

use tracing::debug;
use wgpu::util::DeviceExt;

use ridgeline_terrain::{FLOATS_PER_VERTEX, TerrainMesh, TerrainVertex};

/// Vertex buffer layout matching [`TerrainVertex`]: position, base UV,
/// detail UV, tightly packed.
pub fn terrain_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x2,
        2 => Float32x2,
    ];
    wgpu::VertexBufferLayout {
        array_stride: (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

/// Terrain buffers on the GPU, plus the render pass currently recording.
///
/// Because the terrain drives the draw call itself (through the
/// [`TerrainMesh`] seam), the caller lends the pass for the frame with
/// [`begin_pass`](Self::begin_pass) and takes it back with
/// [`end_pass`](Self::end_pass) after `Terrain::render` returns.
pub struct GpuTerrainMesh {
    device: wgpu::Device,
    queue: wgpu::Queue,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_buffer_size: u64,
    index_count: u32,
    pass: Option<wgpu::RenderPass<'static>>,
}

impl GpuTerrainMesh {
    /// Create an empty mesh; buffers appear on first upload.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            vertex_buffer: None,
            index_buffer: None,
            index_buffer_size: 0,
            index_count: 0,
            pass: None,
        }
    }

    /// Lend this frame's render pass so `draw` can record into it.
    pub fn begin_pass(&mut self, pass: wgpu::RenderPass<'_>) {
        self.pass = Some(pass.forget_lifetime());
    }

    /// Take the render pass back after the terrain has drawn.
    pub fn end_pass(&mut self) -> Option<wgpu::RenderPass<'static>> {
        self.pass.take()
    }

    /// Indices in the current index buffer.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// GPU bytes reserved for the index buffer.
    pub fn index_buffer_size(&self) -> u64 {
        self.index_buffer_size
    }

    /// True once the static vertex buffer has been uploaded.
    pub fn has_vertex_data(&self) -> bool {
        self.vertex_buffer.is_some()
    }
}

impl TerrainMesh for GpuTerrainMesh {
    fn set_vertex_data(&mut self, vertices: &[TerrainVertex]) {
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("terrain_vertex_buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
        debug!(vertices = vertices.len(), "uploaded terrain vertex buffer");
        self.vertex_buffer = Some(buffer);
    }

    fn set_index_data(&mut self, indices: &[u32]) {
        let bytes: &[u8] = bytemuck::cast_slice(indices);

        match &self.index_buffer {
            Some(buffer) if bytes.len() as u64 <= self.index_buffer_size => {
                // Rewrite in place (write-on-reselect).
                self.queue.write_buffer(buffer, 0, bytes);
            }
            _ => {
                let buffer = self
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("terrain_index_buffer"),
                        contents: bytes,
                        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                    });
                debug!(bytes = bytes.len(), "recreated terrain index buffer");
                self.index_buffer_size = bytes.len() as u64;
                self.index_buffer = Some(buffer);
            }
        }
        self.index_count = indices.len() as u32;
    }

    fn draw(&mut self) {
        let (Some(pass), Some(vertex_buffer), Some(index_buffer)) =
            (&mut self.pass, &self.vertex_buffer, &self.index_buffer)
        else {
            return;
        };
        if self.index_count == 0 {
            return;
        }
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
