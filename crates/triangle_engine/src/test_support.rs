//! Test backends
//!
//! [`RecordingGraphics`] and [`ScriptedWindow`] write into one shared
//! [`CallLog`] so tests can assert on the interleaving of GL calls and
//! window operations.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use glfw::Key;

use crate::render::mesh::VertexAttribute;
use crate::render::opengl::{BufferTarget, ClearTargets, GraphicsApi, ShaderStage};
use crate::render::render_loop::EXIT_KEY;
use crate::render::viewport::Viewport;
use crate::render::window::{FrameEvents, WindowBackend};

/// One recorded operation
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateBuffer(u32),
    BindBuffer(BufferTarget, Option<u32>),
    BufferStaticData(BufferTarget, usize),
    DeleteBuffer(u32),
    VertexAttribute(VertexAttribute, i32),
    SetViewport(Viewport),
    SetClearColor([f32; 4]),
    Clear(ClearTargets),
    SetWireframe(bool),
    DrawIndexedTriangles(i32),
    PollEvents,
    SwapBuffers,
    WindowDestroyed,
    SessionTerminated,
}

/// Shared, clonable call log
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn count(&self, call: &Call) -> u64 {
        self.0.borrow().iter().filter(|c| *c == call).count() as u64
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// GL stand-in that records calls and fakes compile/link results
///
/// A stage compiles when its source contains `void main()` and its braces
/// balance. A program links when every attached stage compiled and both a
/// vertex and a fragment stage are attached.
pub struct RecordingGraphics {
    log: CallLog,
    next_id: Cell<u32>,
    shaders: RefCell<HashMap<u32, (ShaderStage, bool)>>,
    attachments: RefCell<HashMap<u32, Vec<u32>>>,
    linked: RefCell<HashMap<u32, bool>>,
    buffers_before_failure: Cell<Option<u32>>,
    fail_vertex_arrays: Cell<bool>,
}

impl RecordingGraphics {
    pub fn new() -> (Self, CallLog) {
        let log = CallLog::default();
        let api = Self {
            log: log.clone(),
            next_id: Cell::new(1),
            shaders: RefCell::default(),
            attachments: RefCell::default(),
            linked: RefCell::default(),
            buffers_before_failure: Cell::new(None),
            fail_vertex_arrays: Cell::new(false),
        };
        (api, log)
    }

    /// Let `count` buffers be created, then fail
    pub fn fail_buffer_creation_after(&self, count: u32) {
        self.buffers_before_failure.set(Some(count));
    }

    pub fn fail_vertex_array_creation(&self) {
        self.fail_vertex_arrays.set(true);
    }

    fn allocate(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

fn compiles(source: &str) -> bool {
    source.contains("void main()") && source.matches('{').count() == source.matches('}').count()
}

impl GraphicsApi for RecordingGraphics {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let id = self.allocate();
        self.shaders.borrow_mut().insert(id, (stage, false));
        self.log.push(Call::CreateShader(stage, id));
        Ok(id)
    }

    fn compile_shader(&self, shader: u32, source: &str) {
        if let Some(entry) = self.shaders.borrow_mut().get_mut(&shader) {
            entry.1 = compiles(source);
        }
        self.log.push(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.shaders.borrow().get(&shader).is_some_and(|(_, ok)| *ok)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            "0:1(1): error: syntax error, unexpected end of file\n".to_string()
        }
    }

    fn delete_shader(&self, shader: u32) {
        self.log.push(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.allocate();
        self.log.push(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.attachments.borrow_mut().entry(program).or_default().push(shader);
        self.log.push(Call::AttachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        let shaders = self.shaders.borrow();
        let attached = self.attachments.borrow().get(&program).cloned().unwrap_or_default();
        let has_stage = |wanted: ShaderStage| {
            attached
                .iter()
                .any(|id| shaders.get(id).is_some_and(|(stage, _)| *stage == wanted))
        };
        let ok = has_stage(ShaderStage::Vertex)
            && has_stage(ShaderStage::Fragment)
            && attached.iter().all(|id| shaders.get(id).is_some_and(|(_, ok)| *ok));
        self.linked.borrow_mut().insert(program, ok);
        self.log.push(Call::LinkProgram(program));
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.linked.borrow().get(&program).copied().unwrap_or(false)
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.program_link_status(program) {
            String::new()
        } else {
            "error: linking with uncompiled/unspecialized shader".to_string()
        }
    }

    fn use_program(&self, program: Option<u32>) {
        self.log.push(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.log.push(Call::DeleteProgram(program));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        if self.fail_vertex_arrays.get() {
            return Err("out of memory".to_string());
        }
        let id = self.allocate();
        self.log.push(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.log.push(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.log.push(Call::DeleteVertexArray(vertex_array));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        if let Some(remaining) = self.buffers_before_failure.get() {
            if remaining == 0 {
                return Err("out of memory".to_string());
            }
            self.buffers_before_failure.set(Some(remaining - 1));
        }
        let id = self.allocate();
        self.log.push(Call::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<u32>) {
        self.log.push(Call::BindBuffer(target, buffer));
    }

    fn buffer_static_data(&self, target: BufferTarget, data: &[u8]) {
        self.log.push(Call::BufferStaticData(target, data.len()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.log.push(Call::DeleteBuffer(buffer));
    }

    fn vertex_attribute(&self, attribute: &VertexAttribute, byte_stride: i32) {
        self.log.push(Call::VertexAttribute(*attribute, byte_stride));
    }

    fn set_viewport(&self, viewport: Viewport) {
        self.log.push(Call::SetViewport(viewport));
    }

    fn set_clear_color(&self, color: [f32; 4]) {
        self.log.push(Call::SetClearColor(color));
    }

    fn clear(&self, targets: ClearTargets) {
        self.log.push(Call::Clear(targets));
    }

    fn set_wireframe(&self, enabled: bool) {
        self.log.push(Call::SetWireframe(enabled));
    }

    fn draw_indexed_triangles(&self, index_count: i32) {
        self.log.push(Call::DrawIndexedTriangles(index_count));
    }
}

/// Window whose input and events are scripted per frame
///
/// Frames are counted by presents: frame 0 runs until the first swap.
pub struct ScriptedWindow {
    log: CallLog,
    framebuffer: (i32, i32),
    frame: u64,
    should_close: bool,
    exit_key_frame: Option<u64>,
    close_request_frame: Option<u64>,
    resizes: HashMap<u64, Vec<(i32, i32)>>,
}

impl ScriptedWindow {
    pub fn new(log: CallLog, framebuffer: (i32, i32)) -> Self {
        Self {
            log,
            framebuffer,
            frame: 0,
            should_close: false,
            exit_key_frame: None,
            close_request_frame: None,
            resizes: HashMap::new(),
        }
    }

    /// Hold the exit key during `frame`
    pub fn press_exit_on_frame(mut self, frame: u64) -> Self {
        self.press_exit_at(frame);
        self
    }

    pub fn press_exit_at(&mut self, frame: u64) {
        self.exit_key_frame = Some(frame);
    }

    /// Deliver an OS close request during the poll of `frame`
    pub fn request_close_on_frame(mut self, frame: u64) -> Self {
        self.request_close_at(frame);
        self
    }

    pub fn request_close_at(&mut self, frame: u64) {
        self.close_request_frame = Some(frame);
    }

    /// Deliver a framebuffer resize during the poll of `frame`
    pub fn resize_on_frame(mut self, frame: u64, width: i32, height: i32) -> Self {
        self.resizes.entry(frame).or_default().push((width, height));
        self
    }
}

impl WindowBackend for ScriptedWindow {
    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.should_close = should_close;
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        key == EXIT_KEY && self.exit_key_frame == Some(self.frame)
    }

    fn poll_events(&mut self) -> FrameEvents {
        self.log.push(Call::PollEvents);
        let mut events = FrameEvents::default();
        for &(width, height) in self.resizes.get(&self.frame).into_iter().flatten() {
            self.framebuffer = (width, height);
            events.record_resize(width, height);
        }
        events.close_requested = self.close_request_frame == Some(self.frame);
        events
    }

    fn framebuffer_size(&self) -> (i32, i32) {
        self.framebuffer
    }

    fn swap_buffers(&mut self) {
        self.log.push(Call::SwapBuffers);
        self.frame += 1;
    }
}

impl Drop for ScriptedWindow {
    fn drop(&mut self) {
        self.log.push(Call::WindowDestroyed);
    }
}

/// Windowing subsystem stand-in that records its termination
pub struct ScriptedSession {
    log: CallLog,
}

impl ScriptedSession {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl Drop for ScriptedSession {
    fn drop(&mut self) {
        self.log.push(Call::SessionTerminated);
    }
}
