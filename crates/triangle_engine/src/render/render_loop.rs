//! Render loop
//!
//! Two states, [`LoopState::Running`] and [`LoopState::Closing`], one
//! transition. Every running iteration does, in order: input, clear, draw,
//! event poll (applying a pending resize), present. No iteration skips the
//! present.

use glfw::Key;

use crate::render::opengl::{Drawable, GraphicsApi, GraphicsContext};
use crate::render::window::WindowBackend;

/// Key that requests the window to close
pub const EXIT_KEY: Key = Key::Escape;

/// Render loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Frames are being produced
    Running,
    /// The close flag was observed; the loop exits
    Closing,
}

impl LoopState {
    /// State implied by the window's close flag
    pub fn observe<W: WindowBackend>(window: &W) -> Self {
        if window.should_close() {
            Self::Closing
        } else {
            Self::Running
        }
    }
}

/// What a finished loop did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    /// Frames presented
    pub frames: u64,
    /// Framebuffer resizes applied
    pub resizes: u64,
}

/// Poll the exit key and raise the close flag when it is held
pub fn process_input<W: WindowBackend>(window: &mut W) {
    if window.is_key_pressed(EXIT_KEY) {
        log::debug!("{:?} pressed, requesting close", EXIT_KEY);
        window.set_should_close(true);
    }
}

/// Run one iteration; returns whether a resize was applied
pub fn run_frame<W, G>(
    window: &mut W,
    graphics: &mut GraphicsContext<G>,
    drawable: Option<&Drawable<G>>,
) -> bool
where
    W: WindowBackend,
    G: GraphicsApi,
{
    process_input(window);

    graphics.clear_frame();
    if let Some(drawable) = drawable {
        drawable.draw();
    }

    let events = window.poll_events();
    if events.close_requested {
        window.set_should_close(true);
    }
    let resized = if let Some((width, height)) = events.framebuffer_resize {
        graphics.on_framebuffer_resize(width, height);
        true
    } else {
        false
    };

    window.swap_buffers();
    resized
}

/// Produce frames until the close flag is set
pub fn run<W, G>(
    window: &mut W,
    graphics: &mut GraphicsContext<G>,
    drawable: Option<&Drawable<G>>,
) -> LoopSummary
where
    W: WindowBackend,
    G: GraphicsApi,
{
    log::info!("Entering render loop");
    let mut summary = LoopSummary::default();

    while LoopState::observe(window) == LoopState::Running {
        if run_frame(window, graphics, drawable) {
            summary.resizes += 1;
        }
        summary.frames += 1;
        log::trace!("Presented frame {}", summary.frames);
    }

    log::info!(
        "Render loop closed after {} frame(s), {} resize(s)",
        summary.frames,
        summary.resizes
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::mesh::Mesh;
    use crate::render::opengl::{ClearTargets, GeometryBuffers, ShaderProgram, ShaderSources};
    use crate::render::viewport::Viewport;
    use crate::test_support::{Call, RecordingGraphics, ScriptedWindow};

    #[test]
    fn test_escape_raises_close_flag() {
        let (_api, log) = RecordingGraphics::new();
        let mut window = ScriptedWindow::new(log, (800, 600)).press_exit_on_frame(0);
        process_input(&mut window);
        assert!(window.should_close());
    }

    #[test]
    fn test_no_key_leaves_flag_alone() {
        let (_api, log) = RecordingGraphics::new();
        let mut window = ScriptedWindow::new(log, (800, 600));
        process_input(&mut window);
        assert!(!window.should_close());
    }

    #[test]
    fn test_exit_key_stops_within_one_iteration() {
        for exit_frame in [0, 1, 5] {
            let (api, log) = RecordingGraphics::new();
            let mut window =
                ScriptedWindow::new(log.clone(), (800, 600)).press_exit_on_frame(exit_frame);
            let mut graphics = GraphicsContext::new(api, (800, 600));

            let summary = run(&mut window, &mut graphics, None);
            assert_eq!(summary.frames, exit_frame + 1);
            assert_eq!(log.count(&Call::SwapBuffers), exit_frame + 1);
        }
    }

    #[test]
    fn test_frame_order() {
        let (api, log) = RecordingGraphics::new();
        let mut window = ScriptedWindow::new(log.clone(), (800, 600)).press_exit_on_frame(0);
        let mut graphics = GraphicsContext::new(api, (800, 600));
        let program = ShaderProgram::build(graphics.api(), &ShaderSources::default()).unwrap();
        let geometry = GeometryBuffers::upload(graphics.api(), &Mesh::triangle()).unwrap();
        let drawable = Drawable::new(program, geometry);
        log.clear();

        run(&mut window, &mut graphics, Some(&drawable));

        let calls = log.calls();
        let position = |wanted: &Call| calls.iter().position(|c| c == wanted).unwrap();
        let clear = position(&Call::Clear(ClearTargets::COLOR | ClearTargets::DEPTH));
        let draw = position(&Call::DrawIndexedTriangles(3));
        let poll = position(&Call::PollEvents);
        let swap = position(&Call::SwapBuffers);
        assert!(clear < draw && draw < poll && poll < swap);
    }

    #[test]
    fn test_window_only_loop_never_draws() {
        let (api, log) = RecordingGraphics::new();
        let mut window = ScriptedWindow::new(log.clone(), (800, 600)).press_exit_on_frame(2);
        let mut graphics = GraphicsContext::new(api, (800, 600));
        run(&mut window, &mut graphics, None);
        assert!(!log.calls().iter().any(|c| matches!(c, Call::DrawIndexedTriangles(_))));
        assert_eq!(log.count(&Call::Clear(ClearTargets::COLOR | ClearTargets::DEPTH)), 3);
    }

    #[test]
    fn test_resize_applied_before_next_draw() {
        let (api, log) = RecordingGraphics::new();
        let mut window = ScriptedWindow::new(log.clone(), (800, 600))
            .resize_on_frame(0, 640, 480)
            .resize_on_frame(0, 1280, 720)
            .press_exit_on_frame(1);
        let mut graphics = GraphicsContext::new(api, (800, 600));

        let summary = run(&mut window, &mut graphics, None);
        assert_eq!(summary.resizes, 1);
        assert_eq!(graphics.viewport(), Viewport::from_framebuffer(1280, 720));

        let calls = log.calls();
        let resize = calls
            .iter()
            .position(|c| *c == Call::SetViewport(Viewport::from_framebuffer(1280, 720)))
            .unwrap();
        let first_swap = calls.iter().position(|c| *c == Call::SwapBuffers).unwrap();
        assert!(resize < first_swap);
        assert!(!calls.contains(&Call::SetViewport(Viewport::from_framebuffer(640, 480))));
    }

    #[test]
    fn test_os_close_request_ends_loop() {
        let (api, log) = RecordingGraphics::new();
        let mut window = ScriptedWindow::new(log, (800, 600)).request_close_on_frame(3);
        let mut graphics = GraphicsContext::new(api, (800, 600));
        let summary = run(&mut window, &mut graphics, None);
        assert_eq!(summary.frames, 4);
        assert_eq!(LoopState::observe(&window), LoopState::Closing);
    }
}
