//! Per-frame drivers for the two render cycles and the shared start/stop
//! switch that ends them.
//!
//! Both cycles run on the display scheduler's thread, one callback per
//! frame. Neither holds state of its own; they read the session and draw.

use crate::random::RandomSource;
use crate::session::MoodSession;
use crate::surface::{Sprite, Surface, VerticalGradient};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Whether the scheduler should request another frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Stop,
}

/// Shared run flag. Clones observe the same state, so one `stop()` ends
/// every cycle at its next callback boundary.
#[derive(Clone, Debug)]
pub struct LoopControl {
    state: Rc<Cell<LoopState>>,
}

impl Default for LoopControl {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopControl {
    pub fn new() -> Self {
        Self {
            state: Rc::new(Cell::new(LoopState::Idle)),
        }
    }

    /// Returns false if the loop was already torn down; a stopped loop
    /// does not restart.
    pub fn start(&self) -> bool {
        match self.state.get() {
            LoopState::Stopped => false,
            _ => {
                self.state.set(LoopState::Running);
                true
            }
        }
    }

    pub fn stop(&self) {
        if self.state.get() != LoopState::Stopped {
            log::debug!("[frame] loop stopped");
        }
        self.state.set(LoopState::Stopped);
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state.get()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.get() == LoopState::Running
    }
}

/// The two render cycles behind one [`LoopControl`].
#[derive(Clone, Debug, Default)]
pub struct VisualizationLoop {
    control: LoopControl,
}

impl VisualizationLoop {
    pub fn new(control: LoopControl) -> Self {
        Self { control }
    }

    pub fn control(&self) -> &LoopControl {
        &self.control
    }

    pub fn start(&self) -> bool {
        self.control.start()
    }

    pub fn stop(&self) {
        self.control.stop();
    }

    /// Fade, tick, draw the survivors. Returns the live count for display
    /// alongside the outcome.
    pub fn particle_frame<R: RandomSource>(
        &self,
        session: &mut MoodSession<R>,
        surface: &mut impl Surface,
    ) -> (FrameOutcome, usize) {
        if !self.control.is_running() {
            return (FrameOutcome::Stop, session.particle_count());
        }
        draw_particles(session, surface);
        (FrameOutcome::Continue, session.particle_count())
    }

    pub fn waveform_frame<R: RandomSource>(
        &self,
        session: &MoodSession<R>,
        surface: &mut impl Surface,
    ) -> FrameOutcome {
        if !self.control.is_running() {
            return FrameOutcome::Stop;
        }
        draw_waveform(session, surface);
        FrameOutcome::Continue
    }
}

/// One particle cycle step, regardless of loop state.
pub fn draw_particles<R: RandomSource>(session: &mut MoodSession<R>, surface: &mut impl Surface) {
    let look = &session.config().look;
    let (veil, glow_blur) = (look.particle_veil, look.glow_blur);
    surface.fade(veil);
    session.particles_mut().tick();
    for p in session.particles().particles() {
        surface.draw_sprite(&Sprite::from_particle(p, glow_blur));
    }
}

/// One waveform cycle step. An empty history draws only the fade.
pub fn draw_waveform<R: RandomSource>(session: &MoodSession<R>, surface: &mut impl Surface) {
    let look = &session.config().look;
    surface.fade(look.wave_veil);
    let dims = surface.dimensions();
    if dims.is_empty() {
        return;
    }
    let shape = session.waveform().render(dims.width, dims.height);
    if shape.is_empty() {
        return;
    }
    let gradient = VerticalGradient {
        top: look.wave_gradient_top,
        bottom: look.wave_gradient_bottom,
    };
    surface.fill_wave(&shape, &gradient);
    surface.stroke_wave(&shape, look.wave_stroke, look.wave_stroke_width);
}
