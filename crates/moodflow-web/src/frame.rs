use crate::canvas::CanvasSurface;
use crate::dom;
use moodflow_core::{FrameOutcome, MoodSession, VisualizationLoop};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// One self-rescheduling `requestAnimationFrame` cycle.
struct Cycle {
    slot: FrameSlot,
    pending: Rc<Cell<Option<i32>>>,
}

impl Cycle {
    fn spawn(mut step: impl FnMut() -> FrameOutcome + 'static) -> Self {
        let slot: FrameSlot = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let slot_tick = slot.clone();
        let pending_tick = pending.clone();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            if step() == FrameOutcome::Stop {
                return;
            }
            pending_tick.set(request_frame(&slot_tick));
        }) as Box<dyn FnMut()>));
        pending.set(request_frame(&slot));
        Self { slot, pending }
    }

    /// Cancel the queued frame and drop the closure. Must not be called
    /// from inside this cycle's own callback.
    fn cancel(&self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        self.slot.borrow_mut().take();
    }
}

fn request_frame(slot: &FrameSlot) -> Option<i32> {
    let w = web::window()?;
    let guard = slot.borrow();
    let cb = guard.as_ref()?;
    w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}

/// Both render cycles; dropping this does not stop them, [`LoopHandle::stop`] does.
pub struct LoopHandle {
    viz: VisualizationLoop,
    particles: Cycle,
    waves: Cycle,
}

impl LoopHandle {
    pub fn stop(&self) {
        self.viz.stop();
        self.particles.cancel();
        self.waves.cancel();
    }
}

pub fn start_loop(
    session: Rc<RefCell<MoodSession>>,
    document: web::Document,
    mut particle_surface: CanvasSurface,
    mut wave_surface: CanvasSurface,
) -> LoopHandle {
    let viz = VisualizationLoop::default();
    viz.start();

    let viz_p = viz.clone();
    let session_p = session.clone();
    let mut last_count = usize::MAX;
    let particles = Cycle::spawn(move || {
        let (outcome, count) =
            viz_p.particle_frame(&mut *session_p.borrow_mut(), &mut particle_surface);
        if count != last_count {
            dom::set_text(&document, crate::ui::ACTIVE_COUNT_ID, &count.to_string());
            last_count = count;
        }
        outcome
    });

    let viz_w = viz.clone();
    let waves = Cycle::spawn(move || viz_w.waveform_frame(&*session.borrow(), &mut wave_surface));

    LoopHandle {
        viz,
        particles,
        waves,
    }
}
