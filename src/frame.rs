use crate::constants::STATS_REFRESH_SEC;
use crate::dom;
use crate::overlay;
use crate::render::{self, mesh, Vertex};
use crate::scene::SceneHandles;
use globe_core::{SceneEvent, SceneTally};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default)]
pub struct FrameStats {
    frames: u32,
    elapsed: f32,
    pub fps: f32,
}

impl FrameStats {
    /// Count a frame; returns `true` when `fps` was refreshed.
    fn record(&mut self, dt_sec: f32) -> bool {
        self.frames += 1;
        self.elapsed += dt_sec;
        if self.elapsed < STATS_REFRESH_SEC {
            return false;
        }
        self.fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        true
    }
}

pub struct FrameContext<'a> {
    pub scene: SceneHandles,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
    pub events: Vec<SceneEvent>,
    pub lines: Vec<Vertex>,
    pub stats: FrameStats,
    pub tally: SceneTally,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        scene: SceneHandles,
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState<'a>>,
    ) -> Self {
        Self {
            scene,
            canvas,
            gpu,
            last_instant: Instant::now(),
            events: Vec::new(),
            lines: Vec::new(),
            stats: FrameStats::default(),
            tally: SceneTally::default(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32();

        let paused = *self.scene.paused.borrow();
        let sim_dt = if paused { Duration::ZERO } else { dt };

        self.events.clear();
        {
            let mut overlay = self.scene.overlay.borrow_mut();
            if !paused {
                let mut demo = self.scene.demo.borrow_mut();
                if *self.scene.demo_enabled.borrow() {
                    demo.tick(sim_dt, &mut overlay);
                } else {
                    demo.drain_removals(sim_dt, &mut overlay);
                }
            }
            overlay.tick(sim_dt, &mut self.events);
            mesh::overlay_lines(&overlay, &mut self.lines);
        }
        self.tally.record(&self.events);

        if self.stats.record(dt_sec) && *self.scene.show_stats.borrow() {
            if let Some(doc) = dom::window_document() {
                let overlay = self.scene.overlay.borrow();
                overlay::update_stats(
                    &doc,
                    self.stats.fps,
                    overlay.marker_count(),
                    overlay.arc_count(),
                    self.tally.arcs_retired,
                    paused,
                );
            }
        }

        if let Some(g) = &mut self.gpu {
            let viewport = *self.scene.viewport.borrow();
            let camera = self.scene.orbit.borrow().camera(&viewport);
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            match g.render(&camera, &self.lines) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("[frame] surface lost; reconfiguring");
                    g.reconfigure();
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
