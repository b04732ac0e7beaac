//! Scene state shared by the frame loop, DOM listeners and script handles.

use crate::constants::DEMO_SEED;
use globe_core::{DemoConfig, DemoDriver, OrbitCamera, OverlayConfig, OverlayController, Viewport};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct SceneHandles {
    pub overlay: Rc<RefCell<OverlayController>>,
    pub demo: Rc<RefCell<DemoDriver>>,
    pub demo_enabled: Rc<RefCell<bool>>,
    pub paused: Rc<RefCell<bool>>,
    pub show_stats: Rc<RefCell<bool>>,
    pub orbit: Rc<RefCell<OrbitCamera>>,
    pub viewport: Rc<RefCell<Viewport>>,
}

impl SceneHandles {
    pub fn new(demo_enabled: bool) -> Self {
        Self {
            overlay: Rc::new(RefCell::new(OverlayController::new(OverlayConfig::default()))),
            demo: Rc::new(RefCell::new(DemoDriver::new(DemoConfig::default(), DEMO_SEED))),
            demo_enabled: Rc::new(RefCell::new(demo_enabled)),
            paused: Rc::new(RefCell::new(false)),
            show_stats: Rc::new(RefCell::new(false)),
            orbit: Rc::new(RefCell::new(OrbitCamera::default())),
            viewport: Rc::new(RefCell::new(Viewport::default())),
        }
    }
}

thread_local! {
    static SCENE: RefCell<Option<SceneHandles>> = const { RefCell::new(None) };
}

/// Publish the running scene. Returns `false` if one was already installed.
pub fn install(scene: &SceneHandles) -> bool {
    SCENE.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return false;
        }
        *slot = Some(scene.clone());
        true
    })
}

pub fn current() -> Option<SceneHandles> {
    SCENE.with(|slot| slot.borrow().clone())
}
