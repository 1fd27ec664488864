use blockfield_core::{FrameDriver, GpuState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub driver: Rc<RefCell<FrameDriver>>,
    pub gpu: GpuState<'static>,
    pub canvas: web::HtmlCanvasElement,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let mut driver = self.driver.borrow_mut();

        // the resize listener only touches the canvas backing size
        let (w, h) = (self.canvas.width(), self.canvas.height());
        if (w, h) != self.gpu.size() {
            driver.resize(&mut self.gpu, w, h);
        }

        if let Err(e) = driver.frame(&mut self.gpu) {
            log::error!("[frame] render error: {:?}", e);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> anyhow::Result<GpuState<'static>> {
    GpuState::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        canvas.width(),
        canvas.height(),
    )
    .await
}

/// Handle to a running animation loop. Stopping takes effect on the next
/// scheduled tick; the loop is not restartable.
#[derive(Clone)]
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn stop(&self) {
        if self.running.replace(false) {
            log::info!("[frame] stop requested");
        }
    }
}

pub fn start_loop(mut ctx: FrameContext) -> FrameLoop {
    let running = Rc::new(Cell::new(true));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let running_tick = running.clone();

    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running_tick.get() {
            return;
        }
        ctx.frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));

    request_frame(&tick);
    FrameLoop { running }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
