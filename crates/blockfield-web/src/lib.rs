#![cfg(target_arch = "wasm32")]
use blockfield_core::{FrameDriver, Scene, SceneConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod input;

thread_local! {
    static FRAME_LOOP: RefCell<Option<frame::FrameLoop>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("blockfield-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop scheduling frames. The last drawn frame stays on the canvas.
#[wasm_bindgen]
pub fn stop_animation() {
    FRAME_LOOP.with(|slot| {
        if let Some(handle) = slot.borrow_mut().take() {
            handle.stop();
        }
    });
}

fn load_config() -> SceneConfig {
    let mut config = SceneConfig::default();
    if let Some(query) = dom::query_string() {
        if let Err(e) = config.apply_query(&query) {
            log::warn!("[config] ignoring query overrides: {}", e);
        }
    }
    config
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);
    {
        let canvas_resize = canvas.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        if let Some(w) = web::window() {
            w.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())
                .ok();
        }
        resize_closure.forget();
    }

    let config = load_config();

    // without a device nothing is wired and the page stays inert
    let gpu = frame::init_gpu(&canvas).await?;

    let scene = Scene::new(&config);
    let driver = Rc::new(RefCell::new(FrameDriver::new(
        scene,
        canvas.width(),
        canvas.height(),
    )));

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        driver: driver.clone(),
        drag_state: Rc::new(RefCell::new(input::DragState::default())),
    });

    let handle = frame::start_loop(frame::FrameContext {
        driver,
        gpu,
        canvas,
    });
    FRAME_LOOP.with(|slot| *slot.borrow_mut() = Some(handle));
    log::info!("[init] animation loop started");
    Ok(())
}
