use blockfield_core::{pixels_to_ndc, FrameDriver, GpuState, Scene, SceneConfig};
use glam::Vec2;
use winit::{
    dpi::PhysicalSize,
    event::*,
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

#[derive(Default)]
struct PointerTracker {
    position: Option<Vec2>,
    dragging: bool,
}

fn load_config() -> SceneConfig {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = SceneConfig::default();
    if let Err(e) = config.apply_args(&args) {
        log::warn!("[config] ignoring command-line overrides: {}", e);
    }
    config
}

fn viewport(window: &Window) -> PhysicalSize<u32> {
    let size = window.inner_size();
    PhysicalSize::new(size.width.max(1), size.height.max(1))
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = load_config();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Blockfield (native)")
        .build(&event_loop)?;
    let window = &window;

    let size = viewport(window);
    let mut gpu = match pollster::block_on(GpuState::new(window, size.width, size.height)) {
        Ok(gpu) => gpu,
        Err(e) => {
            log::error!("init error: {:?}", e);
            return Err(e);
        }
    };
    let mut driver = FrameDriver::new(Scene::new(&config), size.width, size.height);
    let mut pointer = PointerTracker::default();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => driver.resize(&mut gpu, size.width, size.height),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                let size = viewport(window);
                let pos = Vec2::new(position.x as f32, position.y as f32);
                if pointer.dragging {
                    if let Some(prev) = pointer.position {
                        let d = pos - prev;
                        driver
                            .controls
                            .rotate_by_pixels(d.x, d.y, size.height as f32);
                    }
                }
                pointer.position = Some(pos);
                driver.pointer_moved(pixels_to_ndc(
                    pos.x,
                    pos.y,
                    size.width as f32,
                    size.height as f32,
                ));
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => pointer.dragging = true,
                ElementState::Released => {
                    pointer.dragging = false;
                    // a press/release pair is a click, as in the browser
                    driver.click();
                }
            },
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scroll-up as positive; the controls expect DOM deltaY
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y,
                    MouseScrollDelta::PixelDelta(p) => -p.y as f32,
                };
                driver.controls.zoom_by_wheel(dy);
            }
            _ => {}
        },
        Event::AboutToWait => {
            if let Err(e) = driver.frame(&mut gpu) {
                log::error!("[frame] render error: {:?}", e);
            }
            window.request_redraw();
        }
        _ => {}
    })?;
    Ok(())
}
