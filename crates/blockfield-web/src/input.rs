use blockfield_core::pixels_to_ndc;
use glam::Vec2;
use web_sys as web;

#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub last_x: f32,
    pub last_y: f32,
}

// ---------------- Pointer helpers ----------------
/// Pointer position in CSS pixels relative to the canvas, plus the canvas CSS size.
#[inline]
pub fn pointer_canvas_css(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> (Vec2, Vec2) {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    (
        Vec2::new(x_css, y_css),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    )
}

#[inline]
pub fn pointer_ndc(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let (pos, size) = pointer_canvas_css(ev, canvas);
    pixels_to_ndc(pos.x, pos.y, size.x, size.y)
}
