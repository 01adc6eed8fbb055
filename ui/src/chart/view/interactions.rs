use gpui::{MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, ScrollWheelEvent, Window, px};
use tracing::info;

use super::ChartView;

/// Pointer travel (px) above which a press counts as a drag, not a click.
const CLICK_SLOP: f32 = 3.0;

impl ChartView {
    pub(super) fn handle_scroll(&mut self, event: &ScrollWheelEvent, window: &mut Window) {
        if self.data.axis.is_empty() {
            return;
        }
        let delta = event.delta.pixel_delta(px(16.0));
        let scroll_y = f32::from(delta.y);
        if scroll_y.abs() < f32::EPSILON {
            return;
        }
        self.viewport.zoom_by(scroll_y, self.data.axis.len());
        self.refresh_value_bounds();
        self.hover_at(f32::from(event.position.x), f32::from(event.position.y));
        window.refresh();
    }

    pub(super) fn handle_mouse_down(&mut self, event: &MouseDownEvent, window: &mut Window) {
        if event.button != MouseButton::Left {
            return;
        }
        self.dragging = true;
        self.drag_moved = false;
        self.last_drag_position = Some((f32::from(event.position.x), f32::from(event.position.y)));
        window.refresh();
    }

    pub(super) fn handle_mouse_up(&mut self, event: &MouseUpEvent, window: &mut Window) {
        let was_click = self.dragging && !self.drag_moved;
        self.dragging = false;
        self.drag_moved = false;
        self.last_drag_position = None;

        let inside = self.plot_bounds().is_some_and(|b| {
            b.contains(f32::from(event.position.x), f32::from(event.position.y))
        });
        if was_click && inside && self.click() {
            info!(
                time = ?self.hover.time(),
                items = self.detail.items().len(),
                "news list updated"
            );
        }
        window.refresh();
    }

    pub(super) fn handle_hover(&mut self, event: &MouseMoveEvent) {
        if self.dragging {
            return;
        }
        self.hover_at(f32::from(event.position.x), f32::from(event.position.y));
    }

    /// Pointer left the window. Returns whether anything was cleared.
    pub(super) fn handle_pointer_exit(&mut self) -> bool {
        if !self.hover.is_shown() {
            return false;
        }
        self.clear_hover();
        true
    }

    pub(super) fn handle_drag(&mut self, event: &MouseMoveEvent, window: &mut Window) {
        if !self.dragging || self.data.axis.is_empty() {
            window.refresh();
            return;
        }
        if event.pressed_button != Some(MouseButton::Left) {
            self.dragging = false;
            self.last_drag_position = None;
            window.refresh();
            return;
        }

        if let Some((last_x, last_y)) = self.last_drag_position {
            let dx = f32::from(event.position.x) - last_x;
            let dy = f32::from(event.position.y) - last_y;
            if !self.drag_moved && dx.abs().max(dy.abs()) < CLICK_SLOP {
                return;
            }
            self.drag_moved = true;
            self.clear_hover();
            let width = self
                .chart_bounds
                .map(|b| f32::from(b.size.width).max(1.0))
                .unwrap_or(1.0);
            self.viewport.pan_by(dx, width, self.data.axis.len());
            self.refresh_value_bounds();
        }

        self.last_drag_position = Some((f32::from(event.position.x), f32::from(event.position.y)));
        window.refresh();
    }
}
