mod interactions;
mod overlay;
mod render;
mod state;

pub(crate) use state::ChartView;

/// Width of the left value scale, shared by layout and tooltip placement.
pub(crate) const PRICE_AXIS_WIDTH: f32 = 82.0;
