/// Chart layer: plain-data chart description and its raster output.
///
/// ```text
///   Dataset ──render_series──▶ Chart ──apply_styling──▶ Chart ──save──▶ plot.png
/// ```

pub mod model;
pub mod render;
