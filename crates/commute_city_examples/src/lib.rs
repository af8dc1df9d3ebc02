#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{
    init_tracing, pixels_to_image, render_city, render_city_to_png, Overlay, RenderConfig,
};
