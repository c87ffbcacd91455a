// Live preview: normalize the resume, pick a template and colours, render HTML.

pub mod compose;
pub mod handlers;
pub mod normalize;
pub mod render;
