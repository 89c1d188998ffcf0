//! Form rendering module
//!
//! - `field_renderer`: one control per field type
//! - `form_view`: section header, progress, fields and the actions row

mod field_renderer;
mod form_view;

pub use field_renderer::draw_text_input;
pub use form_view::draw as draw_form;
