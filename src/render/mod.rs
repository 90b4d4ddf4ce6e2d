//! Markup rendering — escaping, theme styles, and the step partials.

pub mod escape;
pub mod styles;
pub mod view;

pub use escape::{escape, EscapeContext};
pub use styles::render_styles;
pub use view::{render_step, render_vacation_view, render_widget, RenderInput};
