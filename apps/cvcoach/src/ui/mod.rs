//! Presentation: a pure mapping from the session to a page.

pub mod templates;
pub mod view;

pub use templates::render_page;
