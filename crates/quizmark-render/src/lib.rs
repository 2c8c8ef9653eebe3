//! quizmark-render: HTML output for quizmark.
//!
//! [`HtmlSurface`] draws session views into per-container HTML fragments.
//! The [`html`] module also builds standalone pages: a preview of a whole
//! quiz for authors and a results page for a finished session.

pub mod html;
pub mod surface;

pub use html::{generate_preview_html, generate_results_html, write_html};
pub use surface::HtmlSurface;
