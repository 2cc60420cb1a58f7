//! External rendering collaborator: rows in, HTML document out.

pub mod html;

pub use html::render_html_report;
