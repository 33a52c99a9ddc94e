pub mod generator;
pub mod layout;

pub use generator::{render_receipt_form, PdfGenerator};
pub use layout::FormLayout;
