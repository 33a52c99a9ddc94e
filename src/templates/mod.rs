pub mod helpers;
pub mod template_trait;
pub mod templates;

pub use template_trait::{utils, TemplateRegistry, TypstTemplate};
