pub mod config;
pub mod error;

pub use config::{Margin, Orientation, PageSize, PdfConfig};
pub use error::{DomainError, DomainResult};
