pub mod api;
pub mod core;
pub mod finance;
pub mod models;
pub mod pdf;
pub mod pix;
pub mod storage;
pub mod templates;
