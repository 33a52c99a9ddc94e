pub mod import;
pub mod misc;
pub mod payables;
pub mod receipts;
pub mod reports;
pub mod sales;
