mod receipt_classic;
mod receipt_thermal;

pub use receipt_classic::ReceiptClassicTemplate;
pub use receipt_thermal::ReceiptThermalTemplate;
