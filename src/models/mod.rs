pub mod catalog;
pub mod financing;
pub mod payable;
pub mod receipt;
pub mod report;
pub mod sale;

pub use catalog::{ImportSummary, LensRecord, Product};
pub use financing::{Financing, Installment, InstallmentStatus, SettleStrategy};
pub use payable::{Bill, BillInput, BillStatus, PayBillInput, PaymentSource};
pub use receipt::{ReceiptBundle, ReceiptContext};
pub use report::SalesReportRow;
pub use sale::{Customer, ItemKind, Payment, Sale, SaleBundle, SaleItem, SaleStatus};
