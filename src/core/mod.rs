pub mod catalog;
pub mod contact;
pub mod offer;
pub mod pricing;
pub mod session;

pub use crate::domain::model::{PriceBreakdown, SelectionState};
pub use crate::domain::ports::{ContactGateway, DocumentSink};
pub use crate::utils::error::Result;
