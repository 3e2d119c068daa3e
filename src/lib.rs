pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalDownloads, toml_config::TomlConfig};
pub use core::{
    catalog::{Catalog, CatalogVariant},
    contact::{submit_contact, SimulatedContactGateway},
    offer::{save_offer, OfferDocument, OfferDocumentFormatter},
    pricing::PriceEngine,
    session::{QuoteSession, SelectionEvent},
};
pub use domain::model::{ContactInfo, PriceBreakdown, SelectionState};
pub use utils::error::{QuoteError, Result};
