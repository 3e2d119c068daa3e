use crate::core::catalog::CatalogVariant;
use crate::domain::model::ContactInfo;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "renovivo-quote")]
#[command(about = "Renovation price calculator and offer generator")]
pub struct CliConfig {
    /// Floor area in square meters; moved into the slider range 10-500
    #[arg(long)]
    pub area: Option<u32>,

    /// Room type id (default from the TOML file, else "apartment")
    #[arg(long)]
    pub room: Option<String>,

    /// Renovation tier id (default from the TOML file, else "standard")
    #[arg(long)]
    pub tier: Option<String>,

    /// Add-on services, comma separated (e.g. electrical,plumbing)
    #[arg(long, value_delimiter = ',')]
    pub services: Vec<String>,

    /// Built-in tier catalog; overrides the TOML file's variant
    #[arg(long, value_enum)]
    pub variant: Option<CatalogVariant>,

    /// Path to a TOML catalog/branding file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Render the offer document and save it to --output-dir
    #[arg(long)]
    pub offer: bool,

    #[arg(long, default_value = ".")]
    pub output_dir: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Send the contact form (name, phone and email are required)
    #[arg(long)]
    pub submit: bool,

    /// Print the breakdown as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    pub fn contact_info(&self) -> ContactInfo {
        ContactInfo::new(
            self.name.clone().unwrap_or_default(),
            self.phone.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
        )
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(room) = &self.room {
            validate_non_empty_string("room", room)?;
        }
        if let Some(tier) = &self.tier {
            validate_non_empty_string("tier", tier)?;
        }
        if self.offer {
            validate_path("output_dir", &self.output_dir)?;
        }
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        Ok(())
    }
}
