use crate::core::catalog::{self, Catalog, CatalogVariant};
use crate::core::contact::DEFAULT_SIMULATED_DELAY;
use crate::domain::model::{
    AddOnService, Branding, RenovationTier, RoomType, SelectionState, DEFAULT_AREA,
    DEFAULT_RENOVATION_TIER, DEFAULT_ROOM_TYPE, MAX_AREA, MIN_AREA,
};
use crate::utils::error::{QuoteError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative, validate_positive_price, validate_range,
    validate_unique_ids, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub business: Option<BusinessConfig>,
    #[serde(default)]
    pub catalog: CatalogConfig,
    pub defaults: Option<DefaultsConfig>,
    pub contact: Option<ContactConfig>,
}

/// 品牌資訊，未填的欄位沿用預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessConfig {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub phone: Option<String>,
    pub domain: Option<String>,
    pub currency_suffix: Option<String>,
    pub area_unit: Option<String>,
}

/// Either a built-in `variant` or an explicit `tiers` list; never both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub variant: Option<String>,
    pub rooms: Option<Vec<RoomType>>,
    pub tiers: Option<Vec<RenovationTier>>,
    pub services: Option<Vec<AddOnService>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub area: Option<u32>,
    pub room_type: Option<String>,
    pub renovation_tier: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactConfig {
    pub simulated_delay_ms: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuoteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QuoteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RENOVIVO_PHONE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QuoteError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn variant(&self) -> Result<Option<CatalogVariant>> {
        self.catalog
            .variant
            .as_deref()
            .map(str::parse::<CatalogVariant>)
            .transpose()
    }

    /// Builds the catalog. Lists given in the file replace the built-in ones
    /// wholesale; entries are never merged across sources.
    pub fn catalog(&self) -> Result<Catalog> {
        let variant = self.variant()?;
        if variant.is_some() && self.catalog.tiers.is_some() {
            return Err(QuoteError::ConfigValidationError {
                field: "catalog".to_string(),
                message: "Specify either 'variant' or an explicit 'tiers' list, not both"
                    .to_string(),
            });
        }

        let tiers = match (&self.catalog.tiers, variant) {
            (Some(tiers), _) => tiers.clone(),
            (None, Some(CatalogVariant::Detailed)) => catalog::detailed_tiers(),
            (None, _) => catalog::classic_tiers(),
        };
        let rooms = self
            .catalog
            .rooms
            .clone()
            .unwrap_or_else(catalog::default_rooms);
        let services = self
            .catalog
            .services
            .clone()
            .unwrap_or_else(catalog::default_services);

        Ok(Catalog::new(rooms, tiers, services))
    }

    pub fn branding(&self) -> Branding {
        let mut branding = Branding::default();
        if let Some(business) = &self.business {
            let fields = [
                (&business.name, &mut branding.business_name),
                (&business.tagline, &mut branding.tagline),
                (&business.phone, &mut branding.phone),
                (&business.domain, &mut branding.domain),
                (&business.currency_suffix, &mut branding.currency_suffix),
                (&business.area_unit, &mut branding.area_unit),
            ];
            for (value, slot) in fields {
                if let Some(value) = value {
                    *slot = value.clone();
                }
            }
        }
        branding
    }

    /// Selection a new session starts from.
    pub fn initial_state(&self) -> SelectionState {
        let defaults = self.defaults.clone().unwrap_or_default();
        SelectionState::new(
            defaults.area.unwrap_or(DEFAULT_AREA),
            defaults
                .room_type
                .unwrap_or_else(|| DEFAULT_ROOM_TYPE.to_string()),
            defaults
                .renovation_tier
                .unwrap_or_else(|| DEFAULT_RENOVATION_TIER.to_string()),
        )
    }

    pub fn simulated_delay(&self) -> Duration {
        self.contact
            .as_ref()
            .and_then(|c| c.simulated_delay_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SIMULATED_DELAY)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let catalog = self.catalog()?;

        validate_unique_ids("catalog.rooms", catalog.rooms.iter().map(|r| r.id.as_str()))?;
        validate_unique_ids("catalog.tiers", catalog.tiers.iter().map(|t| t.id.as_str()))?;
        validate_unique_ids(
            "catalog.services",
            catalog.services.iter().map(|s| s.id.as_str()),
        )?;

        for room in &catalog.rooms {
            validate_non_negative(&format!("catalog.rooms.{}", room.id), room.area_multiplier)?;
        }
        for tier in &catalog.tiers {
            validate_positive_price(&format!("catalog.tiers.{}", tier.id), tier.price_per_sqm)?;
        }
        for service in &catalog.services {
            validate_positive_price(
                &format!("catalog.services.{}", service.id),
                service.price_per_sqm,
            )?;
        }

        if let Some(business) = &self.business {
            for (field, value) in [
                ("business.name", &business.name),
                ("business.phone", &business.phone),
                ("business.domain", &business.domain),
                ("business.currency_suffix", &business.currency_suffix),
            ] {
                if let Some(value) = value {
                    validate_non_empty_string(field, value)?;
                }
            }
        }

        // 預設選項必須存在於目錄中
        let state = self.initial_state();
        validate_range("defaults.area", state.area, MIN_AREA, MAX_AREA)?;
        if catalog.room(&state.room_type).is_err() {
            return Err(QuoteError::MissingConfigError {
                field: format!("catalog.rooms.{}", state.room_type),
            });
        }
        if catalog.tier(&state.renovation_tier).is_err() {
            return Err(QuoteError::MissingConfigError {
                field: format!("catalog.tiers.{}", state.renovation_tier),
            });
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
