use crate::domain::model::{AddOnService, RenovationTier, RoomType};
use crate::utils::error::{QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in tier catalog snapshots. They disagree on tier ids, so a catalog
/// always comes from exactly one of them (or from an explicit TOML list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CatalogVariant {
    /// cosmetic / standard / premium / luxury, no duration or included work
    #[default]
    Classic,
    /// cosmetic / standard / major / premium, with duration and included work
    Detailed,
}

impl fmt::Display for CatalogVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogVariant::Classic => write!(f, "classic"),
            CatalogVariant::Detailed => write!(f, "detailed"),
        }
    }
}

impl FromStr for CatalogVariant {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(CatalogVariant::Classic),
            "detailed" => Ok(CatalogVariant::Detailed),
            other => Err(QuoteError::InvalidConfigValueError {
                field: "catalog.variant".to_string(),
                value: other.to_string(),
                reason: "Valid variants: classic, detailed".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub rooms: Vec<RoomType>,
    pub tiers: Vec<RenovationTier>,
    pub services: Vec<AddOnService>,
}

impl Catalog {
    pub fn new(
        rooms: Vec<RoomType>,
        tiers: Vec<RenovationTier>,
        services: Vec<AddOnService>,
    ) -> Self {
        Self {
            rooms,
            tiers,
            services,
        }
    }

    pub fn builtin(variant: CatalogVariant) -> Self {
        let tiers = match variant {
            CatalogVariant::Classic => classic_tiers(),
            CatalogVariant::Detailed => detailed_tiers(),
        };
        Self::new(default_rooms(), tiers, default_services())
    }

    pub fn room(&self, id: &str) -> Result<&RoomType> {
        self.rooms
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| QuoteError::config(format!("unknown room type '{}'", id)))
    }

    pub fn tier(&self, id: &str) -> Result<&RenovationTier> {
        self.tiers
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| QuoteError::config(format!("unknown renovation tier '{}'", id)))
    }

    /// Unknown service ids are not an error anywhere in the pricing path.
    pub fn service(&self, id: &str) -> Option<&AddOnService> {
        self.services.iter().find(|s| s.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin(CatalogVariant::default())
    }
}

fn room(id: &str, name: &str, area_multiplier: f64) -> RoomType {
    RoomType {
        id: id.to_string(),
        name: name.to_string(),
        area_multiplier,
    }
}

fn service(id: &str, name: &str, price_per_sqm: f64, icon: &str) -> AddOnService {
    AddOnService {
        id: id.to_string(),
        name: name.to_string(),
        price_per_sqm,
        icon: icon.to_string(),
    }
}

fn tier(
    id: &str,
    name: &str,
    description: &str,
    price_per_sqm: f64,
    duration: Option<&str>,
    included: &[&str],
) -> RenovationTier {
    RenovationTier {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price_per_sqm,
        duration: duration.map(str::to_string),
        included: included.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn default_rooms() -> Vec<RoomType> {
    vec![
        room("apartment", "Апартамент", 1.0),
        room("house", "Къща", 1.15),
        room("office", "Офис", 0.9),
        room("bathroom", "Баня", 1.4),
        room("kitchen", "Кухня", 1.25),
    ]
}

pub fn default_services() -> Vec<AddOnService> {
    vec![
        service("electrical", "Електро инсталация", 25.0, "zap"),
        service("plumbing", "ВиК инсталация", 30.0, "droplets"),
        service("flooring", "Подови настилки", 45.0, "home"),
        service("painting", "Боядисване", 15.0, "paintbrush"),
        service("demolition", "Демонтаж", 20.0, "wrench"),
    ]
}

pub fn classic_tiers() -> Vec<RenovationTier> {
    vec![
        tier("cosmetic", "Козметичен", "Боядисване, малки поправки", 80.0, None, &[]),
        tier("standard", "Стандартен", "Пълен ремонт без преустройство", 180.0, None, &[]),
        tier("premium", "Премиум", "Цялостен ремонт с дизайн", 320.0, None, &[]),
        tier("luxury", "Лукс", "Ексклузивни материали и решения", 550.0, None, &[]),
    ]
}

pub fn detailed_tiers() -> Vec<RenovationTier> {
    vec![
        tier(
            "cosmetic",
            "Козметичен",
            "Боядисване, малки поправки",
            80.0,
            Some("1-2 седмици"),
            &[
                "Шпакловка и боядисване на стени и тавани",
                "Дребни поправки по мазилката",
                "Подмяна на ключове и контакти",
                "Почистване след ремонта",
            ],
        ),
        tier(
            "standard",
            "Стандартен",
            "Пълен ремонт без преустройство",
            180.0,
            Some("3-5 седмици"),
            &[
                "Всичко от козметичния ремонт",
                "Нова мазилка и шпакловка",
                "Подмяна на подови настилки",
                "Подмяна на интериорни врати",
                "Частично обновяване на инсталациите",
            ],
        ),
        tier(
            "major",
            "Основен",
            "Цялостен ремонт с преустройство",
            320.0,
            Some("6-10 седмици"),
            &[
                "Всичко от стандартния ремонт",
                "Премахване и изграждане на стени",
                "Нова електро и ВиК инсталация",
                "Гипсокартонни конструкции",
                "Технически надзор",
            ],
        ),
        tier(
            "premium",
            "Премиум",
            "Ексклузивни материали и дизайн",
            550.0,
            Some("10-16 седмици"),
            &[
                "Всичко от основния ремонт",
                "Индивидуален интериорен проект",
                "Материали от премиум клас",
                "Персонален ръководител на проекта",
                "Удължена гаранция",
            ],
        ),
    ]
}
