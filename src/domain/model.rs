use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 面積滑桿的範圍（平方公尺）
pub const MIN_AREA: u32 = 10;
pub const MAX_AREA: u32 = 500;
pub const DEFAULT_AREA: u32 = 60;

pub const DEFAULT_ROOM_TYPE: &str = "apartment";
pub const DEFAULT_RENOVATION_TIER: &str = "standard";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: String,
    pub name: String,
    pub area_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenovationTier {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_per_sqm: f64,
    /// Free-text range such as "3-5 седмици". Only the detailed catalog carries it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOnService {
    pub id: String,
    pub name: String,
    pub price_per_sqm: f64,
    /// Icon name for the front end; never used in pricing.
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl ContactInfo {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// 空白字元視同未填
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.phone, &self.email]
            .iter()
            .all(|value| value.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub area: u32,
    pub room_type: String,
    pub renovation_tier: String,
    pub selected_service_ids: BTreeSet<String>,
    /// 展開細節面板的等級，只影響畫面
    pub expanded_tier_id: Option<String>,
    pub contact_info: ContactInfo,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            area: DEFAULT_AREA,
            room_type: DEFAULT_ROOM_TYPE.to_string(),
            renovation_tier: DEFAULT_RENOVATION_TIER.to_string(),
            selected_service_ids: BTreeSet::new(),
            expanded_tier_id: None,
            contact_info: ContactInfo::default(),
        }
    }
}

impl SelectionState {
    pub fn new(area: u32, room_type: impl Into<String>, renovation_tier: impl Into<String>) -> Self {
        Self {
            area,
            room_type: room_type.into(),
            renovation_tier: renovation_tier.into(),
            ..Self::default()
        }
    }

    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_service_ids = services.into_iter().map(Into::into).collect();
        self
    }
}

/// Every field is rounded on its own from the unrounded intermediate values,
/// so `total` can be off by one from `base_price + add_on_price - discount`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: i64,
    pub add_on_price: i64,
    pub discount: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branding {
    pub business_name: String,
    pub tagline: String,
    pub phone: String,
    pub domain: String,
    pub currency_suffix: String,
    pub area_unit: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            business_name: "Renovivo".to_string(),
            tagline: "Every detail matters.".to_string(),
            phone: "+359 89 371 29 19".to_string(),
            domain: "renovivo.bg".to_string(),
            currency_suffix: "лв".to_string(),
            area_unit: "м²".to_string(),
        }
    }
}
