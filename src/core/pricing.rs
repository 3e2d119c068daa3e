use crate::core::catalog::Catalog;
use crate::domain::model::{PriceBreakdown, SelectionState};
use crate::utils::error::Result;

/// 小計超過此金額才給折扣
pub const DISCOUNT_THRESHOLD: f64 = 20_000.0;
pub const DISCOUNT_RATE: f64 = 0.05;

/// Label shown next to the discount line, e.g. `5%`.
pub fn discount_percent_label() -> String {
    format!("{}%", DISCOUNT_RATE * 100.0)
}

/// Round half up toward positive infinity (`floor(x + 0.5)`).
///
/// For non-negative amounts this is the same as rounding ties away from zero.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[derive(Debug, Clone)]
pub struct PriceEngine {
    catalog: Catalog,
}

impl PriceEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn compute(&self, state: &SelectionState) -> Result<PriceBreakdown> {
        compute(state, &self.catalog)
    }
}

/// Maps a selection to its price breakdown.
///
/// `area` is taken as-is: the slider bounds are the caller's business.
/// Unknown add-on ids contribute nothing.
pub fn compute(state: &SelectionState, catalog: &Catalog) -> Result<PriceBreakdown> {
    let room = catalog.room(&state.room_type)?;
    let tier = catalog.tier(&state.renovation_tier)?;
    let area = f64::from(state.area);

    let base_price = area * tier.price_per_sqm * room.area_multiplier;

    let add_on_price = state
        .selected_service_ids
        .iter()
        .fold(0.0, |total, id| match catalog.service(id) {
            Some(service) => total + area * service.price_per_sqm,
            None => {
                tracing::warn!("Ignoring unknown add-on service '{}'", id);
                total
            }
        });

    let subtotal = base_price + add_on_price;
    let discount = if subtotal > DISCOUNT_THRESHOLD {
        subtotal * DISCOUNT_RATE
    } else {
        0.0
    };
    let total = subtotal - discount;

    // 四個欄位各自四捨五入，不能用已取整的值回推 total
    let breakdown = PriceBreakdown {
        base_price: round_half_up(base_price),
        add_on_price: round_half_up(add_on_price),
        discount: round_half_up(discount),
        total: round_half_up(total),
    };

    tracing::debug!(
        area = state.area,
        room = %room.id,
        tier = %tier.id,
        services = state.selected_service_ids.len(),
        "Recomputed breakdown: {:?}",
        breakdown
    );

    Ok(breakdown)
}
