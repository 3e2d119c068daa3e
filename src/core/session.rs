use crate::core::catalog::Catalog;
use crate::core::pricing;
use crate::domain::model::{ContactInfo, PriceBreakdown, SelectionState, MAX_AREA, MIN_AREA};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// User input coming from the calculator controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// Slider value; clamped to the slider range before it reaches the state.
    AreaChanged(u32),
    RoomTypeSelected(String),
    TierSelected(String),
    ServiceToggled(String),
    /// Opens a tier's detail panel, or closes it if it is already open.
    TierDetailsToggled(String),
    ContactChanged(ContactInfo),
}

/// Owns the selection for one visitor and keeps the breakdown in step with it.
#[derive(Debug, Clone)]
pub struct QuoteSession {
    catalog: Catalog,
    state: SelectionState,
    breakdown: PriceBreakdown,
}

impl QuoteSession {
    pub fn new(catalog: Catalog) -> Result<Self> {
        Self::with_state(catalog, SelectionState::default())
    }

    pub fn with_state(catalog: Catalog, state: SelectionState) -> Result<Self> {
        let breakdown = pricing::compute(&state, &catalog)?;
        Ok(Self {
            catalog,
            state,
            breakdown,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn breakdown(&self) -> &PriceBreakdown {
        &self.breakdown
    }

    /// Applies one event and recomputes the breakdown.
    ///
    /// A room or tier id missing from the catalog leaves the session untouched.
    pub fn apply(&mut self, event: SelectionEvent) -> Result<&PriceBreakdown> {
        tracing::debug!("Applying selection event: {:?}", event);

        let mut next = self.state.clone();
        match event {
            SelectionEvent::AreaChanged(area) => {
                next.area = area.clamp(MIN_AREA, MAX_AREA);
            }
            SelectionEvent::RoomTypeSelected(id) => {
                next.room_type = id;
            }
            SelectionEvent::TierSelected(id) => {
                next.renovation_tier = id;
            }
            SelectionEvent::ServiceToggled(id) => {
                if !next.selected_service_ids.remove(&id) {
                    next.selected_service_ids.insert(id);
                }
            }
            SelectionEvent::TierDetailsToggled(id) => {
                next.expanded_tier_id = match next.expanded_tier_id.take() {
                    Some(open) if open == id => None,
                    _ => Some(id),
                };
            }
            SelectionEvent::ContactChanged(contact) => {
                next.contact_info = contact;
            }
        }

        let breakdown = pricing::compute(&next, &self.catalog)?;
        self.state = next;
        self.breakdown = breakdown;
        Ok(&self.breakdown)
    }

    pub fn apply_all<I>(&mut self, events: I) -> Result<&PriceBreakdown>
    where
        I: IntoIterator<Item = SelectionEvent>,
    {
        for event in events {
            self.apply(event)?;
        }
        Ok(&self.breakdown)
    }
}
