//! Fixed-size packing list generation

use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use super::TripPlanner;
use crate::models::{PackingList, PackingListItem, PackingListRequest};
use crate::prompts::{self, schemas};

/// Every packing list has exactly this many items
pub const PACKING_LIST_SIZE: usize = 5;

/// Generic essentials used, in order, to fill a short list
pub const FALLBACK_ITEMS: [(&str, &str, &str, &str); PACKING_LIST_SIZE] = [
    (
        "Universal Travel Adapter",
        "Keeps your devices charged whatever the local plug type.",
        "Plug",
        "universal travel adapter",
    ),
    (
        "Reusable Water Bottle",
        "Stay hydrated while exploring and cut down on plastic.",
        "GlassWater",
        "collapsible reusable water bottle",
    ),
    (
        "Portable Power Bank",
        "Long days of maps and photos drain a phone battery fast.",
        "BatteryCharging",
        "compact portable power bank",
    ),
    (
        "Basic First-Aid Kit",
        "Handles blisters, headaches and small cuts on the go.",
        "BriefcaseMedical",
        "travel first aid kit",
    ),
    (
        "Comfortable Walking Shoes",
        "Most sightseeing happens on foot.",
        "Footprints",
        "comfortable walking shoes travel",
    ),
];

fn fallback_item(index: usize) -> Option<PackingListItem> {
    FALLBACK_ITEMS
        .get(index)
        .map(|&(name, reason, icon, query)| PackingListItem::new(name, reason, Some(icon), Some(query)))
}

/// Pad from the fallback pool or truncate so exactly [`PACKING_LIST_SIZE`] items remain
///
/// The generated items keep their order; padding takes pool items in pool
/// order, with no de-duplication by name.
#[must_use]
pub fn normalize_packing_list(mut items: Vec<PackingListItem>) -> Vec<PackingListItem> {
    items.truncate(PACKING_LIST_SIZE);
    let missing = PACKING_LIST_SIZE - items.len();
    items.extend((0..missing).filter_map(fallback_item));
    items
}

#[derive(Debug, Deserialize)]
struct RawPackingList {
    items: Vec<PackingListItem>,
}

impl TripPlanner {
    /// Exactly five items, falling back to generic essentials when generation falls short
    #[instrument(skip(self, request), fields(destination = %request.destination))]
    pub async fn generate_packing_list(&self, request: &PackingListRequest) -> PackingList {
        let context = json!({
            "destination": request.destination,
            "interests": request.interests,
            "number_of_days": request.number_of_days,
            "weather_summary": request.weather_summary,
            "item_count": PACKING_LIST_SIZE,
        });

        let (generated, error) = match self
            .generate::<RawPackingList, _>(prompts::PACKING_LIST, &context, schemas::packing_list())
            .await
        {
            Ok(raw) => (raw.items, None),
            Err(e) => {
                warn!(
                    error = %e,
                    schema_violation = e.is_schema_violation(),
                    "packing list generation failed, using essentials"
                );
                (Vec::new(), Some(format!("Could not generate a packing list. {e}")))
            }
        };

        let generated_count = generated.len();
        if generated_count != PACKING_LIST_SIZE {
            info!(generated_count, "normalizing packing list length");
        }

        PackingList {
            items: normalize_packing_list(generated),
            error,
        }
    }
}
