//! Response schemas handed to the model with each prompt
//!
//! Gemini expects the OpenAPI subset with upper-case type names.

use serde_json::{Value, json};

fn text(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

pub fn itinerary() -> Value {
    let activity = json!({
        "type": "OBJECT",
        "properties": {
            "time": text("Time of the activity, e.g. '9:00 AM' or 'Afternoon'"),
            "description": text("Detailed description of the activity"),
            "duration": text("Estimated duration, e.g. '2 hours'"),
            "cost": text("Estimated cost with currency symbol"),
            "notes": text("Additional tips"),
            "address": text("Address or place name a map service can locate")
        },
        "required": ["description"]
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "itinerary": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": text("Day number or title, e.g. 'Day 1' or 'Arrival Day'"),
                        "theme": text("Theme of the day"),
                        "summary": text("Brief overview of the day"),
                        "activities": { "type": "ARRAY", "items": activity },
                        "estimatedDayCost": text("Estimated total cost for the day"),
                        "travelNotes": text("Transportation notes for the day")
                    },
                    "required": ["day", "activities"]
                }
            }
        },
        "required": ["itinerary"]
    })
}

pub fn suggestions() -> Value {
    let places = json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": text("Name of the place"),
                "description": text("One or two sentences on why it fits the trip")
            },
            "required": ["name"]
        }
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "hotels": places,
            "restaurants": places,
            "activities": places
        },
        "required": ["hotels", "restaurants", "activities"]
    })
}

pub fn packing_list() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "items": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": text("Item name, e.g. 'Rain Jacket'"),
                        "reason": text("Why the item matters for this trip"),
                        "iconHint": text("Single icon name, e.g. 'Umbrella'"),
                        "shoppingQuery": text("Concise online shopping search query")
                    },
                    "required": ["name", "reason"]
                }
            }
        },
        "required": ["items"]
    })
}
