use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trip record. Wire field names are camelCase to match the public API
/// (`perPerson`), everything else is a straight rename.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    /// Unique, caller-assigned trip code (e.g. "GALR210214").
    pub code: String,
    pub name: String,
    /// Duration, free-form (e.g. "4 nights / 5 days").
    pub length: String,
    pub start: DateTime<Utc>,
    pub resort: String,
    #[serde(rename = "perPerson")]
    pub per_person: String,
    /// Public URL of the trip-cover image; empty until an upload completes.
    #[serde(default)]
    pub image: String,
    pub description: String,
}

/// Response body of a successful image upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedImage {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn trip_serializes_with_wire_names() {
        let trip = Trip {
            code: "GALR210214".to_string(),
            name: "Gale Reef".to_string(),
            length: "4 nights / 5 days".to_string(),
            start: Utc.with_ymd_and_hms(2026, 2, 14, 8, 0, 0).unwrap(),
            resort: "Emerald Bay, Marigot Bay".to_string(),
            per_person: "799.00".to_string(),
            image: String::new(),
            description: "Gale Reef trip".to_string(),
        };

        let json = serde_json::to_value(&trip).unwrap();
        assert_eq!(json["perPerson"], "799.00");
        assert!(json.get("per_person").is_none());
    }

    #[test]
    fn trip_deserializes_without_image() {
        let json = serde_json::json!({
            "code": "GALR210214",
            "name": "Gale Reef",
            "length": "4 nights / 5 days",
            "start": "2026-02-14T08:00:00Z",
            "resort": "Emerald Bay",
            "perPerson": "799.00",
            "description": "Gale Reef trip"
        });
        let trip: Trip = serde_json::from_value(json).unwrap();
        assert!(trip.image.is_empty());
    }
}
