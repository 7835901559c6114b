//! Target area resolution and the subzone table.

use crate::{config::WebhookFeatures, models::Coordinates};

/// Area used when nothing narrower is known; selects island-wide forecasts
pub const AREA_SINGAPORE: &str = "Singapore";

/// A 2-hour forecast area and its label location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subzone {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

const fn subzone(name: &'static str, latitude: f64, longitude: f64) -> Subzone {
    Subzone {
        name,
        latitude,
        longitude,
    }
}

/// Forecast areas published by the 2-hour forecast endpoint, in the order
/// of its `area_metadata`.
pub static SUBZONES: &[Subzone] = &[
    subzone("Ang Mo Kio", 1.375, 103.839),
    subzone("Bedok", 1.321, 103.924),
    subzone("Bishan", 1.350772, 103.839),
    subzone("Boon Lay", 1.304, 103.701),
    subzone("Bukit Batok", 1.353, 103.754),
    subzone("Bukit Merah", 1.277, 103.819),
    subzone("Bukit Panjang", 1.362, 103.77195),
    subzone("Bukit Timah", 1.325, 103.791),
    subzone("Central Water Catchment", 1.38, 103.805),
    subzone("Changi", 1.357, 103.987),
    subzone("Choa Chu Kang", 1.377, 103.745),
    subzone("Clementi", 1.315, 103.76),
    subzone("City", 1.292, 103.844),
    subzone("Geylang", 1.318, 103.884),
    subzone("Hougang", 1.361218, 103.886),
    subzone("Jalan Bahar", 1.347, 103.67),
    subzone("Jurong East", 1.326, 103.737),
    subzone("Jurong Island", 1.266, 103.699),
    subzone("Jurong West", 1.34, 103.705),
    subzone("Kallang", 1.312, 103.862),
    subzone("Lim Chu Kang", 1.423, 103.717),
    subzone("Mandai", 1.419, 103.812),
    subzone("Marine Parade", 1.297, 103.891),
    subzone("Novena", 1.327, 103.826),
    subzone("Pasir Ris", 1.37, 103.948),
    subzone("Paya Lebar", 1.356, 103.914),
    subzone("Pioneer", 1.315, 103.675),
    subzone("Pulau Tekong", 1.403, 104.053),
    subzone("Pulau Ubin", 1.404, 103.96),
    subzone("Punggol", 1.401, 103.904),
    subzone("Queenstown", 1.291, 103.78),
    subzone("Seletar", 1.404, 103.869),
    subzone("Sembawang", 1.445, 103.818),
    subzone("Sengkang", 1.384, 103.891),
    subzone("Sentosa", 1.243, 103.832),
    subzone("Serangoon", 1.357, 103.865),
    subzone("Southern Islands", 1.208, 103.842),
    subzone("Sungei Kadut", 1.413, 103.756),
    subzone("Tampines", 1.345, 103.944),
    subzone("Tanglin", 1.308, 103.813),
    subzone("Tengah", 1.374, 103.715),
    subzone("Toa Payoh", 1.334304, 103.856327),
    subzone("Tuas", 1.294947, 103.635),
    subzone("Western Islands", 1.205926, 103.746),
    subzone("Western Water Catchment", 1.405, 103.689),
    subzone("Woodlands", 1.432, 103.786),
    subzone("Yishun", 1.426, 103.838),
];

/// Pick the area to forecast for.
///
/// An explicit slot value is used verbatim, even if it is not a known
/// subzone; the 2-hour lookup then reports that nothing was found.
pub fn resolve_area(
    explicit_area: Option<&str>,
    device_coordinates: Option<Coordinates>,
    features: &WebhookFeatures,
) -> String {
    if let Some(area) = explicit_area.filter(|a| !a.trim().is_empty()) {
        return area.to_string();
    }

    if features.nearest_subzone {
        if let Some(coordinates) = device_coordinates {
            if let Some(nearest) = nearest_subzone(coordinates) {
                tracing::debug!(
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    subzone = nearest.name,
                    "Resolved device location to subzone"
                );
                return nearest.name.to_string();
            }
        }
    }

    AREA_SINGAPORE.to_string()
}

/// Closest subzone by squared distance in raw degrees. Ties keep the
/// earlier table entry.
pub fn nearest_subzone(coordinates: Coordinates) -> Option<&'static Subzone> {
    nearest_in(SUBZONES, coordinates)
}

fn nearest_in(table: &[Subzone], coordinates: Coordinates) -> Option<&Subzone> {
    let mut best: Option<(&Subzone, f64)> = None;
    for candidate in table {
        let distance = squared_distance(candidate, coordinates);
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(subzone, _)| subzone)
}

fn squared_distance(subzone: &Subzone, coordinates: Coordinates) -> f64 {
    let d_lat = subzone.latitude - coordinates.latitude;
    let d_lon = subzone.longitude - coordinates.longitude;
    d_lat * d_lat + d_lon * d_lon
}
