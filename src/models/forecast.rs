//! data.gov.sg environment API payloads.
//!
//! All three endpoints wrap their data in an `items` array; the webhook only
//! ever reads the first item.

use serde::Deserialize;

/// Response of `/2-hour-weather-forecast`
#[derive(Debug, Clone, Deserialize)]
pub struct TwoHourForecastResponse {
    pub items: Vec<TwoHourItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwoHourItem {
    pub forecasts: Vec<AreaForecast>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AreaForecast {
    pub area: String,
    pub forecast: String,
}

/// Response of `/24-hour-weather-forecast`
#[derive(Debug, Clone, Deserialize)]
pub struct TwentyFourHourForecastResponse {
    pub items: Vec<TwentyFourHourItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwentyFourHourItem {
    pub general: GeneralForecast,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralForecast {
    pub forecast: String,
}

/// Response of `/4-day-weather-forecast`
#[derive(Debug, Clone, Deserialize)]
pub struct FourDayForecastResponse {
    pub items: Vec<FourDayItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FourDayItem {
    pub forecasts: Vec<DailyForecast>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecast {
    /// `YYYY-MM-DD`
    pub date: String,
    pub forecast: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_upstream_shapes() {
        let two_hour: TwoHourForecastResponse = serde_json::from_value(json!({
            "area_metadata": [{ "name": "Bedok", "label_location": { "latitude": 1.321, "longitude": 103.924 } }],
            "items": [{
                "update_timestamp": "2018-05-11T09:07:30+08:00",
                "valid_period": { "start": "2018-05-11T09:00:00+08:00", "end": "2018-05-11T11:00:00+08:00" },
                "forecasts": [{ "area": "Bedok", "forecast": "Partly Cloudy (Day)" }]
            }],
            "api_info": { "status": "healthy" }
        }))
        .unwrap();
        assert_eq!(two_hour.items[0].forecasts[0].area, "Bedok");

        let daily: TwentyFourHourForecastResponse = serde_json::from_value(json!({
            "items": [{
                "general": {
                    "forecast": "Thundery Showers",
                    "relative_humidity": { "low": 60, "high": 95 },
                    "temperature": { "low": 24, "high": 33 }
                },
                "periods": []
            }]
        }))
        .unwrap();
        assert_eq!(daily.items[0].general.forecast, "Thundery Showers");

        let four_day: FourDayForecastResponse = serde_json::from_value(json!({
            "items": [{
                "forecasts": [
                    { "date": "2018-05-12", "forecast": "Afternoon thundery showers", "timestamp": "2018-05-12T00:00:00+08:00" }
                ]
            }]
        }))
        .unwrap();
        assert_eq!(four_day.items[0].forecasts[0].date, "2018-05-12");
    }
}
