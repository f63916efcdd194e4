//! Marker layer for the property aggregation map
//!
//! Clusters are handed to the map widget as a GeoJSON FeatureCollection.
//! Tile rendering and marker clustering belong to the widget.

use crate::exposure::GeoClusterRow;
use crate::format::format_currency;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Initial map viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
    pub tiles: String,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: (31.0, -99.0), // Texas
            zoom: 6,
            tiles: "Cartodb Positron".to_string(),
        }
    }
}

/// Circle marker appearance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub radius: u32,
    pub fill_opacity: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 8,
            fill_opacity: 0.7,
        }
    }
}

/// Popup text: "City: Dallas<br>Total Dwelling Limit: $800,000"
pub fn popup_text(cluster: &GeoClusterRow, exposure_label: &str) -> String {
    format!(
        "City: {}<br>Total {}: {}",
        cluster.city,
        exposure_label,
        format_currency(cluster.total_exposure)
    )
}

/// One GeoJSON point feature per cluster
pub fn map_layer(clusters: &[GeoClusterRow], exposure_label: &str) -> Value {
    map_layer_with(clusters, exposure_label, &MapView::default(), &MarkerStyle::default())
}

pub fn map_layer_with(
    clusters: &[GeoClusterRow],
    exposure_label: &str,
    view: &MapView,
    style: &MarkerStyle,
) -> Value {
    let features: Vec<Value> = clusters
        .iter()
        .map(|cluster| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [cluster.longitude, cluster.latitude],
                },
                "properties": {
                    "city": cluster.city,
                    "total_exposure": cluster.total_exposure,
                    "risk_tier": cluster.risk_tier,
                    "color": cluster.color(),
                    "fill_color": cluster.color(),
                    "radius": style.radius,
                    "fill_opacity": style.fill_opacity,
                    "popup": popup_text(cluster, exposure_label),
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "view": view,
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exposure::RiskTier;

    fn clusters() -> Vec<GeoClusterRow> {
        vec![
            GeoClusterRow {
                city: "Dallas".to_string(),
                latitude: 32.78,
                longitude: -96.8,
                total_exposure: 800_000.0,
                risk_tier: RiskTier::High,
            },
            GeoClusterRow {
                city: "Waco".to_string(),
                latitude: 31.55,
                longitude: -97.15,
                total_exposure: 125_000.0,
                risk_tier: RiskTier::Low,
            },
        ]
    }

    #[test]
    fn test_popup_text() {
        let clusters = clusters();
        assert_eq!(
            popup_text(&clusters[0], "Dwelling Limit"),
            "City: Dallas<br>Total Dwelling Limit: $800,000"
        );
        assert_eq!(popup_text(&clusters[1], "CovA"), "City: Waco<br>Total CovA: $125,000");
    }

    #[test]
    fn test_map_layer_features() {
        let layer = map_layer(&clusters(), "Dwelling Limit");

        assert_eq!(layer["type"], "FeatureCollection");
        assert_eq!(layer["view"]["zoom"], 6);
        let features = layer["features"].as_array().expect("features array");
        assert_eq!(features.len(), 2);

        // GeoJSON order is [longitude, latitude]
        assert_eq!(features[0]["geometry"]["coordinates"][0], -96.8);
        assert_eq!(features[0]["geometry"]["coordinates"][1], 32.78);
        assert_eq!(features[0]["properties"]["color"], "red");
        assert_eq!(features[0]["properties"]["risk_tier"], "high");
        assert_eq!(features[1]["properties"]["color"], "green");
        assert_eq!(features[1]["properties"]["radius"], 8);
    }

    #[test]
    fn test_empty_layer() {
        let layer = map_layer(&[], "CovA");
        assert!(layer["features"].as_array().map_or(false, |f| f.is_empty()));
    }
}
