//! Distancia y ranking
//!
//! Funciones puras: distancia Haversine, orden por importancia y la
//! política de radio de búsqueda según la duración del paseo.

use crate::models::Poi;

/// Radio medio de la Tierra en metros
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Metros de exploración por minuto de paseo
pub const METERS_PER_MINUTE: i32 = 83;

/// Tope del radio de búsqueda, sea cual sea la duración
pub const MAX_SEARCH_RADIUS_M: i32 = 5_000;

/// Distancia de gran círculo entre dos puntos (grados decimales) en metros
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Ordena por importancia descendente.
///
/// El orden entre POIs con la misma importancia no forma parte del contrato.
pub fn rank_by_importance(pois: &mut [Poi]) {
    pois.sort_by(|a, b| b.importance.cmp(&a.importance));
}

/// Radio de búsqueda en metros: `min(duración * 83, 5000)`
pub fn search_radius_meters(duration_minutes: i32) -> f64 {
    duration_minutes
        .saturating_mul(METERS_PER_MINUTE)
        .min(MAX_SEARCH_RADIUS_M) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewPoi;

    const RED_SQUARE: (f64, f64) = (55.7539, 37.6208);
    const VDNKH: (f64, f64) = (55.8304, 37.6325);

    fn poi_with_importance(importance: i32) -> Poi {
        NewPoi {
            name: format!("poi-{}", importance),
            description: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            epoch: String::new(),
            category: String::new(),
            importance,
            year_built: None,
            architect: None,
            style: None,
            photos: vec![],
            wikipedia_url: None,
            metadata: None,
        }
        .into_poi()
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [
            (RED_SQUARE, VDNKH),
            ((0.0, 0.0), (10.0, 10.0)),
            ((-33.86, 151.2), (51.5, -0.12)),
            ((89.9, 0.0), (-89.9, 179.9)),
        ];

        for (a, b) in pairs {
            let ab = haversine_distance(a.0, a.1, b.0, b.1);
            let ba = haversine_distance(b.0, b.1, a.0, a.1);
            assert!((ab - ba).abs() < 1e-6, "{:?} -> {:?}: {} != {}", a, b, ab, ba);
        }
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        for (lat, lon) in [RED_SQUARE, VDNKH, (0.0, 0.0), (-45.0, 170.0)] {
            assert_eq!(haversine_distance(lat, lon, lat, lon), 0.0);
        }
    }

    #[test]
    fn test_known_distance() {
        // Plaza Roja -> VDNKh, unos 8.5 km
        let d = haversine_distance(RED_SQUARE.0, RED_SQUARE.1, VDNKH.0, VDNKH.1);
        assert!((8_400.0..8_700.0).contains(&d), "distance was {}", d);

        // Un grado de latitud ~111.19 km
        let degree = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((degree - 111_194.9).abs() < 1.0);
    }

    #[test]
    fn test_rank_by_importance_is_non_increasing() {
        let mut pois: Vec<Poi> = [3, 10, 5, 5, 1, 8, 10, 2]
            .into_iter()
            .map(poi_with_importance)
            .collect();

        rank_by_importance(&mut pois);

        let scores: Vec<i32> = pois.iter().map(|p| p.importance).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{:?}", scores);
        assert_eq!(scores.len(), 8);
    }

    #[test]
    fn test_rank_empty_and_single() {
        let mut empty: Vec<Poi> = vec![];
        rank_by_importance(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![poi_with_importance(7)];
        rank_by_importance(&mut single);
        assert_eq!(single[0].importance, 7);
    }

    #[test]
    fn test_search_radius_policy() {
        assert_eq!(search_radius_meters(60), 4980.0);
        assert_eq!(search_radius_meters(120), 5000.0);
        assert_eq!(search_radius_meters(15), 1245.0);
        assert_eq!(search_radius_meters(180), 5000.0);
    }

    #[test]
    fn test_uses_fixed_earth_radius() {
        // Un grado sobre el ecuador = R * π / 180 con R = 6 371 000 m exactos
        let one_degree = haversine_distance(0.0, 0.0, 0.0, 1.0);
        assert!((one_degree - EARTH_RADIUS_M * std::f64::consts::PI / 180.0).abs() < 1e-6);
        assert!((one_degree - 111_194.926_644_558_73).abs() < 1e-6);
    }
}
