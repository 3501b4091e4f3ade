// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::{
    all_pairs_routes, nearest_facilities, service_area, AllPairsReport, AnalysisError,
    NearestFacilityReport, Network, Options, QueryPoint, RoadLayer, ServiceAreaReport,
};

/// Owns the [Network] built from the most recently used [RoadLayer], so that repeated
/// analyses over the same roads don't rebuild the graph.
///
/// The cached network is keyed by [RoadLayer::identity] only - changes to the segments
/// of a layer with an unchanged identity are not detected. Use [Session::invalidate]
/// or [Session::set_force_rebuild] in that case.
#[derive(Debug, Clone)]
pub struct Session {
    options: Options,
    force_rebuild: bool,
    cached: Option<(String, Arc<Network>)>,
}

impl Session {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            force_rebuild: false,
            cached: None,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// If set, every call to [Session::network] rebuilds the graph, even when the cached one
    /// was built from a layer with the same identity.
    pub fn set_force_rebuild(&mut self, force_rebuild: bool) {
        self.force_rebuild = force_rebuild;
    }

    /// Drops the cached [Network].
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Returns a [Network] for the provided layer, reusing the cached one if possible.
    pub fn network(&mut self, layer: &RoadLayer) -> Result<Arc<Network>, AnalysisError> {
        if !self.force_rebuild {
            if let Some((identity, n)) = &self.cached {
                if *identity == layer.identity {
                    log::info!("Reusing road network of {:?}", layer.identity);
                    return Ok(Arc::clone(n));
                }
            }
        }

        log::info!("Building road network of {:?}", layer.identity);
        let n = Arc::new(Network::build(&layer.segments, self.options)?);
        self.cached = Some((layer.identity.clone(), Arc::clone(&n)));
        Ok(n)
    }

    /// Shorthand for [Session::network] followed by [all_pairs_routes].
    pub fn all_pairs(
        &mut self,
        roads: &RoadLayer,
        points: &[QueryPoint],
    ) -> Result<AllPairsReport, AnalysisError> {
        let n = self.network(roads)?;
        all_pairs_routes(&n, points)
    }

    /// Shorthand for [Session::network] followed by [service_area].
    pub fn service_area(
        &mut self,
        roads: &RoadLayer,
        origins: &[QueryPoint],
        threshold: f64,
    ) -> Result<ServiceAreaReport, AnalysisError> {
        let n = self.network(roads)?;
        service_area(&n, origins, threshold)
    }

    /// Shorthand for [Session::network] followed by [nearest_facilities].
    pub fn nearest_facility(
        &mut self,
        roads: &RoadLayer,
        origins: &[QueryPoint],
        facilities: &[QueryPoint],
    ) -> Result<NearestFacilityReport, AnalysisError> {
        let n = self.network(roads)?;
        nearest_facilities(&n, origins, facilities)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

#[cfg(test)]
mod tests {
    use geo::coord;

    use super::*;
    use crate::{CostAttribute, Direction, RoadSegment};

    fn layer(identity: &str, length: f64) -> RoadLayer {
        RoadLayer {
            identity: identity.to_string(),
            segments: vec![RoadSegment {
                id: 0,
                parts: vec![geo::LineString::from(vec![(0.0, 0.0), (length, 0.0)])],
                direction: Direction::Both,
                cost: CostAttribute::Missing,
            }],
        }
    }

    fn points(length: f64) -> Vec<QueryPoint> {
        vec![
            QueryPoint::new("a", coord! { x: 0.0, y: 0.0 }),
            QueryPoint::new("b", coord! { x: length, y: 0.0 }),
        ]
    }

    #[test]
    fn reuses_network_with_the_same_identity() {
        let mut s = Session::default();
        let first = s.network(&layer("roads", 1.0)).unwrap();
        let second = s.network(&layer("roads", 2.0)).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // Stale network is used, as the identity didn't change
        let report = s.all_pairs(&layer("roads", 2.0), &points(1.0)).unwrap();
        assert_eq!(report.routes[0].cost, 1.0);
    }

    #[test]
    fn rebuilds_on_identity_change() {
        let mut s = Session::default();
        let first = s.network(&layer("roads", 1.0)).unwrap();
        let second = s.network(&layer("other", 1.0)).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn force_rebuild() {
        let mut s = Session::default();
        s.set_force_rebuild(true);
        let first = s.network(&layer("roads", 1.0)).unwrap();
        let second = s.network(&layer("roads", 1.0)).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));

        s.all_pairs(&layer("roads", 1.0), &points(1.0)).unwrap();
        let report = s.all_pairs(&layer("roads", 2.0), &points(2.0)).unwrap();
        assert_eq!(report.routes[0].cost, 2.0);
    }

    #[test]
    fn invalidate() {
        let mut s = Session::default();
        let first = s.network(&layer("roads", 1.0)).unwrap();
        s.invalidate();
        let second = s.network(&layer("roads", 1.0)).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn failed_build_keeps_cache() {
        let mut s = Session::default();
        let first = s.network(&layer("roads", 1.0)).unwrap();

        let empty = RoadLayer {
            identity: "empty".to_string(),
            segments: vec![],
        };
        assert_eq!(s.network(&empty).unwrap_err(), AnalysisError::EmptyNetwork);

        let second = s.network(&layer("roads", 1.0)).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn convenience_methods() {
        let mut s = Session::default();
        let roads = layer("roads", 3.0);

        let report = s.service_area(&roads, &points(3.0)[..1], 5.0).unwrap();
        assert_eq!(report.routes.len(), 1);
        assert_eq!(report.routes[0].cost, 3.0);

        let report = s
            .nearest_facility(&roads, &points(3.0)[..1], &points(3.0)[1..])
            .unwrap();
        assert_eq!(report.assignments[0].facility_id, "b");
    }
}
