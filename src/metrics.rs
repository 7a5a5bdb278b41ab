// src/metrics.rs
use axum::{routing::get, Router};
use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::catalog::Phone;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Initialize the Prometheus recorder and publish the catalog-size gauges.
    pub fn init(catalog: &[Phone]) -> Self {
        // Use default buckets to avoid API differences across crate versions.
        let builder = PrometheusBuilder::new();

        let handle = builder
            .install_recorder()
            .expect("prometheus: install recorder");

        // Static gauges: the embedded seed does not change at runtime.
        gauge!("watcher_catalog_phones").set(catalog.len() as f64);
        let listings: usize = catalog.iter().map(|p| p.prices.len()).sum();
        gauge!("watcher_catalog_listings").set(listings as f64);

        Self { handle }
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
