//! Prometheus metrics for tuition-service.

use once_cell::sync::OnceCell;
use prometheus::{
    opts, register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

/// Payments recorded, by entry path (parent, spp, manual).
static PAYMENTS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

/// Snapshot write duration by collection.
static STORE_WRITE_DURATION: OnceCell<HistogramVec> = OnceCell::new();

pub fn init_metrics() {
    PAYMENTS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "tuition_payments_total",
                "Total payments recorded by entry path"
            ),
            &["source"]
        )
        .expect("Failed to register PAYMENTS_TOTAL")
    });

    STORE_WRITE_DURATION.get_or_init(|| {
        register_histogram_vec!(
            "tuition_store_write_duration_seconds",
            "Snapshot write duration by collection",
            &["collection"],
            vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
        )
        .expect("Failed to register STORE_WRITE_DURATION")
    });
}

/// Render all registered metrics in the Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Failed to convert metrics to string")
}

pub fn record_payment(source: &str) {
    if let Some(counter) = PAYMENTS_TOTAL.get() {
        counter.with_label_values(&[source]).inc();
    }
}

pub fn observe_store_write(collection: &str, seconds: f64) {
    if let Some(histogram) = STORE_WRITE_DURATION.get() {
        histogram.with_label_values(&[collection]).observe(seconds);
    }
}
