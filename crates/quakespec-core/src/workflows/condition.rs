use crate::core::models::record::GroundMotionRecord;
use crate::core::signal::baseline::{BaselineOrder, baseline_correct};
use crate::core::signal::filter::butterworth_filter;
use crate::engine::config::{ConditioningConfig, FilterConfig};
use crate::engine::error::EngineError;
use tracing::{info, instrument};

/// Applies baseline correction and then filtering, each only when configured.
#[instrument(skip_all, name = "conditioning_workflow", fields(samples = record.len()))]
pub fn run(
    record: &GroundMotionRecord,
    config: &ConditioningConfig,
) -> Result<GroundMotionRecord, EngineError> {
    let mut conditioned = record.clone();
    if let Some(order) = config.baseline {
        conditioned = baseline(&conditioned, order)?;
    }
    if let Some(filter_config) = &config.filter {
        conditioned = filter(&conditioned, filter_config)?;
    }
    Ok(conditioned)
}

/// Removes a least-squares polynomial trend of the given order.
pub fn baseline(
    record: &GroundMotionRecord,
    order: BaselineOrder,
) -> Result<GroundMotionRecord, EngineError> {
    info!(?order, "Applying baseline correction.");
    let corrected = baseline_correct(record.samples(), record.dt(), order)?;
    Ok(GroundMotionRecord::new(corrected, record.dt())?)
}

/// Zero-phase Butterworth filtering with the configured band, order and edge padding.
pub fn filter(
    record: &GroundMotionRecord,
    config: &FilterConfig,
) -> Result<GroundMotionRecord, EngineError> {
    info!(
        band = ?config.band(),
        order = config.order(),
        pad_mode = ?config.padding().mode,
        "Applying Butterworth filter."
    );
    let filtered = butterworth_filter(
        record.samples(),
        record.dt(),
        config.band(),
        config.order(),
        config.padding(),
    )?;
    Ok(GroundMotionRecord::new(filtered, record.dt())?)
}
