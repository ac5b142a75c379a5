use super::condition;
use crate::core::dynamics::solver;
use crate::core::models::measures::IntensityMeasureSet;
use crate::core::models::periods::PeriodGrid;
use crate::core::models::record::GroundMotionRecord;
use crate::core::models::response::ResponseHistory;
use crate::engine::config::{AnalysisConfig, ResponseConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{Phase, Progress, ProgressReporter};
use crate::engine::tasks;
use crate::engine::tasks::ground_motion::GroundKinematics;
use tracing::{info, instrument};

const ZERO_PERIOD_NOTE: &str =
    "T = 0 removed from the period grid; use PGA for the zero-period ordinate.";

#[derive(Debug, Clone)]
pub struct IntensityAnalysis {
    /// The record after conditioning; identical to the input when none is configured.
    pub record: GroundMotionRecord,
    pub histories: Vec<ResponseHistory>,
    pub measures: IntensityMeasureSet,
}

#[instrument(skip_all, name = "intensity_workflow")]
pub fn run(
    record: &GroundMotionRecord,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<IntensityAnalysis, EngineError> {
    info!(
        samples = record.len(),
        periods = config.response.periods.len(),
        "Starting intensity measure analysis."
    );

    // === Phase 1: Conditioning ===
    let conditioned = reporter.phase(Phase::Conditioning, || {
        condition::run(record, &config.conditioning)
    })?;

    // === Phase 2: SDOF response ===
    let histories = reporter.phase(Phase::Response, || {
        if config.response.periods.had_zero_period() {
            reporter.report(Progress::Message(ZERO_PERIOD_NOTE.to_string()));
        }
        response_histories(&conditioned, &config.response)
    })?;

    // === Phase 3: Measure extraction ===
    let measures = reporter.phase(Phase::IntensityMeasures, || {
        extract(
            &conditioned,
            &config.response.periods,
            &histories,
            config.response.oscillator.mass,
        )
    })?;

    info!(measures = measures.len(), "Intensity measure analysis complete.");
    Ok(IntensityAnalysis {
        record: conditioned,
        histories,
        measures,
    })
}

/// One response history per grid period, in grid order.
pub fn response_histories(
    record: &GroundMotionRecord,
    config: &ResponseConfig,
) -> Result<Vec<ResponseHistory>, EngineError> {
    Ok(solver::solve(
        record.samples(),
        record.dt(),
        config.periods.as_slice(),
        &config.oscillator,
    )?)
}

/// Derives the full intensity measure set from a record and its response histories.
///
/// `histories` must come from [`response_histories`] (or the solver) over the same `grid` and
/// record; `mass` scales the input energy spectra.
#[instrument(skip_all, name = "measure_extraction")]
pub fn extract(
    record: &GroundMotionRecord,
    grid: &PeriodGrid,
    histories: &[ResponseHistory],
    mass: f64,
) -> Result<IntensityMeasureSet, EngineError> {
    let kinematics = GroundKinematics::integrate(record);

    let mut measures = tasks::ground_motion::run(record, &kinematics)?;
    let arias = tasks::ground_motion::arias_curve(record.samples(), record.dt());
    measures.extend(tasks::durations::run(record, &arias)?);
    measures.extend(tasks::spectral::run(
        record,
        &kinematics,
        grid,
        histories,
        mass,
    )?);
    measures.extend(tasks::frequency::run(record)?);
    Ok(measures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::measures::{Measure, MeasureName};
    use crate::core::signal::baseline::BaselineOrder;
    use crate::engine::config::{AnalysisConfigBuilder, FilterConfigBuilder};
    use std::f64::consts::TAU;
    use std::sync::Mutex;

    fn pulse_record() -> GroundMotionRecord {
        let dt = 0.01;
        let samples = (0..1500)
            .map(|i| {
                let t = i as f64 * dt;
                let envelope = (t / 3.0).powi(2) * (-(t / 3.0)).exp() * 4.0;
                envelope * 3.0 * (TAU * 1.2 * t).sin()
            })
            .collect();
        GroundMotionRecord::new(samples, dt).unwrap()
    }

    fn config(periods: Vec<f64>) -> AnalysisConfig {
        AnalysisConfigBuilder::new()
            .periods(PeriodGrid::new(periods).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn full_measure_set_is_produced() {
        let record = pulse_record();
        let analysis = run(
            &record,
            &config(vec![0.0, 0.1, 0.2, 0.5, 1.0, 2.5]),
            &ProgressReporter::new(),
        )
        .unwrap();

        let expected = [
            MeasureName::Periods,
            MeasureName::Sd,
            MeasureName::Sv,
            MeasureName::Sa,
            MeasureName::PSv,
            MeasureName::PSa,
            MeasureName::EiRelative,
            MeasureName::EiAbsolute,
            MeasureName::Pga,
            MeasureName::Pgv,
            MeasureName::Pgd,
            MeasureName::AriasCurve,
            MeasureName::Arias,
            MeasureName::Cav,
            MeasureName::ARms,
            MeasureName::VRms,
            MeasureName::DRms,
            MeasureName::Ic,
            MeasureName::Hi,
            MeasureName::Asi,
            MeasureName::Masi,
            MeasureName::Vsi,
            MeasureName::T5_75,
            MeasureName::D5_75,
            MeasureName::T5_95,
            MeasureName::D5_95,
            MeasureName::TBracketed,
            MeasureName::DBracketed,
            MeasureName::TUniform,
            MeasureName::DUniform,
            MeasureName::Fas,
            MeasureName::Pas,
            MeasureName::Tm,
            MeasureName::Tp,
        ];
        for name in expected {
            let measure = analysis.measures.get(name);
            assert!(
                measure.is_some_and(Measure::is_applicable),
                "{name} missing or not applicable"
            );
        }
        assert_eq!(analysis.measures.len(), expected.len());
        assert_eq!(analysis.histories.len(), 5);
        assert_eq!(
            analysis.measures.vector(MeasureName::Periods).unwrap(),
            &[0.1, 0.2, 0.5, 1.0, 2.5]
        );
    }

    #[test]
    fn extraction_is_consistent_with_workflow() {
        let record = pulse_record();
        let config = config(vec![0.1, 0.5, 2.5]);
        let analysis = run(&record, &config, &ProgressReporter::new()).unwrap();
        let histories = response_histories(&record, &config.response).unwrap();
        let measures = extract(&record, &config.response.periods, &histories, 1.0).unwrap();
        assert_eq!(measures, analysis.measures);
    }

    #[test]
    fn pga_is_exact_peak_of_conditioned_record() {
        let record = pulse_record();
        let config = AnalysisConfigBuilder::new()
            .periods(PeriodGrid::new(vec![0.3]).unwrap())
            .baseline(BaselineOrder::Linear)
            .filter(FilterConfigBuilder::new().bandpass(0.1, 20.0).build().unwrap())
            .build()
            .unwrap();
        let analysis = run(&record, &config, &ProgressReporter::new()).unwrap();
        let expected = analysis
            .record
            .samples()
            .iter()
            .fold(0.0_f64, |m, a| m.max(a.abs()));
        assert_eq!(analysis.measures.scalar(MeasureName::Pga), Some(expected));
        assert_ne!(analysis.record, record);
    }

    #[test]
    fn workflow_reports_three_phases() {
        let phases = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PhaseStart { phase } = event {
                phases.lock().unwrap().push(phase);
            }
        }));
        run(&pulse_record(), &config(vec![0.2, 1.0]), &reporter).unwrap();
        drop(reporter);
        assert_eq!(
            phases.into_inner().unwrap(),
            vec![Phase::Conditioning, Phase::Response, Phase::IntensityMeasures]
        );
    }

    #[test]
    fn zero_period_in_grid_is_reported_during_response_phase() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        let analysis = run(&pulse_record(), &config(vec![0.0, 0.2, 1.0]), &reporter).unwrap();
        drop(reporter);

        let events = events.into_inner().unwrap();
        let note = events
            .iter()
            .position(|e| matches!(e, Progress::Message(text) if text == ZERO_PERIOD_NOTE))
            .expect("zero-period note reported");
        assert_eq!(
            events[note - 1],
            Progress::PhaseStart {
                phase: Phase::Response
            }
        );
        assert_eq!(analysis.histories.len(), 2);
    }

    #[test]
    fn grid_without_zero_period_reports_no_message() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        run(&pulse_record(), &config(vec![0.2, 1.0]), &reporter).unwrap();
        drop(reporter);
        assert!(
            !events
                .into_inner()
                .unwrap()
                .iter()
                .any(|e| matches!(e, Progress::Message(_)))
        );
    }

    #[test]
    fn weak_record_keeps_other_measures_usable() {
        let samples: Vec<f64> = (0..500).map(|i| 0.02 * (i as f64 * 0.05).sin()).collect();
        let record = GroundMotionRecord::new(samples, 0.01).unwrap();
        let analysis = run(&record, &config(vec![0.2, 1.0]), &ProgressReporter::new()).unwrap();
        assert_eq!(
            analysis.measures.get(MeasureName::DBracketed),
            Some(&Measure::NotApplicable)
        );
        assert_eq!(analysis.measures.get(MeasureName::Hi), Some(&Measure::NotApplicable));
        assert!(analysis.measures.scalar(MeasureName::Arias).unwrap() > 0.0);
    }
}
