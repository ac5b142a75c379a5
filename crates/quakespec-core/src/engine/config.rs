use crate::core::dynamics::Oscillator;
use crate::core::models::ModelError;
use crate::core::models::periods::PeriodGrid;
use crate::core::signal::baseline::BaselineOrder;
use crate::core::signal::butterworth::Band;
use crate::core::signal::filter::{PadMode, Padding};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_FILTER_ORDER: usize = 4;
pub const DEFAULT_PAD_DOUBLINGS: u32 = 1;
pub const DEFAULT_PAD_TAIL_SAMPLES: usize = 50;
pub const DEFAULT_DAMPING_RATIO: f64 = 0.05;
pub const DEFAULT_MASS: f64 = 1.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Filter cutoff needs at least one of the low and high frequencies")]
    MissingCutoff,
    #[error("Filter cutoff must be an ordered pair with low < high, got ({low}, {high})")]
    UnorderedCutoff { low: f64, high: f64 },
    #[error("Filter cutoff frequency must be positive and finite, got {0}")]
    InvalidCutoff(f64),
    #[error("Filter order must be at least 1")]
    InvalidFilterOrder,
    #[error("Padding must average at least one tail sample")]
    InvalidPadTail,
    #[error("Damping ratio must lie in [0, 1), got {0}")]
    InvalidDamping(f64),
    #[error("Oscillator mass must be positive and finite, got {0}")]
    InvalidMass(f64),
    #[error("Percentile must lie in [0, 100], got {0}")]
    InvalidPercentile(f64),
}

/// Failure to turn TOML text into a validated configuration. Reading the text is left to the
/// caller.
#[derive(Debug, Error)]
pub enum ConfigParseError {
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
    #[error(transparent)]
    Periods(#[from] ModelError),
}

/// Zero-phase Butterworth filter settings.
///
/// `cutoff = (None, Some(f))` is a lowpass at `f`, `(Some(f), None)` a highpass at `f`, and
/// `(Some(lo), Some(hi))` a bandpass. Instances only exist in validated form.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    band: Band,
    cutoff: (Option<f64>, Option<f64>),
    order: usize,
    padding: Padding,
}

impl FilterConfig {
    pub fn band(&self) -> Band {
        self.band
    }

    pub fn cutoff(&self) -> (Option<f64>, Option<f64>) {
        self.cutoff
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn padding(&self) -> &Padding {
        &self.padding
    }
}

#[derive(Default)]
pub struct FilterConfigBuilder {
    cutoff: Option<(Option<f64>, Option<f64>)>,
    order: Option<usize>,
    pad_mode: Option<PadMode>,
    pad_doublings: Option<u32>,
    pad_tail_samples: Option<usize>,
}

impl FilterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cutoff(mut self, low: Option<f64>, high: Option<f64>) -> Self {
        self.cutoff = Some((low, high));
        self
    }
    pub fn lowpass(self, frequency: f64) -> Self {
        self.cutoff(None, Some(frequency))
    }
    pub fn highpass(self, frequency: f64) -> Self {
        self.cutoff(Some(frequency), None)
    }
    pub fn bandpass(self, low: f64, high: f64) -> Self {
        self.cutoff(Some(low), Some(high))
    }
    pub fn order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }
    pub fn pad_mode(mut self, mode: PadMode) -> Self {
        self.pad_mode = Some(mode);
        self
    }
    pub fn pad_doublings(mut self, doublings: u32) -> Self {
        self.pad_doublings = Some(doublings);
        self
    }
    pub fn pad_tail_samples(mut self, samples: usize) -> Self {
        self.pad_tail_samples = Some(samples);
        self
    }

    pub fn build(self) -> Result<FilterConfig, ConfigError> {
        let cutoff = self.cutoff.ok_or(ConfigError::MissingParameter("cutoff"))?;
        let band = resolve_band(cutoff)?;

        let order = self.order.unwrap_or(DEFAULT_FILTER_ORDER);
        if order == 0 {
            return Err(ConfigError::InvalidFilterOrder);
        }
        let tail_samples = self.pad_tail_samples.unwrap_or(DEFAULT_PAD_TAIL_SAMPLES);
        if tail_samples == 0 {
            return Err(ConfigError::InvalidPadTail);
        }

        Ok(FilterConfig {
            band,
            cutoff,
            order,
            padding: Padding {
                mode: self.pad_mode.unwrap_or_default(),
                doublings: self.pad_doublings.unwrap_or(DEFAULT_PAD_DOUBLINGS),
                tail_samples,
            },
        })
    }
}

fn resolve_band(cutoff: (Option<f64>, Option<f64>)) -> Result<Band, ConfigError> {
    let check = |f: f64| {
        if f.is_finite() && f > 0.0 {
            Ok(f)
        } else {
            Err(ConfigError::InvalidCutoff(f))
        }
    };
    match cutoff {
        (None, None) => Err(ConfigError::MissingCutoff),
        (None, Some(high)) => Ok(Band::Lowpass(check(high)?)),
        (Some(low), None) => Ok(Band::Highpass(check(low)?)),
        (Some(low), Some(high)) => {
            let (low, high) = (check(low)?, check(high)?);
            if low < high {
                Ok(Band::Bandpass { low, high })
            } else {
                Err(ConfigError::UnorderedCutoff { low, high })
            }
        }
    }
}

/// Optional baseline correction followed by optional filtering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConditioningConfig {
    pub baseline: Option<BaselineOrder>,
    pub filter: Option<FilterConfig>,
}

impl ConditioningConfig {
    pub fn is_identity(&self) -> bool {
        self.baseline.is_none() && self.filter.is_none()
    }
}

/// Period grid and oscillator properties shared by response-based computations.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseConfig {
    pub periods: PeriodGrid,
    pub oscillator: Oscillator,
}

fn oscillator_from(damping_ratio: Option<f64>, mass: Option<f64>) -> Result<Oscillator, ConfigError> {
    let damping_ratio = damping_ratio.unwrap_or(DEFAULT_DAMPING_RATIO);
    let mass = mass.unwrap_or(DEFAULT_MASS);
    if !(damping_ratio.is_finite() && (0.0..1.0).contains(&damping_ratio)) {
        return Err(ConfigError::InvalidDamping(damping_ratio));
    }
    if !(mass.is_finite() && mass > 0.0) {
        return Err(ConfigError::InvalidMass(mass));
    }
    Ok(Oscillator {
        damping_ratio,
        mass,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub conditioning: ConditioningConfig,
    pub response: ResponseConfig,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    periods: Option<PeriodGrid>,
    damping_ratio: Option<f64>,
    mass: Option<f64>,
    baseline: Option<BaselineOrder>,
    filter: Option<FilterConfig>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn periods(mut self, periods: PeriodGrid) -> Self {
        self.periods = Some(periods);
        self
    }
    pub fn damping_ratio(mut self, ratio: f64) -> Self {
        self.damping_ratio = Some(ratio);
        self
    }
    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }
    pub fn baseline(mut self, order: BaselineOrder) -> Self {
        self.baseline = Some(order);
        self
    }
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        Ok(AnalysisConfig {
            conditioning: ConditioningConfig {
                baseline: self.baseline,
                filter: self.filter,
            },
            response: ResponseConfig {
                periods: self
                    .periods
                    .ok_or(ConfigError::MissingParameter("periods"))?,
                oscillator: oscillator_from(self.damping_ratio, self.mass)?,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RotDConfig {
    pub conditioning: ConditioningConfig,
    pub response: ResponseConfig,
    /// Percentile across rotation angles, e.g. 50 for RotD50.
    pub percentile: f64,
}

#[derive(Default)]
pub struct RotDConfigBuilder {
    periods: Option<PeriodGrid>,
    damping_ratio: Option<f64>,
    mass: Option<f64>,
    baseline: Option<BaselineOrder>,
    filter: Option<FilterConfig>,
    percentile: Option<f64>,
}

impl RotDConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn periods(mut self, periods: PeriodGrid) -> Self {
        self.periods = Some(periods);
        self
    }
    pub fn damping_ratio(mut self, ratio: f64) -> Self {
        self.damping_ratio = Some(ratio);
        self
    }
    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }
    pub fn baseline(mut self, order: BaselineOrder) -> Self {
        self.baseline = Some(order);
        self
    }
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = Some(filter);
        self
    }
    pub fn percentile(mut self, percentile: f64) -> Self {
        self.percentile = Some(percentile);
        self
    }

    pub fn build(self) -> Result<RotDConfig, ConfigError> {
        let percentile = self
            .percentile
            .ok_or(ConfigError::MissingParameter("percentile"))?;
        validate_percentile(percentile)?;
        Ok(RotDConfig {
            conditioning: ConditioningConfig {
                baseline: self.baseline,
                filter: self.filter,
            },
            response: ResponseConfig {
                periods: self
                    .periods
                    .ok_or(ConfigError::MissingParameter("periods"))?,
                oscillator: oscillator_from(self.damping_ratio, self.mass)?,
            },
            percentile,
        })
    }
}

pub(crate) fn validate_percentile(percentile: f64) -> Result<(), ConfigError> {
    if percentile.is_finite() && (0.0..=100.0).contains(&percentile) {
        Ok(())
    } else {
        Err(ConfigError::InvalidPercentile(percentile))
    }
}

// === TOML representation ===

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilterFile {
    low: Option<f64>,
    high: Option<f64>,
    order: Option<usize>,
    pad_mode: Option<PadMode>,
    pad_doublings: Option<u32>,
    pad_tail_samples: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConditioningFile {
    baseline: Option<BaselineOrder>,
    filter: Option<FilterFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnalysisFile {
    periods: Vec<f64>,
    damping_ratio: Option<f64>,
    mass: Option<f64>,
    #[serde(default)]
    conditioning: ConditioningFile,
}

impl FilterFile {
    fn into_config(self) -> Result<FilterConfig, ConfigError> {
        let mut builder = FilterConfigBuilder::new().cutoff(self.low, self.high);
        if let Some(order) = self.order {
            builder = builder.order(order);
        }
        if let Some(mode) = self.pad_mode {
            builder = builder.pad_mode(mode);
        }
        if let Some(doublings) = self.pad_doublings {
            builder = builder.pad_doublings(doublings);
        }
        if let Some(samples) = self.pad_tail_samples {
            builder = builder.pad_tail_samples(samples);
        }
        builder.build()
    }
}

impl AnalysisConfig {
    /// Parses a configuration such as
    ///
    /// ```toml
    /// periods = [0.1, 0.5, 1.0, 2.5]
    /// damping_ratio = 0.05
    ///
    /// [conditioning]
    /// baseline = "linear"
    ///
    /// [conditioning.filter]
    /// low = 0.1
    /// high = 25.0
    /// pad_mode = "mid"
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigParseError> {
        let file: AnalysisFile = toml::from_str(content)?;
        let mut builder = AnalysisConfigBuilder::new().periods(PeriodGrid::new(file.periods)?);
        if let Some(ratio) = file.damping_ratio {
            builder = builder.damping_ratio(ratio);
        }
        if let Some(mass) = file.mass {
            builder = builder.mass(mass);
        }
        if let Some(order) = file.conditioning.baseline {
            builder = builder.baseline(order);
        }
        if let Some(filter) = file.conditioning.filter {
            builder = builder.filter(filter.into_config()?);
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> PeriodGrid {
        PeriodGrid::new(vec![0.1, 0.5, 1.0]).unwrap()
    }

    #[test]
    fn cutoff_pair_selects_filter_type() {
        let lowpass = FilterConfigBuilder::new().cutoff(None, Some(15.0)).build().unwrap();
        assert_eq!(lowpass.band(), Band::Lowpass(15.0));

        let highpass = FilterConfigBuilder::new().cutoff(Some(0.1), None).build().unwrap();
        assert_eq!(highpass.band(), Band::Highpass(0.1));

        let bandpass = FilterConfigBuilder::new()
            .cutoff(Some(0.1), Some(25.0))
            .build()
            .unwrap();
        assert_eq!(bandpass.band(), Band::Bandpass { low: 0.1, high: 25.0 });

        assert_eq!(
            FilterConfigBuilder::new().cutoff(None, None).build(),
            Err(ConfigError::MissingCutoff)
        );
    }

    #[test]
    fn filter_defaults_are_applied() {
        let config = FilterConfigBuilder::new().bandpass(0.1, 25.0).build().unwrap();
        assert_eq!(config.order(), DEFAULT_FILTER_ORDER);
        assert_eq!(config.padding().mode, PadMode::None);
        assert_eq!(config.padding().doublings, DEFAULT_PAD_DOUBLINGS);
        assert_eq!(config.padding().tail_samples, DEFAULT_PAD_TAIL_SAMPLES);
    }

    #[test]
    fn filter_builder_rejects_invalid_settings() {
        assert_eq!(
            FilterConfigBuilder::new().build(),
            Err(ConfigError::MissingParameter("cutoff"))
        );
        assert_eq!(
            FilterConfigBuilder::new().bandpass(25.0, 0.1).build(),
            Err(ConfigError::UnorderedCutoff { low: 25.0, high: 0.1 })
        );
        assert_eq!(
            FilterConfigBuilder::new().lowpass(-1.0).build(),
            Err(ConfigError::InvalidCutoff(-1.0))
        );
        assert_eq!(
            FilterConfigBuilder::new().lowpass(5.0).order(0).build(),
            Err(ConfigError::InvalidFilterOrder)
        );
        assert_eq!(
            FilterConfigBuilder::new().lowpass(5.0).pad_tail_samples(0).build(),
            Err(ConfigError::InvalidPadTail)
        );
    }

    #[test]
    fn analysis_builder_requires_periods_and_defaults_oscillator() {
        assert_eq!(
            AnalysisConfigBuilder::new().build(),
            Err(ConfigError::MissingParameter("periods"))
        );
        let config = AnalysisConfigBuilder::new().periods(grid()).build().unwrap();
        assert_eq!(config.response.oscillator, Oscillator::default());
        assert!(config.conditioning.is_identity());
    }

    #[test]
    fn analysis_builder_validates_oscillator() {
        assert_eq!(
            AnalysisConfigBuilder::new()
                .periods(grid())
                .damping_ratio(1.5)
                .build(),
            Err(ConfigError::InvalidDamping(1.5))
        );
        assert_eq!(
            AnalysisConfigBuilder::new().periods(grid()).mass(-2.0).build(),
            Err(ConfigError::InvalidMass(-2.0))
        );
    }

    #[test]
    fn rotd_builder_validates_percentile() {
        assert_eq!(
            RotDConfigBuilder::new().periods(grid()).build(),
            Err(ConfigError::MissingParameter("percentile"))
        );
        assert_eq!(
            RotDConfigBuilder::new().periods(grid()).percentile(101.0).build(),
            Err(ConfigError::InvalidPercentile(101.0))
        );
        let config = RotDConfigBuilder::new()
            .periods(grid())
            .percentile(50.0)
            .build()
            .unwrap();
        assert_eq!(config.percentile, 50.0);
    }

    #[test]
    fn analysis_config_parses_full_toml() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            periods = [0.0, 0.1, 0.5, 2.5]
            damping_ratio = 0.02
            mass = 2.0

            [conditioning]
            baseline = "quadratic"

            [conditioning.filter]
            low = 0.1
            high = 25.0
            order = 2
            pad_mode = "mid"
            pad_tail_samples = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.response.periods.as_slice(), &[0.1, 0.5, 2.5]);
        assert_eq!(config.response.oscillator.damping_ratio, 0.02);
        assert_eq!(config.response.oscillator.mass, 2.0);
        assert_eq!(config.conditioning.baseline, Some(BaselineOrder::Quadratic));
        let filter = config.conditioning.filter.unwrap();
        assert_eq!(filter.band(), Band::Bandpass { low: 0.1, high: 25.0 });
        assert_eq!(filter.order(), 2);
        assert_eq!(filter.padding().mode, PadMode::Mid);
        assert_eq!(filter.padding().tail_samples, 20);
    }

    #[test]
    fn analysis_config_rejects_filter_without_cutoff() {
        let result = AnalysisConfig::from_toml_str(
            r#"
            periods = [0.1]
            [conditioning.filter]
            order = 4
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigParseError::Invalid(ConfigError::MissingCutoff))
        ));
    }

    #[test]
    fn analysis_config_rejects_unknown_keys() {
        let result = AnalysisConfig::from_toml_str("periods = [0.1]\nspeed = 3\n");
        assert!(matches!(result, Err(ConfigParseError::Toml(_))));
    }

    #[test]
    fn minimal_toml_leaves_filter_unset() {
        let config =
            AnalysisConfig::from_toml_str("periods = [0.2, 0.4]\n[conditioning]\nbaseline = \"linear\"\n")
                .unwrap();
        assert_eq!(config.response.periods.len(), 2);
        assert_eq!(config.response.oscillator, Oscillator::default());
        assert_eq!(config.conditioning.baseline, Some(BaselineOrder::Linear));
        assert!(config.conditioning.filter.is_none());
    }

    #[test]
    fn invalid_period_grid_in_toml_is_reported() {
        let result = AnalysisConfig::from_toml_str("periods = [0.5, 0.2]\n");
        assert!(matches!(
            result,
            Err(ConfigParseError::Periods(ModelError::UnorderedPeriods { .. }))
        ));
    }
}
