use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Value of a single intensity measure.
///
/// `NotApplicable` marks measures that could not be evaluated for this record or grid, so a
/// sentinel can never be mistaken for a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Measure {
    Scalar { value: f64 },
    Vector { values: Vec<f64> },
    /// Values sampled over an abscissa (time or frequency).
    Series { abscissa: Vec<f64>, values: Vec<f64> },
    NotApplicable,
}

impl Measure {
    #[inline]
    pub fn scalar(value: f64) -> Self {
        Self::Scalar { value }
    }

    #[inline]
    pub fn vector(values: Vec<f64>) -> Self {
        Self::Vector { values }
    }

    #[inline]
    pub fn series(abscissa: Vec<f64>, values: Vec<f64>) -> Self {
        Self::Series { abscissa, values }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar { value } => Some(*value),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Self::Vector { values } => Some(values),
            _ => None,
        }
    }

    pub fn as_series(&self) -> Option<(&[f64], &[f64])> {
        match self {
            Self::Series { abscissa, values } => Some((abscissa, values)),
            _ => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MeasureName {
    Periods,
    // Elastic spectra
    Sd,
    Sv,
    Sa,
    PSv,
    PSa,
    EiRelative,
    EiAbsolute,
    // Peak ground motion
    Pga,
    Pgv,
    Pgd,
    // Energy and intensity
    AriasCurve,
    Arias,
    Cav,
    ARms,
    VRms,
    DRms,
    Ic,
    Hi,
    Asi,
    Masi,
    Vsi,
    // Durations
    T5_75,
    D5_75,
    T5_95,
    D5_95,
    TBracketed,
    DBracketed,
    TUniform,
    DUniform,
    // Frequency content
    Fas,
    Pas,
    Tm,
    Tp,
}

impl MeasureName {
    pub fn label(self) -> &'static str {
        match self {
            Self::Periods => "Periods",
            Self::Sd => "Sd",
            Self::Sv => "Sv",
            Self::Sa => "Sa",
            Self::PSv => "PSv",
            Self::PSa => "PSa",
            Self::EiRelative => "Ei_r",
            Self::EiAbsolute => "Ei_a",
            Self::Pga => "PGA",
            Self::Pgv => "PGV",
            Self::Pgd => "PGD",
            Self::AriasCurve => "Aint",
            Self::Arias => "Arias",
            Self::Cav => "CAV",
            Self::ARms => "aRMS",
            Self::VRms => "vRMS",
            Self::DRms => "dRMS",
            Self::Ic => "Ic",
            Self::Hi => "HI",
            Self::Asi => "ASI",
            Self::Masi => "MASI",
            Self::Vsi => "VSI",
            Self::T5_75 => "t_5_75",
            Self::D5_75 => "D_5_75",
            Self::T5_95 => "t_5_95",
            Self::D5_95 => "D_5_95",
            Self::TBracketed => "t_bracketed",
            Self::DBracketed => "D_bracketed",
            Self::TUniform => "t_uniform",
            Self::DUniform => "D_uniform",
            Self::Fas => "FAS",
            Self::Pas => "PAS",
            Self::Tm => "Tm",
            Self::Tp => "Tp",
        }
    }
}

impl fmt::Display for MeasureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Named collection of intensity measures for one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IntensityMeasureSet {
    measures: BTreeMap<MeasureName, Measure>,
}

impl IntensityMeasureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: MeasureName, measure: Measure) {
        self.measures.insert(name, measure);
    }

    pub fn get(&self, name: MeasureName) -> Option<&Measure> {
        self.measures.get(&name)
    }

    pub fn scalar(&self, name: MeasureName) -> Option<f64> {
        self.get(name).and_then(Measure::as_scalar)
    }

    pub fn vector(&self, name: MeasureName) -> Option<&[f64]> {
        self.get(name).and_then(Measure::as_vector)
    }

    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MeasureName, &Measure)> {
        self.measures.iter()
    }
}

impl Extend<(MeasureName, Measure)> for IntensityMeasureSet {
    fn extend<I: IntoIterator<Item = (MeasureName, Measure)>>(&mut self, iter: I) {
        self.measures.extend(iter);
    }
}

impl IntoIterator for IntensityMeasureSet {
    type Item = (MeasureName, Measure);
    type IntoIter = std::collections::btree_map::IntoIter<MeasureName, Measure>;

    fn into_iter(self) -> Self::IntoIter {
        self.measures.into_iter()
    }
}
