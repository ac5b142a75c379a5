use std::fmt;

/// Stages a workflow moves through, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Conditioning,
    Response,
    IntensityMeasures,
    RotationSweep,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Conditioning => "Conditioning",
            Self::Response => "Response",
            Self::IntensityMeasures => "Intensity Measures",
            Self::RotationSweep => "Rotation Sweep",
        };
        f.write_str(label)
    }
}

/// Events emitted while an analysis runs. Task events only appear inside a phase.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { phase: Phase },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    /// Advisory note about the input, e.g. an adjusted period grid.
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Optional sink for [`Progress`] events. Without a callback every report is dropped, so
/// workflows can report unconditionally.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `work` between a `PhaseStart` and a `PhaseFinish` for `phase`. The finish event is
    /// skipped when `work` fails.
    pub fn phase<T, E>(&self, phase: Phase, work: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        self.report(Progress::PhaseStart { phase });
        let output = work()?;
        self.report(Progress::PhaseFinish);
        Ok(output)
    }
}
