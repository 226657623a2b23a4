/// Events emitted while a workflow runs, for front ends to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// A unit of work with a known number of steps (k-points) begins.
    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    MechanismReady { name: &'static str },
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback. A reporter without a
/// callback silently drops every event.
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
}
