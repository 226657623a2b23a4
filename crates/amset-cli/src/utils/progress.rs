use amset::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

struct BarState {
    pb: ProgressBar,
    phase: String,
}

/// Renders engine [`Progress`] events as a single indicatif spinner/bar on
/// stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<BarState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), target)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(BarState {
                pb,
                phase: String::new(),
            })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = self.state.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut guard) = state.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };
            Self::handle(&mut guard, progress);
        })
    }

    fn handle(state: &mut BarState, progress: Progress) {
        let pb = &state.pb;
        match progress {
            Progress::PhaseStart { name } => {
                pb.reset();
                pb.set_length(0);
                pb.set_style(Self::spinner_style());
                pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                pb.set_message(name.to_string());
                state.phase = name.to_string();
            }
            Progress::PhaseFinish => {
                pb.disable_steady_tick();
                pb.finish_with_message(format!("✓ {}", state.phase));
            }
            Progress::TaskStart { total_steps } => {
                pb.disable_steady_tick();
                pb.reset();
                pb.set_length(total_steps);
                pb.set_position(0);
                pb.set_style(Self::bar_style());
            }
            Progress::TaskIncrement => pb.inc(1),
            Progress::TaskFinish => {
                let total = pb.length().unwrap_or(0);
                if pb.position() < total {
                    pb.set_position(total);
                }
                pb.finish();
            }
            Progress::MechanismReady { name } => {
                pb.println(format!("  • {} scattering ready", name));
            }
            Progress::Message(msg) => pb.println(format!("  {}", msg)),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} k-points ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("━╸ ")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn hidden_handler() -> CliProgressHandler {
        CliProgressHandler::with_draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = hidden_handler();
        let state = handler.state.lock().unwrap();
        assert_eq!(state.pb.length(), Some(0));
        assert!(state.pb.is_finished());
        assert!(state.phase.is_empty());
    }

    #[test]
    fn callback_tracks_phase_and_task_progress() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Elastic Rates",
        });
        {
            let state = handler.state.lock().unwrap();
            assert_eq!(state.pb.message(), "Elastic Rates");
            assert_eq!(state.phase, "Elastic Rates");
            assert!(!state.pb.is_finished());
        }

        callback(Progress::TaskStart { total_steps: 64 });
        callback(Progress::TaskIncrement);
        callback(Progress::TaskIncrement);
        {
            let state = handler.state.lock().unwrap();
            assert_eq!(state.pb.length(), Some(64));
            assert_eq!(state.pb.position(), 2);
        }

        callback(Progress::TaskFinish);
        {
            let state = handler.state.lock().unwrap();
            assert!(state.pb.is_finished());
            assert_eq!(state.pb.position(), 64);
        }

        callback(Progress::PhaseFinish);
        let state = handler.state.lock().unwrap();
        assert_eq!(state.pb.message(), "✓ Elastic Rates");
    }

    #[test]
    fn mechanism_and_message_events_do_not_disturb_the_bar() {
        let handler = hidden_handler();
        let callback = handler.get_callback();
        callback(Progress::TaskStart { total_steps: 10 });
        callback(Progress::MechanismReady { name: "ADP" });
        callback(Progress::Message("hello".to_string()));

        let state = handler.state.lock().unwrap();
        assert_eq!(state.pb.length(), Some(10));
        assert_eq!(state.pb.position(), 0);
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart {
                name: "Thread Test",
            });
            callback(Progress::TaskIncrement);
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let state = handler.state.lock().unwrap();
        assert!(state.pb.is_finished());
        assert_eq!(state.pb.message(), "✓ Thread Test");
    }
}
