use indicatif::{ProgressBar, ProgressStyle};

/// Read-only hook called after every round. Nothing it does feeds back into
/// the protocol.
pub trait RoundObserver {
    fn on_round(&mut self, round: u32, passed: bool);

    fn on_finish(&mut self, _accepted: bool) {}
}

impl<F: FnMut(u32, bool)> RoundObserver for F {
    fn on_round(&mut self, round: u32, passed: bool) {
        self(round, passed)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RoundObserver for NoopObserver {
    fn on_round(&mut self, _round: u32, _passed: bool) {}
}

/// Terminal progress bar over the verification rounds.
pub struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    pub fn new(rounds: u32) -> Self {
        let style = ProgressStyle::with_template(
            "Verification progress {wide_bar} {pos}/{len} rounds [{elapsed_precise}] {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        let bar = ProgressBar::new(rounds as u64).with_style(style);
        ProgressObserver { bar }
    }

    pub fn hidden() -> Self {
        ProgressObserver {
            bar: ProgressBar::hidden(),
        }
    }
}

impl RoundObserver for ProgressObserver {
    fn on_round(&mut self, _round: u32, passed: bool) {
        if passed {
            self.bar.inc(1);
        }
    }

    fn on_finish(&mut self, accepted: bool) {
        if accepted {
            self.bar.finish_with_message("accepted");
        } else {
            self.bar.abandon_with_message("rejected");
        }
    }
}
