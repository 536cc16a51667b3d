//! Step capability and one-shot completion flag

use heapless::String;

/// Maximum label length (fits the panel's step name field)
pub const MAX_LABEL_LEN: usize = 20;

/// Owned display label of a step
pub type StepLabel = String<MAX_LABEL_LEN>;

/// Build a label from text, truncating at a character boundary
pub fn make_label(text: &str) -> StepLabel {
    let mut label = StepLabel::new();
    for ch in text.chars() {
        if label.push(ch).is_err() {
            break;
        }
    }
    label
}

/// One-shot completion flag
///
/// Reads as `true` exactly once per [`mark`](Self::mark): [`take`](Self::take)
/// returns the current value and clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompletionFlag {
    set: bool,
}

impl CompletionFlag {
    /// Create a cleared flag
    pub const fn new() -> Self {
        Self { set: false }
    }

    /// Raise the flag. Raising an already raised flag has no further effect.
    pub fn mark(&mut self) {
        self.set = true;
    }

    /// Return the flag value and clear it
    pub fn take(&mut self) -> bool {
        core::mem::replace(&mut self.set, false)
    }

    /// Peek at the flag without clearing it
    pub fn is_pending(&self) -> bool {
        self.set
    }
}

/// A unit of work in the rig cycle
///
/// Concrete steps differ only in [`do_work`](Self::do_work): which outputs
/// they drive and which input condition makes them call
/// [`mark_completed`](Self::mark_completed). `do_work` must return promptly;
/// completion is detected on a later call, never by blocking.
///
/// `Io` is the peripheral context the step acts on. It is handed in on every
/// call so that steps never reach for global hardware state.
///
/// A step can be left before it completes (reset, manual navigation). The
/// sequencer calls [`rearm`](Self::rearm) whenever a step becomes current,
/// so a step must not carry in-progress state from an earlier visit.
pub trait Step {
    /// Peripheral context passed to [`do_work`](Self::do_work)
    type Io: ?Sized;

    /// Display name of the step
    fn label(&self) -> &str;

    /// Perform one slice of the step's action
    fn do_work(&mut self, io: &mut Self::Io);

    /// Access to the step's completion flag
    fn completion(&mut self) -> &mut CompletionFlag;

    /// Signal that the step's finish condition was met
    fn mark_completed(&mut self) {
        self.completion().mark();
    }

    /// Read and clear the completion flag
    fn is_completed(&mut self) -> bool {
        self.completion().take()
    }

    /// Forget any earlier visit so the next `do_work` starts from scratch
    ///
    /// The default only drops a stale completion. Steps that keep timers or
    /// latched inputs override this to clear them as well.
    fn rearm(&mut self, _io: &mut Self::Io) {
        self.completion().take();
    }
}

impl<T: Step + ?Sized> Step for &mut T {
    type Io = T::Io;

    fn label(&self) -> &str {
        (**self).label()
    }

    fn do_work(&mut self, io: &mut Self::Io) {
        (**self).do_work(io)
    }

    fn completion(&mut self) -> &mut CompletionFlag {
        (**self).completion()
    }

    fn rearm(&mut self, io: &mut Self::Io) {
        (**self).rearm(io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counting {
        label: StepLabel,
        completion: CompletionFlag,
        calls: u8,
    }

    impl Step for Counting {
        type Io = ();

        fn label(&self) -> &str {
            &self.label
        }

        fn do_work(&mut self, _io: &mut ()) {
            self.calls += 1;
            if self.calls == 2 {
                self.mark_completed();
            }
        }

        fn completion(&mut self) -> &mut CompletionFlag {
            &mut self.completion
        }
    }

    #[test]
    fn test_flag_reads_true_once() {
        let mut flag = CompletionFlag::new();
        flag.mark();
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn test_flag_never_marked() {
        let mut flag = CompletionFlag::default();
        assert!(!flag.is_pending());
        assert!(!flag.take());
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut flag = CompletionFlag::new();
        flag.mark();
        flag.mark();
        assert!(flag.is_pending());
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn test_step_completes_from_do_work() {
        let mut step = Counting {
            label: make_label("FEED STRAP"),
            completion: CompletionFlag::new(),
            calls: 0,
        };

        step.do_work(&mut ());
        assert!(!step.is_completed());

        step.do_work(&mut ());
        assert!(step.is_completed());
        assert!(!step.is_completed());
    }

    #[test]
    fn test_step_through_mut_ref() {
        let mut step = Counting {
            label: make_label("WELD"),
            completion: CompletionFlag::new(),
            calls: 0,
        };
        let dyn_step: &mut dyn Step<Io = ()> = &mut step;

        assert_eq!(dyn_step.label(), "WELD");
        dyn_step.mark_completed();
        assert!(dyn_step.is_completed());
        assert!(!dyn_step.is_completed());
    }

    #[test]
    fn test_default_rearm_drops_stale_completion() {
        let mut step = Counting {
            label: make_label("TENSION"),
            completion: CompletionFlag::new(),
            calls: 0,
        };
        step.mark_completed();

        step.rearm(&mut ());
        assert!(!step.is_completed());
    }

    #[test]
    fn test_label_truncates_at_char_boundary() {
        let label = make_label("BAND VORSCHIEBEN ÜBER");
        assert!(label.len() <= MAX_LABEL_LEN);
        assert!(label.starts_with("BAND VORSCHIEBEN"));

        let short = make_label("CUT");
        assert_eq!(short.as_str(), "CUT");
    }
}
