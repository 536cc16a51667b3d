//! Pneumatic cylinder trait

/// Trait for single-solenoid pneumatic cylinders
///
/// A cylinder is either commanded extended or retracted. On top of that a
/// timed stroke (extend, hold, retract, rest) can run; it is advanced by the
/// implementation's periodic update and reports completion once.
pub trait CylinderDriver {
    /// Command the cylinder extended or retracted
    ///
    /// Aborts a running stroke.
    fn set_extended(&mut self, extended: bool);

    /// Check if the cylinder is commanded extended
    fn is_extended(&self) -> bool;

    /// Extend the cylinder
    fn extend(&mut self) {
        self.set_extended(true);
    }

    /// Retract the cylinder
    fn retract(&mut self) {
        self.set_extended(false);
    }

    /// Flip the commanded position
    fn toggle(&mut self) {
        let extended = self.is_extended();
        self.set_extended(!extended);
    }

    /// Start a stroke: extend for `push_ms`, then retract and rest for
    /// `release_ms`
    ///
    /// Calling this while a stroke is in progress has no effect, so a step
    /// may call it on every `do_work`.
    fn stroke(&mut self, push_ms: u32, release_ms: u32);

    /// Check if a stroke is in progress
    fn is_stroking(&self) -> bool;

    /// Return whether a stroke finished since the last call, clearing the flag
    fn take_stroke_completed(&mut self) -> bool;
}
