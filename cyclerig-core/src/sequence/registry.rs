//! Ordered, fixed-at-setup collection of steps

use heapless::Vec;

use super::step::Step;

/// Default registry capacity
pub const MAX_STEPS: usize = 16;

/// Registry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Registration attempted after the sequence was sealed
    Sealed,
    /// Registry capacity exhausted
    Full,
    /// Index outside `[0, count)`
    OutOfRange { index: usize, count: usize },
}

/// Step registry
///
/// Insertion order is cycle order. Steps can only be registered during
/// setup: once [`seal`](Self::seal) has been called (the sequencer does so
/// when it takes ownership) the sequence is immutable.
#[derive(Debug)]
pub struct StepRegistry<S, const N: usize = MAX_STEPS> {
    steps: Vec<S, N>,
    sealed: bool,
}

impl<S, const N: usize> Default for StepRegistry<S, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, const N: usize> StepRegistry<S, N> {
    /// Create an empty, unsealed registry
    pub const fn new() -> Self {
        Self {
            steps: Vec::new(),
            sealed: false,
        }
    }

    /// Append a step to the cycle
    ///
    /// Returns the index the step was registered at.
    pub fn register(&mut self, step: S) -> Result<usize, RegistryError> {
        if self.sealed {
            return Err(RegistryError::Sealed);
        }
        self.steps.push(step).map_err(|_| RegistryError::Full)?;
        Ok(self.steps.len() - 1)
    }

    /// Freeze the sequence
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Check if the sequence is frozen
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of registered steps
    pub fn count(&self) -> usize {
        self.steps.len()
    }

    /// Check if no steps are registered
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Get the step at `index`
    pub fn step_at(&self, index: usize) -> Result<&S, RegistryError> {
        let count = self.steps.len();
        self.steps
            .get(index)
            .ok_or(RegistryError::OutOfRange { index, count })
    }

    /// Get the step at `index` mutably
    pub fn step_at_mut(&mut self, index: usize) -> Result<&mut S, RegistryError> {
        let count = self.steps.len();
        self.steps
            .get_mut(index)
            .ok_or(RegistryError::OutOfRange { index, count })
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut S> {
        self.steps.iter_mut()
    }
}

impl<S: Step, const N: usize> StepRegistry<S, N> {
    /// Iterate over the step labels in cycle order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::step::{make_label, CompletionFlag, StepLabel};

    struct Named {
        label: StepLabel,
        completion: CompletionFlag,
    }

    impl Named {
        fn new(label: &str) -> Self {
            Self {
                label: make_label(label),
                completion: CompletionFlag::new(),
            }
        }
    }

    impl Step for Named {
        type Io = ();

        fn label(&self) -> &str {
            &self.label
        }

        fn do_work(&mut self, _io: &mut ()) {}

        fn completion(&mut self) -> &mut CompletionFlag {
            &mut self.completion
        }
    }

    #[test]
    fn test_register_keeps_order() {
        let mut registry: StepRegistry<Named, 4> = StepRegistry::new();
        assert_eq!(registry.register(Named::new("CLAMP")), Ok(0));
        assert_eq!(registry.register(Named::new("TENSION")), Ok(1));
        assert_eq!(registry.register(Named::new("WELD")), Ok(2));

        assert_eq!(registry.count(), 3);
        let mut labels = registry.labels();
        assert_eq!(labels.next(), Some("CLAMP"));
        assert_eq!(labels.next(), Some("TENSION"));
        assert_eq!(labels.next(), Some("WELD"));
        assert_eq!(labels.next(), None);
    }

    #[test]
    fn test_register_after_seal_rejected() {
        let mut registry: StepRegistry<Named, 4> = StepRegistry::new();
        registry.register(Named::new("CUT")).unwrap();
        registry.seal();

        assert!(registry.is_sealed());
        assert_eq!(
            registry.register(Named::new("LATE")).err(),
            Some(RegistryError::Sealed)
        );
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_register_full() {
        let mut registry: StepRegistry<Named, 2> = StepRegistry::new();
        registry.register(Named::new("A")).unwrap();
        registry.register(Named::new("B")).unwrap();
        assert_eq!(
            registry.register(Named::new("C")).err(),
            Some(RegistryError::Full)
        );
    }

    #[test]
    fn test_step_at_out_of_range() {
        let mut registry: StepRegistry<Named, 4> = StepRegistry::new();
        registry.register(Named::new("A")).unwrap();

        assert_eq!(registry.step_at(0).map(|s| s.label()), Ok("A"));
        assert_eq!(
            registry.step_at(1).err(),
            Some(RegistryError::OutOfRange { index: 1, count: 1 })
        );
        assert!(registry.step_at_mut(7).is_err());
    }

    #[test]
    fn test_empty_registry() {
        let registry: StepRegistry<Named> = StepRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.count(), 0);
        assert_eq!(
            registry.step_at(0).err(),
            Some(RegistryError::OutOfRange { index: 0, count: 0 })
        );
    }
}
