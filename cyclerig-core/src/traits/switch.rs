//! Digital switch input trait

/// Signal edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Inactive to active
    Rising,
    /// Active to inactive
    Falling,
}

/// Trait for debounced switch inputs (sensors, buttons)
pub trait SwitchInput {
    /// Debounced level
    fn is_active(&self) -> bool;

    /// Return whether `edge` occurred since the last call for that edge,
    /// clearing it
    fn take_edge(&mut self, edge: Edge) -> bool;
}
