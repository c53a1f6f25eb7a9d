//! Auxiliary outputs sub-domain of the store.

/// An auxiliary output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputId {
    /// Green indicator.
    Green,
    /// Blue indicator.
    Blue,
    /// Red indicator.
    Red,
}

/// Requested level of each auxiliary output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputsState {
    /// Green indicator.
    pub green: bool,
    /// Blue indicator.
    pub blue: bool,
    /// Red indicator.
    pub red: bool,
}

impl OutputsState {
    /// Every output on.
    pub const fn new() -> Self {
        Self {
            green: true,
            blue: true,
            red: true,
        }
    }

    /// Level of one output.
    pub fn get(&self, id: OutputId) -> bool {
        match id {
            OutputId::Green => self.green,
            OutputId::Blue => self.blue,
            OutputId::Red => self.red,
        }
    }

    fn get_mut(&mut self, id: OutputId) -> &mut bool {
        match id {
            OutputId::Green => &mut self.green,
            OutputId::Blue => &mut self.blue,
            OutputId::Red => &mut self.red,
        }
    }
}

impl Default for OutputsState {
    fn default() -> Self {
        Self::new()
    }
}

/// Actions of the outputs sub-domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputsAction {
    /// Invert one output.
    Toggle(OutputId),
    /// Drive one output to a level.
    Set(OutputId, bool),
}

/// Apply one outputs action.
pub fn reduce(mut state: OutputsState, action: &OutputsAction) -> OutputsState {
    match *action {
        OutputsAction::Toggle(id) => {
            let level = state.get_mut(id);
            *level = !*level;
        }
        OutputsAction::Set(id, level) => *state.get_mut(id) = level,
    }

    state
}
