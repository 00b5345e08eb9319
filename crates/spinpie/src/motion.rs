use strum::Display as StrumDisplay;

/// What is currently moving the pie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, StrumDisplay)]
pub enum Motion {
    #[default]
    Idle,
    Dragging,
    Flinging,
    AutoCentering,
}

impl Motion {
    /// Whether the host has to keep delivering frame ticks.
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Flinging | Self::AutoCentering)
    }
}

/// Returned by every chart call that may change what is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartAction {
    pub should_redraw: bool,
}

impl ChartAction {
    pub fn new(should_redraw: bool) -> Self {
        Self { should_redraw }
    }

    pub fn redraw() -> Self {
        Self::new(true)
    }

    pub fn none() -> Self {
        Self::new(false)
    }

    pub fn merge(self, other: Self) -> Self {
        Self::new(self.should_redraw || other.should_redraw)
    }
}
