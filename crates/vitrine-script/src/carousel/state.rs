//! Carousel state machine
//!
//! Pure index/pause bookkeeping. The controller turns the returned
//! [`Effect`] into DOM updates and timer resets.

/// Step direction for `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

/// What holds the carousel paused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauseSource {
    /// Pointer over the root or a descendant
    Pointer,
    /// Keyboard focus on the root or a descendant
    Focus,
}

/// Every input adapter reduces to one of these
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarouselCommand {
    /// Manual step (buttons, arrow keys)
    Advance(Direction),
    /// Manual jump (indicator dots); the index is taken modulo the count
    GoTo(usize),
    /// Pointer or focus entered (`true`) or left (`false`) the carousel root
    SetPaused { source: PauseSource, paused: bool },
    /// Automatic-advance timer fired
    Tick,
}

impl CarouselCommand {
    /// Map a `KeyboardEvent.key` to a command
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(Self::Advance(Direction::Forward)),
            "ArrowLeft" => Some(Self::Advance(Direction::Backward)),
            _ => None,
        }
    }

    /// Manual navigation restarts the automatic-advance countdown
    pub fn is_manual(&self) -> bool {
        matches!(self, Self::Advance(_) | Self::GoTo(_))
    }
}

/// What the controller must do after a command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effect {
    /// Re-sync slide visibility and indicator state
    pub render: bool,
    /// Cancel the timer and start a fresh full interval
    pub reset_timer: bool,
}

/// Current slide and pause sources for one carousel
///
/// `current < slide_count` always holds. The carousel is paused while the
/// pointer or keyboard focus is within its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    slide_count: usize,
    current: usize,
    hovered: bool,
    focus_within: bool,
}

impl CarouselState {
    /// State for `slide_count` slides showing the first one; `None` when
    /// there are no slides
    pub fn new(slide_count: usize) -> Option<Self> {
        (slide_count > 0).then_some(Self {
            slide_count,
            current: 0,
            hovered: false,
            focus_within: false,
        })
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_paused(&self) -> bool {
        self.hovered || self.focus_within
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn has_focus_within(&self) -> bool {
        self.focus_within
    }

    /// Make `index` (wrapped into range) the current slide
    pub fn show(&mut self, index: usize) -> usize {
        self.current = index % self.slide_count;
        self.current
    }

    /// Step one slide with wraparound in both directions
    pub fn advance(&mut self, direction: Direction) -> usize {
        let n = self.slide_count;
        let next = match direction {
            Direction::Forward => (self.current + 1) % n,
            Direction::Backward => (self.current + n - 1) % n,
        };
        self.show(next)
    }

    /// Apply one command
    pub fn apply(&mut self, command: CarouselCommand) -> Effect {
        match command {
            CarouselCommand::Advance(direction) => {
                self.advance(direction);
            }
            CarouselCommand::GoTo(index) => {
                self.show(index);
            }
            CarouselCommand::SetPaused { source, paused } => {
                match source {
                    PauseSource::Pointer => self.hovered = paused,
                    PauseSource::Focus => self.focus_within = paused,
                }
                return Effect::default();
            }
            CarouselCommand::Tick => {
                if self.is_paused() {
                    return Effect::default();
                }
                self.advance(Direction::Forward);
            }
        }
        Effect {
            render: true,
            reset_timer: command.is_manual(),
        }
    }
}
