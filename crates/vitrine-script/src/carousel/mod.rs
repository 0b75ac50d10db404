//! Carousel controller
//!
//! Owns the slide and indicator nodes, the single automatic-advance timer,
//! and the listeners that feed [`CarouselCommand`]s into it. All commands go
//! through [`Carousel::apply`], which is the only place slide visibility and
//! indicator state are written.

mod state;

pub use state::{CarouselCommand, CarouselState, Direction, Effect, PauseSource};

use tracing::{debug, info, trace};
use vitrine_dom::{Document, DomResult, DomTree, EventType, ListenerId, ListenerRegistry, NodeId};
use vitrine_runtime::{EventLoop, TimerId};

use crate::config::{CarouselConfig, KeyboardScope};
use crate::page::Action;

/// Mounted carousel
#[derive(Debug)]
pub struct Carousel {
    state: CarouselState,
    slides: Vec<NodeId>,
    dots: Vec<NodeId>,
    root: Option<NodeId>,
    timer: Option<TimerId>,
    listeners: Vec<ListenerId>,
    interval_ms: u64,
    active_class: String,
    keyboard_scope: KeyboardScope,
}

/// Stamp index, id and visibility on each slide and build one indicator
/// button per slide inside `dots_bar`. Returns the indicators.
fn decorate(
    tree: &mut DomTree,
    slides: &[NodeId],
    dots_bar: Option<NodeId>,
    active_class: &str,
) -> DomResult<Vec<NodeId>> {
    for (i, &slide) in slides.iter().enumerate() {
        tree.dataset_set(slide, "index", &i.to_string())?;
        tree.set_attribute(slide, "id", &format!("slide-{i}"))?;
        tree.set_attribute(slide, "aria-hidden", if i == 0 { "false" } else { "true" })?;
    }

    let Some(bar) = dots_bar else {
        return Ok(Vec::new());
    };
    let mut dots = Vec::with_capacity(slides.len());
    for i in 0..slides.len() {
        let dot = tree.create_element("button");
        tree.set_attribute(dot, "type", "button")?;
        tree.dataset_set(dot, "index", &i.to_string())?;
        let class = if i == 0 {
            format!("dot {active_class}")
        } else {
            "dot".to_string()
        };
        tree.set_attribute(dot, "class", &class)?;
        tree.set_attribute(dot, "aria-label", &format!("Go to slide {}", i + 1))?;
        tree.append_child(bar, dot)?;
        dots.push(dot);
    }
    Ok(dots)
}

impl Carousel {
    /// Wire the carousel found in `doc`
    ///
    /// Returns `None`, without touching the document, registering listeners
    /// or starting a timer, when the viewport or its slides are absent.
    pub fn mount(
        doc: &mut Document,
        listeners: &mut ListenerRegistry<Action>,
        event_loop: &mut EventLoop<Action>,
        config: &CarouselConfig,
    ) -> DomResult<Option<Self>> {
        let Some(viewport) = doc.get_element_by_id(&config.viewport_id) else {
            debug!("No #{} on page, carousel disabled", config.viewport_id);
            return Ok(None);
        };
        let slides = doc.query_selector_all(viewport, &format!(".{}", config.slide_class));
        let Some(state) = CarouselState::new(slides.len()) else {
            debug!("#{} has no slides, carousel disabled", config.viewport_id);
            return Ok(None);
        };

        let prev = doc.get_element_by_id(&config.prev_id);
        let next = doc.get_element_by_id(&config.next_id);
        let dots_bar = doc.get_element_by_id(&config.dots_id);
        let root = doc.query_selector(NodeId::ROOT, &format!(".{}", config.root_class));

        if dots_bar.is_none() {
            debug!("No #{}, carousel runs without indicators", config.dots_id);
        }
        // All DOM writes succeed before anything is registered.
        let dots = decorate(doc.tree_mut(), &slides, dots_bar, &config.active_class)?;

        let mut registered: Vec<ListenerId> = dots
            .iter()
            .enumerate()
            .map(|(i, &dot)| {
                listeners.add(dot, EventType::Click, Action::Carousel(CarouselCommand::GoTo(i)))
            })
            .collect();

        let buttons = [(next, Direction::Forward), (prev, Direction::Backward)];
        for (button, direction) in buttons {
            if let Some(button) = button {
                registered.push(listeners.add(
                    button,
                    EventType::Click,
                    Action::Carousel(CarouselCommand::Advance(direction)),
                ));
            }
        }

        if let Some(root) = root {
            let pause = [
                (EventType::MouseEnter, PauseSource::Pointer, true),
                (EventType::MouseLeave, PauseSource::Pointer, false),
                (EventType::FocusIn, PauseSource::Focus, true),
                (EventType::FocusOut, PauseSource::Focus, false),
            ];
            for (event_type, source, paused) in pause {
                registered.push(listeners.add(
                    root,
                    event_type,
                    Action::Carousel(CarouselCommand::SetPaused { source, paused }),
                ));
            }
        }

        registered.push(listeners.add(NodeId::ROOT, EventType::KeyDown, Action::CarouselKey));

        let timer = event_loop.set_interval(Action::Carousel(CarouselCommand::Tick), config.interval_ms);

        info!(
            "Carousel mounted: {} slides, {} indicators, every {}ms",
            slides.len(),
            dots.len(),
            config.interval_ms
        );

        Ok(Some(Self {
            state,
            slides,
            dots,
            root,
            timer: Some(timer),
            listeners: registered,
            interval_ms: config.interval_ms,
            active_class: config.active_class.clone(),
            keyboard_scope: config.keyboard_scope,
        }))
    }

    /// Apply one command: update state, re-render, reset the timer after
    /// manual navigation
    pub fn apply(
        &mut self,
        doc: &mut Document,
        event_loop: &mut EventLoop<Action>,
        command: CarouselCommand,
    ) -> DomResult<()> {
        let before = self.state.current();
        let effect = self.state.apply(command);

        if let CarouselCommand::SetPaused { source, .. } = command {
            debug!("Carousel {:?} pause source changed, paused={}", source, self.state.is_paused());
        }
        if effect.render {
            if before != self.state.current() {
                debug!("Carousel slide {} -> {}", before, self.state.current());
            }
            self.render(doc)?;
        }
        if effect.reset_timer {
            self.restart_timer(event_loop);
        }
        Ok(())
    }

    /// Arrow-key adapter
    pub fn handle_key(
        &mut self,
        doc: &mut Document,
        event_loop: &mut EventLoop<Action>,
        key: &str,
    ) -> DomResult<()> {
        let Some(command) = CarouselCommand::from_key(key) else {
            return Ok(());
        };
        let inside = self.state.is_hovered() || self.state.has_focus_within();
        if self.keyboard_scope == KeyboardScope::Root && !inside {
            trace!("Ignoring {} outside the carousel", key);
            return Ok(());
        }
        self.apply(doc, event_loop, command)
    }

    /// Sync every slide's `aria-hidden` and every indicator's active class
    fn render(&self, doc: &mut Document) -> DomResult<()> {
        let current = self.state.current();
        let tree = doc.tree_mut();
        for (i, &slide) in self.slides.iter().enumerate() {
            tree.set_attribute(slide, "aria-hidden", if i == current { "false" } else { "true" })?;
        }
        for (i, &dot) in self.dots.iter().enumerate() {
            tree.toggle_class(dot, &self.active_class, Some(i == current))?;
        }
        Ok(())
    }

    fn restart_timer(&mut self, event_loop: &mut EventLoop<Action>) {
        if let Some(old) = self.timer.take() {
            event_loop.clear_timer(old);
        }
        self.timer = Some(event_loop.set_interval(Action::Carousel(CarouselCommand::Tick), self.interval_ms));
        trace!("Carousel timer restarted at t={}", event_loop.now());
    }

    /// Stop the timer and detach every listener this carousel registered
    pub fn dispose(&mut self, listeners: &mut ListenerRegistry<Action>, event_loop: &mut EventLoop<Action>) {
        if let Some(timer) = self.timer.take() {
            event_loop.clear_timer(timer);
        }
        for id in self.listeners.drain(..) {
            listeners.remove(id);
        }
        debug!("Carousel disposed");
    }

    /// Index of the visible slide
    pub fn current_index(&self) -> usize {
        self.state.current()
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    /// Slide elements in display order
    pub fn slides(&self) -> &[NodeId] {
        &self.slides
    }

    /// Generated indicator buttons, one per slide
    pub fn dots(&self) -> &[NodeId] {
        &self.dots
    }

    /// Element whose hover/focus pauses the carousel
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Active automatic-advance timer
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }
}
