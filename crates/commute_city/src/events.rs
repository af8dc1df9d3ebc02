//! Event types and sinks for observing city generation and the commute cycle.
//!
//! This module defines [`CityEvent`] and a small set of sinks to collect or forward events
//! while running [`crate::city::CityGenerator::generate_with`] or
//! [`crate::commute::scheduler::CommuteScheduler::tick_with_events`].
use crate::city::CityConfig;
use crate::commute::scheduler::CommutePhase;

/// Describes events emitted by generation and scheduling.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum CityEvent {
    /// Emitted before any generation stage runs.
    GenerationStarted {
        /// The validated configuration.
        config: CityConfig,
    },

    /// Emitted once the density field exists.
    FieldGenerated { width: usize, height: usize },

    /// Emitted once all sites are accepted.
    SitesSampled {
        /// Number of sites.
        count: usize,
    },

    /// Emitted after the planar graphs are derived.
    GraphBuilt {
        voronoi_edges: usize,
        delaunay_edges: usize,
        spanning_tree_edges: usize,
    },

    /// Emitted after roads, houses and offices are placed.
    LayoutPlaced {
        roads: usize,
        houses: usize,
        offices: usize,
    },

    /// Emitted after the host baked its navigation surface.
    NavigationBaked,

    /// Emitted after every agent got a home and an office.
    RosterAssigned { agents: usize },

    /// Emitted when the whole city is ready.
    GenerationFinished,

    /// Emitted when a dispatch phase spawned its wave.
    WaveDispatched {
        /// The dispatch phase that spawned.
        phase: CommutePhase,
        /// Number of agents spawned.
        agents: usize,
    },

    /// Emitted on every phase transition.
    PhaseSwitched {
        from: CommutePhase,
        to: CommutePhase,
    },

    /// Non-fatal warning.
    Warning {
        /// Context string (e.g. stage or phase).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`CityEvent`], for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CityEventKind {
    GenerationStarted,
    FieldGenerated,
    SitesSampled,
    GraphBuilt,
    LayoutPlaced,
    NavigationBaked,
    RosterAssigned,
    GenerationFinished,
    WaveDispatched,
    PhaseSwitched,
    Warning,
}

impl CityEvent {
    pub fn kind(&self) -> CityEventKind {
        match self {
            CityEvent::GenerationStarted { .. } => CityEventKind::GenerationStarted,
            CityEvent::FieldGenerated { .. } => CityEventKind::FieldGenerated,
            CityEvent::SitesSampled { .. } => CityEventKind::SitesSampled,
            CityEvent::GraphBuilt { .. } => CityEventKind::GraphBuilt,
            CityEvent::LayoutPlaced { .. } => CityEventKind::LayoutPlaced,
            CityEvent::NavigationBaked => CityEventKind::NavigationBaked,
            CityEvent::RosterAssigned { .. } => CityEventKind::RosterAssigned,
            CityEvent::GenerationFinished => CityEventKind::GenerationFinished,
            CityEvent::WaveDispatched { .. } => CityEventKind::WaveDispatched,
            CityEvent::PhaseSwitched { .. } => CityEventKind::PhaseSwitched,
            CityEvent::Warning { .. } => CityEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`CityEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: CityEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&self, _kind: CityEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: CityEvent) {}

    #[inline]
    fn wants(&self, _kind: CityEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(CityEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(CityEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(CityEvent),
{
    #[inline]
    fn send(&mut self, event: CityEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<CityEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<CityEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[CityEvent] {
        &self.events
    }

    pub fn kinds(&self) -> Vec<CityEventKind> {
        self.events.iter().map(CityEvent::kind).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: CityEvent) {
        self.events.push(event);
    }
}
