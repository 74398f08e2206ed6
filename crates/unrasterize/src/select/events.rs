//! Event types and sinks for observing unrasterizer runs.
//!
//! This module defines [`UnrasterizeEvent`] and a set of sinks to emit, collect, or forward
//! events while running any [`crate::select::Unrasterizer`]. Events are emitted in block
//! order, then selection order, whether or not blocks were processed in parallel.
use crate::raster::Block;
use crate::select::{RepresentativePoint, Selection, SelectionConfig};

/// Describes events emitted by unrasterizer runs.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum UnrasterizeEvent {
    /// Emitted when a run starts.
    RunStarted {
        /// Name of the unrasterizer.
        method: &'static str,
        /// Greedy selection parameters, if the method uses them.
        config: Option<SelectionConfig>,
        /// Number of blocks the raster will be processed in.
        block_count: usize,
    },

    /// Emitted when the run finishes successfully.
    RunFinished {
        /// Combined result of all blocks.
        selection: Selection,
    },

    /// Emitted before a block's points are reported.
    BlockStarted {
        /// Index of the block in iteration order.
        index: usize,
        /// Block bounds in the full raster.
        block: Block,
    },

    /// Emitted after all points of a block were reported.
    BlockFinished {
        /// Index of the block in iteration order.
        index: usize,
        /// Block bounds in the full raster.
        block: Block,
        /// What was ranked and selected in this block.
        summary: BlockSummary,
    },

    /// Emitted for every representative point, in output order.
    PointSelected {
        /// Index of the block that produced the point.
        block_index: usize,
        /// The selected point.
        point: RepresentativePoint,
    },

    /// Non-fatal warning generated during a run.
    Warning {
        /// Context string (e.g. block bounds).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

impl UnrasterizeEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UnrasterizeEvent::RunStarted { .. } => EventKind::RunStarted,
            UnrasterizeEvent::RunFinished { .. } => EventKind::RunFinished,
            UnrasterizeEvent::BlockStarted { .. } => EventKind::BlockStarted,
            UnrasterizeEvent::BlockFinished { .. } => EventKind::BlockFinished,
            UnrasterizeEvent::PointSelected { .. } => EventKind::PointSelected,
            UnrasterizeEvent::Warning { .. } => EventKind::Warning,
        }
    }
}

/// Discriminant of [`UnrasterizeEvent`], used by sinks to opt out of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    RunStarted,
    RunFinished,
    BlockStarted,
    BlockFinished,
    PointSelected,
    Warning,
}

/// Per-block counts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlockSummary {
    /// Candidate pixels ranked in the block.
    pub candidates: usize,
    /// Points selected in the block.
    pub points: usize,
    /// Sum of the aggregated values of the block's points.
    pub value_total: f64,
}

impl BlockSummary {
    pub fn new(candidates: usize, points: &[RepresentativePoint]) -> Self {
        Self {
            candidates,
            points: points.len(),
            value_total: points.iter().map(|p| p.value).sum(),
        }
    }
}

/// A generic event sink that accepts [`UnrasterizeEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: UnrasterizeEvent);

    /// Whether the sink wants events of `kind`. Emitters skip building unwanted events.
    fn wants(&self, _kind: EventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = UnrasterizeEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: UnrasterizeEvent) {}

    #[inline]
    fn wants(&self, _kind: EventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(UnrasterizeEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(UnrasterizeEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(UnrasterizeEvent),
{
    #[inline]
    fn send(&mut self, event: UnrasterizeEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<UnrasterizeEvent>,
    only: Option<Vec<EventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect only events of the given kinds.
    pub fn only(kinds: impl IntoIterator<Item = EventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<UnrasterizeEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[UnrasterizeEvent] {
        &self.events
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
    fn send(&mut self, event: UnrasterizeEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: EventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: UnrasterizeEvent) {
        let kind = event.kind();
        let mut targets: Vec<&mut S> = self.sinks.iter_mut().filter(|s| s.wants(kind)).collect();
        let Some(last) = targets.pop() else {
            return;
        };
        for sink in targets {
            sink.send(event.clone());
        }
        last.send(event);
    }

    fn wants(&self, kind: EventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
