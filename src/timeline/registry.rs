use crate::{
    foundation::core::ElementId,
    timeline::builder::Timeline,
    timeline::instruction::TimelineInstruction,
    timeline::stretched::StretchedTimeline,
    timeline::KeyframeSource,
};

/// Handle to a [`Timeline`] owned by a [`TimelineRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineId(usize);

/// A registered timeline, in either of its two flavors.
#[derive(Debug)]
pub enum TimelineKind {
    Simple(Timeline),
    Stretched(StretchedTimeline),
}

impl KeyframeSource for TimelineKind {
    fn element(&self) -> ElementId {
        match self {
            Self::Simple(t) => t.element(),
            Self::Stretched(t) => t.element(),
        }
    }

    fn contains_animation(&self) -> bool {
        match self {
            Self::Simple(t) => t.contains_animation(),
            Self::Stretched(t) => t.contains_animation(),
        }
    }

    fn build_keyframes(self) -> TimelineInstruction {
        match self {
            Self::Simple(t) => t.build_keyframes(),
            Self::Stretched(t) => t.build_keyframes(),
        }
    }
}

#[derive(Debug)]
enum Slot {
    Simple(TimelineId),
    Stretched(StretchedTimeline),
}

/// Append-only list of every timeline created during one compile run.
///
/// Simple timelines stay mutable (addressed by [`TimelineId`]) until the run ends; stretched ones
/// are final when registered. Registration order is the output order.
#[derive(Debug, Default)]
pub struct TimelineRegistry {
    arena: Vec<Timeline>,
    order: Vec<Slot>,
}

impl TimelineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, timeline: Timeline) -> TimelineId {
        let id = TimelineId(self.arena.len());
        tracing::trace!(
            element = %timeline.element(),
            start = timeline.start_time(),
            "registered timeline"
        );
        self.arena.push(timeline);
        self.order.push(Slot::Simple(id));
        id
    }

    pub fn register_stretched(&mut self, timeline: StretchedTimeline) {
        tracing::trace!(element = %timeline.element(), "registered delegated timeline");
        self.order.push(Slot::Stretched(timeline));
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn get(&self, id: TimelineId) -> &Timeline {
        &self.arena[id.0]
    }

    pub fn get_mut(&mut self, id: TimelineId) -> &mut Timeline {
        &mut self.arena[id.0]
    }

    /// Forks `source` into a new registered timeline.
    pub fn fork(&mut self, source: TimelineId, element: ElementId, at: Option<f64>) -> TimelineId {
        let forked = self.get_mut(source).fork(element, at);
        self.register(forked)
    }

    /// `into.merge_timeline_collected_styles(from)`; merging a timeline into itself is a no-op.
    pub fn merge_collected_styles(&mut self, into: TimelineId, from: TimelineId) {
        if into == from {
            return;
        }
        let (target, source) = pair_mut(&mut self.arena, into.0, from.0);
        target.merge_timeline_collected_styles(source);
    }

    /// Ends the run, yielding every timeline in registration order.
    pub fn into_timelines(self) -> Vec<TimelineKind> {
        let mut arena: Vec<Option<Timeline>> = self.arena.into_iter().map(Some).collect();
        self.order
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Simple(id) => arena[id.0].take().map(TimelineKind::Simple),
                Slot::Stretched(t) => Some(TimelineKind::Stretched(t)),
            })
            .collect()
    }
}

fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &T) {
    if a < b {
        let (lo, hi) = items.split_at_mut(b);
        (&mut lo[a], &hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(a);
        (&mut hi[0], &lo[b])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/registry.rs"]
mod tests;
