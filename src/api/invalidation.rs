use serde::{Deserialize, Serialize};

use crate::core::ViewKind;

/// Dashboard state that a view's frame can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationTopic {
    Data,
    Filter,
    Selection,
    Viewport,
}

impl InvalidationTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::Data => 1 << 0,
            Self::Filter => 1 << 1,
            Self::Selection => 1 << 2,
            Self::Viewport => 1 << 3,
        }
    }
}

/// Bitmask of invalidation topics used for selective redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationTopics {
    bits: u8,
}

impl InvalidationTopics {
    const ALL_BITS: u8 = InvalidationTopic::Data.bit()
        | InvalidationTopic::Filter.bit()
        | InvalidationTopic::Selection.bit()
        | InvalidationTopic::Viewport.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    #[must_use]
    pub const fn from_topic(topic: InvalidationTopic) -> Self {
        Self { bits: topic.bit() }
    }

    #[must_use]
    pub const fn with_topic(self, topic: InvalidationTopic) -> Self {
        Self {
            bits: self.bits | topic.bit(),
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        (self.bits & other.bits) != 0
    }

    #[must_use]
    pub const fn contains_topic(self, topic: InvalidationTopic) -> bool {
        self.intersects(Self::from_topic(topic))
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }

    /// Topics whose change requires `view` to be rebuilt.
    ///
    /// Only the landmark map is zoomable, so viewport changes leave the other
    /// views untouched.
    #[must_use]
    pub const fn dependencies_of(view: ViewKind) -> Self {
        let shared = Self::from_topic(InvalidationTopic::Data)
            .with_topic(InvalidationTopic::Filter)
            .with_topic(InvalidationTopic::Selection);
        match view {
            ViewKind::Scatter | ViewKind::GradientProfiles => shared,
            ViewKind::LandmarkMap => shared.with_topic(InvalidationTopic::Viewport),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InvalidationTopic, InvalidationTopics};
    use crate::core::ViewKind;

    #[test]
    fn viewport_changes_only_touch_landmark_map() {
        let pending = InvalidationTopics::from_topic(InvalidationTopic::Viewport);
        assert!(!pending.intersects(InvalidationTopics::dependencies_of(ViewKind::Scatter)));
        assert!(pending.intersects(InvalidationTopics::dependencies_of(ViewKind::LandmarkMap)));
        assert!(InvalidationTopics::all().contains_topic(InvalidationTopic::Data));
    }
}
