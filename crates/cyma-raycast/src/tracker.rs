use std::collections::BTreeSet;

use crate::tile::TileId;

/// Tiles lit during one frame.
pub type HotTileSet = BTreeSet<TileId>;

/// Hot/cold transitions between two consecutive frames, in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitDiff {
    pub newly_hot: Vec<TileId>,
    pub newly_dead: Vec<TileId>,
}

impl HitDiff {
    pub fn is_empty(&self) -> bool {
        self.newly_hot.is_empty() && self.newly_dead.is_empty()
    }
}

/// Tiles in `current` but not `previous` are newly hot; tiles in `previous`
/// but not `current` are newly dead. Tiles in both produce nothing.
pub fn diff(current: &HotTileSet, previous: &HotTileSet) -> HitDiff {
    HitDiff {
        newly_hot: current.difference(previous).copied().collect(),
        newly_dead: previous.difference(current).copied().collect(),
    }
}

/// Owns the previous frame's hot set and turns each new frame into edge events:
/// at most one "hot" per continuous illumination run and exactly one "dead"
/// when it ends.
#[derive(Debug, Clone, Default)]
pub struct HitTracker {
    previous: HotTileSet,
}

impl HitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff `current` against the last frame, then make it the last frame.
    pub fn update(&mut self, current: HotTileSet) -> HitDiff {
        let result = diff(&current, &self.previous);
        self.previous = current;
        result
    }

    pub fn hot(&self) -> &HotTileSet {
        &self.previous
    }

    pub fn is_hot(&self, id: TileId) -> bool {
        self.previous.contains(&id)
    }

    /// Forget all state, returning the tiles that were hot so the caller can
    /// release them.
    pub fn reset(&mut self) -> Vec<TileId> {
        std::mem::take(&mut self.previous).into_iter().collect()
    }
}
