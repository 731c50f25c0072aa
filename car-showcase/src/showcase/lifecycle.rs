use bevy::gltf::Gltf;
use bevy::prelude::*;
use thiserror::Error;

/// Why a requested car did not end up on screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFailure {
    #[error("failed to load model '{path}': {reason}")]
    Asset { path: String, reason: String },
    #[error("model '{path}' has no scene {scene}")]
    MissingScene { path: String, scene: usize },
    #[error("model '{path}' has no mesh geometry to frame")]
    EmptyScene { path: String },
    #[error("car {index} is out of range for a catalog of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result of one load request, tagged with the generation that issued it.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded {
        index: usize,
        generation: u64,
    },
    Failed {
        index: usize,
        generation: u64,
        reason: LoadFailure,
    },
}

impl LoadOutcome {
    pub fn index(&self) -> usize {
        match self {
            Self::Loaded { index, .. } | Self::Failed { index, .. } => *index,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
}

/// Strong handles keeping a car's glTF data resident. Dropping them releases
/// the meshes, materials and textures once no entity references them.
#[derive(Debug, Clone)]
pub struct ModelHandles {
    pub gltf: Handle<Gltf>,
    pub scene: Handle<Scene>,
}

/// A spawned scene root waiting for its glTF to finish loading.
#[derive(Debug, Clone)]
pub struct PendingLoad {
    pub generation: u64,
    pub index: usize,
    pub root: Entity,
    pub handles: ModelHandles,
}

/// The car currently on screen.
#[derive(Debug, Clone)]
pub struct ActiveModel {
    pub generation: u64,
    pub index: usize,
    pub root: Entity,
    pub handles: ModelHandles,
}

/// Issued by [`ModelLifecycle::begin`]: the new generation plus the roots
/// that must be despawned before the new load proceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub retired: Vec<Entity>,
}

/// Tags a scene root spawned by the lifecycle manager.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowcaseModel {
    pub generation: u64,
    pub index: usize,
}

/// Exclusive owner of the displayed car and of any in-flight load.
///
/// Every request opens a new generation. Completions only apply while their
/// generation is still the latest, so a slow load can never replace a car
/// requested after it.
#[derive(Resource, Debug, Default)]
pub struct ModelLifecycle {
    generation: u64,
    active: Option<ActiveModel>,
    pending: Option<PendingLoad>,
}

impl ModelLifecycle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> LoadPhase {
        if self.pending.is_some() {
            LoadPhase::Loading
        } else {
            LoadPhase::Idle
        }
    }

    pub fn active(&self) -> Option<&ActiveModel> {
        self.active.as_ref()
    }

    pub fn pending(&self) -> Option<&PendingLoad> {
        self.pending.as_ref()
    }

    /// Retire the displayed car and any in-flight load, and open a new
    /// generation. Handles are dropped here; the caller despawns the
    /// returned roots.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;

        let retired = self
            .active
            .take()
            .map(|active| active.root)
            .into_iter()
            .chain(self.pending.take().map(|pending| pending.root))
            .collect();

        LoadTicket {
            generation: self.generation,
            retired,
        }
    }

    /// Record the root spawned for the latest generation.
    /// Returns `false` (and records nothing) for an outdated generation.
    pub fn track(&mut self, pending: PendingLoad) -> bool {
        if pending.generation != self.generation {
            return false;
        }
        self.pending = Some(pending);
        true
    }

    /// Whether `root` is the in-flight load of the latest generation.
    pub fn is_current(&self, generation: u64, root: Entity) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| p.generation == generation && p.root == root && generation == self.generation)
    }

    /// Move the in-flight load into the active slot.
    pub fn promote(&mut self, generation: u64, root: Entity) -> Option<&ActiveModel> {
        if !self.is_current(generation, root) {
            return None;
        }
        let pending = self.pending.take()?;
        self.active = Some(ActiveModel {
            generation: pending.generation,
            index: pending.index,
            root: pending.root,
            handles: pending.handles,
        });
        self.active.as_ref()
    }

    /// Abandon the in-flight load of `generation`, returning it so the caller
    /// can despawn its root.
    pub fn fail(&mut self, generation: u64) -> Option<PendingLoad> {
        if self.pending.as_ref()?.generation != generation {
            return None;
        }
        self.pending.take()
    }
}
