//! Per-document tool sessions and the explicit session registry.

use crate::accumulator::PlaneAccumulator;
use crate::commit::CommitTarget;
use crate::config::ToolSettings;
use crate::host::PreviewHandle;
use crate::orientation::OrientationBasis;
use crate::tool::PlanerTool;
use hashbrown::HashMap;
use std::hash::Hash;

/// Which user interaction the tool is waiting on.
///
/// The orientation basis lives inside [`State::Orienting`], so its
/// validity is enforced by the state tag: leaving the state drops it.
#[derive(Debug, Clone, Default)]
pub enum State {
    /// Waiting for the first vertex pick.
    #[default]
    Init,
    /// Accumulating vertices under the moving cursor.
    Tagging,
    /// Point set frozen; deriving the in-plane basis from a reference
    /// point. `basis` stays `None` until a usable reference arrives.
    Orienting { basis: Option<OrientationBasis> },
}

/// Instance state of one tool activation.
///
/// One session is kept per open document (see [`SessionRegistry`]) so that
/// re-activating the tool resumes where the user left off.
#[derive(Debug, Clone, Default)]
pub struct ToolSession {
    pub(crate) state: State,
    pub(crate) accumulator: PlaneAccumulator,
    pub settings: ToolSettings,
    pub(crate) target: CommitTarget,
    pub(crate) preview: Option<PreviewHandle>,
}

impl ToolSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn accumulator(&self) -> &PlaneAccumulator {
        &self.accumulator
    }

    pub fn plane_defined(&self) -> bool {
        self.accumulator.fit().is_some()
    }

    pub fn commit_target(&self) -> &CommitTarget {
        &self.target
    }

    /// Commit will instance `prototype` instead of drawing raw geometry.
    pub fn bind_prototype(&mut self, prototype: impl Into<String>) {
        self.target = CommitTarget::Prototype(prototype.into());
    }

    /// Drop accumulated points and the fit. Settings and the commit
    /// target survive; any basis dies with the state transition that
    /// accompanies a reset.
    pub(crate) fn reset_geometry(&mut self) {
        self.accumulator.clear();
    }
}

/// Explicit registry of per-document tools, keyed by the host's document
/// identity. Dispatch is single-threaded, so the event loop owns this
/// exclusively.
#[derive(Debug, Clone)]
pub struct SessionRegistry<D: Eq + Hash> {
    tools: HashMap<D, PlanerTool>,
}

impl<D: Eq + Hash> Default for SessionRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Eq + Hash> SessionRegistry<D> {
    pub fn new() -> Self {
        SessionRegistry {
            tools: HashMap::new(),
        }
    }

    /// The tool for `document`, created on first use.
    pub fn get_or_create(&mut self, document: D) -> &mut PlanerTool {
        self.tools.entry(document).or_default()
    }

    pub fn get(&self, document: &D) -> Option<&PlanerTool> {
        self.tools.get(document)
    }

    /// Discard the session kept for a closed document.
    pub fn remove(&mut self, document: &D) -> Option<PlanerTool> {
        self.tools.remove(document)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
