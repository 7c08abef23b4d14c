//! # Recurrent State

/// A state leaf which can be cut loose from the computation that produced it.
pub trait DetachState: Sized {
    /// Return a copy of the state with no history attached.
    fn detach(&self) -> Self;
}

impl DetachState for Vec<f32> {
    fn detach(&self) -> Self {
        self.clone()
    }
}

/// Nested model state: a single leaf, or an ordered list of sub-states.
///
/// Multi-layer models typically return a `Composite` per layer, each
/// holding `Leaf` tensors.
#[derive(Debug, Clone, PartialEq)]
pub enum RecurrentState<S> {
    /// A single state value.
    Leaf(S),

    /// An ordered list of sub-states.
    Composite(Vec<RecurrentState<S>>),
}

impl<S> RecurrentState<S> {
    /// The number of leaves, recursively.
    pub fn leaf_count(&self) -> usize {
        match self {
            RecurrentState::Leaf(_) => 1,
            RecurrentState::Composite(children) => children.iter().map(Self::leaf_count).sum(),
        }
    }

    /// Collect the leaves, depth-first.
    pub fn leaves(&self) -> Vec<&S> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(
        &'a self,
        out: &mut Vec<&'a S>,
    ) {
        match self {
            RecurrentState::Leaf(s) => out.push(s),
            RecurrentState::Composite(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Apply `f` to every leaf, preserving structure.
    pub fn map<R, F>(
        &self,
        f: &mut F,
    ) -> RecurrentState<R>
    where
        F: FnMut(&S) -> R,
    {
        match self {
            RecurrentState::Leaf(s) => RecurrentState::Leaf(f(s)),
            RecurrentState::Composite(children) => {
                RecurrentState::Composite(children.iter().map(|c| c.map(f)).collect())
            }
        }
    }
}

impl<S: DetachState> RecurrentState<S> {
    /// Recursively detach every leaf.
    pub fn detach(&self) -> Self {
        self.map(&mut S::detach)
    }
}
