use rustc_hash::FxHashMap;

use crate::Location;

/// What an id was assigned to. Only used to word the duplicate id warning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    /// An inline `[[id]]` anchor.
    #[default]
    Anchor,
    /// A block id, from `[[id]]` above a block or `[#id]`.
    Block,
    Section,
    /// A `[[[id]]]` bibliography entry.
    Bibliography,
}

impl AnchorKind {
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            AnchorKind::Anchor => "anchor",
            AnchorKind::Block => "block",
            AnchorKind::Section => "section",
            AnchorKind::Bibliography => "bibliography reference",
        }
    }

    /// The warning reported when `id` is registered a second time.
    #[must_use]
    pub fn duplicate_message(self, id: &str) -> String {
        format!("id assigned to {} already in use: {id}", self.noun())
    }
}

/// The ids registered during one parse of a document, and where each was first seen.
#[derive(Debug, Default, Clone)]
pub struct AnchorRegistry {
    ids: FxHashMap<String, Location>,
}

impl AnchorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an id. Returns `false` if the id was already registered, in which case
    /// the first location is kept.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn register(&mut self, id: &str, location: &Location) -> bool {
        if self.ids.contains_key(id) {
            return false;
        }
        self.ids.insert(id.to_string(), location.clone());
        true
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Where `id` was first registered.
    #[must_use]
    pub fn location_of(&self, id: &str) -> Option<&Location> {
        self.ids.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Forget every id, for a new parse.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
