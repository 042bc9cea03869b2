use std::sync::Arc;

use re_batch_core::{ComponentBatch, ComponentColumn};

/// The path to an entity, e.g. `world/boxes`.
///
/// Parts are separated by `/`. Empty parts are dropped, so `/world//boxes/` and `world/boxes`
/// are the same path.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityPath(Arc<str>);

impl EntityPath {
    /// The root path, `/`.
    #[inline]
    pub fn root() -> Self {
        Self(Arc::from(""))
    }

    /// Parses a `/`-separated path.
    pub fn new(path: &str) -> Self {
        let normalized = path
            .split('/')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Self(normalized.into())
    }

    /// Is this the root path?
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The parts of the path, from the root down.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split('/').filter(|part| !part.is_empty())
    }

    /// The path without its leading `/`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityPath {
    #[inline]
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for EntityPath {
    #[inline]
    fn from(path: String) -> Self {
        Self::new(&path)
    }
}

impl From<&String> for EntityPath {
    #[inline]
    fn from(path: &String) -> Self {
        Self::new(path)
    }
}

impl std::fmt::Display for EntityPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.0)
    }
}

impl std::fmt::Debug for EntityPath {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

// ---

/// What a [`crate::sink::LogSink`] receives.
#[derive(Clone, Debug, PartialEq)]
pub enum LogMsg {
    /// One row of data: an ordered list of batches logged together.
    ///
    /// For archetypes, the last batch is the indicator.
    Batches {
        /// The entity the batches are logged to.
        entity_path: EntityPath,

        /// The length of the longest batch.
        num_instances: usize,

        /// The batches, in the order they were produced.
        batches: Vec<ComponentBatch>,
    },

    /// Many rows of data at once: every column has the same number of runs.
    Columns {
        /// The entity the columns are logged to.
        entity_path: EntityPath,

        /// The columns, all with the same number of runs.
        columns: Vec<ComponentColumn>,
    },
}

impl LogMsg {
    /// The entity this message is about.
    #[inline]
    pub fn entity_path(&self) -> &EntityPath {
        match self {
            Self::Batches { entity_path, .. } | Self::Columns { entity_path, .. } => entity_path,
        }
    }

    /// Number of rows carried by this message.
    #[inline]
    pub fn num_rows(&self) -> usize {
        match self {
            Self::Batches { .. } => 1,
            Self::Columns { columns, .. } => columns.first().map_or(0, ComponentColumn::num_runs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_path_normalization() {
        assert_eq!(EntityPath::from("/world//boxes/"), EntityPath::from("world/boxes"));
        assert_eq!(EntityPath::from("world/boxes").to_string(), "/world/boxes");
        assert_eq!(
            EntityPath::from("a/b/c").iter().collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
        assert!(EntityPath::from("/").is_root());
        assert_eq!(EntityPath::root().to_string(), "/");
    }
}
