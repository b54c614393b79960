//! The mapping from Touchstone files to the parameters drawn from them.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use sxplot_core::catalog::SParameter;

/// Files to plot, each with the parameters to draw from it.
///
/// Entries keep the order they were added in, which is the order curves
/// are drawn and legend entries listed. Adding a file that is already
/// present appends to its parameter list instead of moving it.
///
/// # Examples
///
/// ```
/// use sxplot::PlotSpec;
/// use sxplot_core::catalog::SParameter;
///
/// let mut spec = PlotSpec::new();
/// spec.add("thru.s2p", [SParameter::S12, SParameter::S21]);
/// spec.add("coupled.s2p", [SParameter::S21]);
///
/// assert_eq!(spec.len(), 2);
/// assert_eq!(spec.trace_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotSpec {
    entries: IndexMap<PathBuf, Vec<SParameter>>,
}

impl PlotSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds parameters to draw from `path`.
    pub fn add(
        &mut self,
        path: impl Into<PathBuf>,
        parameters: impl IntoIterator<Item = SParameter>,
    ) {
        self.entries
            .entry(path.into())
            .or_default()
            .extend(parameters);
    }

    /// Iterates files and their parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[SParameter])> {
        self.entries
            .iter()
            .map(|(path, parameters)| (path.as_path(), parameters.as_slice()))
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of curves drawn.
    pub fn trace_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl<P, I> FromIterator<(P, I)> for PlotSpec
where
    P: Into<PathBuf>,
    I: IntoIterator<Item = SParameter>,
{
    fn from_iter<T: IntoIterator<Item = (P, I)>>(iter: T) -> Self {
        let mut spec = Self::new();
        for (path, parameters) in iter {
            spec.add(path, parameters);
        }
        spec
    }
}
