//! Per-session filter state layered over the shared, read-only dataset.

use crate::model::Dataset;
use crate::pipeline::{compute_views, Selection, Views};
use crate::Result;

/// One UI session's mutable state: the active filter selection and the last
/// valid set of derived views.
///
/// Sessions are independent of each other; the dataset itself is shared and
/// never mutated. Events are applied one at a time, and a rejected event (an
/// [`EmptySelection`](crate::EmptySelection)) leaves the session exactly as
/// it was.
#[derive(Debug, Clone)]
pub struct Session {
    selection: Selection,
    views: Views,
}

impl Session {
    /// Creates a session in its initial state: every observed value selected,
    /// views equal to the unfiltered dataset.
    pub fn new(dataset: &Dataset) -> Result<Self> {
        let selection = Selection::all(dataset);
        let views = compute_views(dataset, &selection)?;
        Ok(Self { selection, views })
    }

    /// Applies a filter-change event. On success the selection and all three
    /// derived views are replaced together. On error (empty selection) the
    /// prior state is retained and the error is returned for the caller to
    /// surface as a warning.
    pub fn apply(&mut self, dataset: &Dataset, selection: Selection) -> Result<()> {
        let views = compute_views(dataset, &selection)?;
        self.selection = selection;
        self.views = views;
        Ok(())
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn views(&self) -> &Views {
        &self.views
    }
}
