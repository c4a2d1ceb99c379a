//! Display filtering
//!
//! Subsets of the chain for the textual debug view. These never feed the
//! layout; the graph always shows the full model.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::chain::TransitionModel;
use crate::error::Result;

/// Display subset of a model, borrowed when unfiltered
pub type ChainView<'a> = Cow<'a, TransitionModel>;

/// Restrict the model to the focused token's outgoing transitions.
///
/// With no focus the full model is returned unchanged. A focused token that
/// is absent from the model yields an empty view.
#[must_use]
pub fn focus_view<'a>(model: &'a TransitionModel, focused: Option<&str>) -> ChainView<'a> {
    let Some(token) = focused else {
        return Cow::Borrowed(model);
    };

    let mut entries = IndexMap::new();
    if let Some(successors) = model.get(token) {
        entries.insert(token.to_string(), successors.clone());
    }
    Cow::Owned(TransitionModel::from_entries(entries))
}

/// Pretty JSON (2-space indent) of the focus view
pub fn focus_view_json(model: &TransitionModel, focused: Option<&str>) -> Result<String> {
    focus_view(model, focused).to_json_pretty()
}
