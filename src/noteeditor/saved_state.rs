use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};

pub type ViewId = i32;

pub const CUSTOM_VIEW_IDS_KEY: &str = "customViewIds";
pub const VIEW_HIERARCHY_STATE_KEY: &str = "viewHierarchyState";
pub const VIEWS_KEY: &str = "views";

/// Per-row saved state, keyed by the row id it was saved under.
pub trait RowStateLookup {
    type State;

    fn row_state(&self, id: ViewId) -> Option<Self::State>;
}

impl<S: Clone> RowStateLookup for HashMap<ViewId, S> {
    type State = S;

    fn row_state(&self, id: ViewId) -> Option<S> {
        self.get(&id).cloned()
    }
}

impl RowStateLookup for Map<String, Value> {
    type State = Value;

    fn row_state(&self, id: ViewId) -> Option<Value> {
        self.get(&id.to_string()).cloned()
    }
}

/// The saved-instance container the view host produces on teardown.
///
/// Only two things are read from it: the ids of the editor rows, and the nested per-row state
/// lookup. Either being absent means there is nothing to restore.
pub trait InstanceStateBundle {
    type Views: RowStateLookup;

    fn custom_view_ids(&self) -> Option<Vec<ViewId>>;

    fn view_hierarchy_state(&self) -> Option<&Self::Views>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewHierarchyState<S> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<HashMap<ViewId, S>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedInstanceState<S> {
    #[serde(
        rename = "customViewIds",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_view_ids: Option<Vec<ViewId>>,
    #[serde(
        rename = "viewHierarchyState",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub view_hierarchy_state: Option<ViewHierarchyState<S>>,
}

impl<S> SavedInstanceState<S> {
    /// Builds the container from the editor rows in display order.
    pub fn from_rows<I: IntoIterator<Item = (ViewId, S)>>(rows: I) -> Self {
        let mut ids = Vec::new();
        let mut views = HashMap::new();
        for (id, state) in rows {
            ids.push(id);
            views.insert(id, state);
        }
        Self {
            custom_view_ids: Some(ids),
            view_hierarchy_state: Some(ViewHierarchyState { views: Some(views) }),
        }
    }
}

impl<S: Clone> InstanceStateBundle for SavedInstanceState<S> {
    type Views = HashMap<ViewId, S>;

    fn custom_view_ids(&self) -> Option<Vec<ViewId>> {
        self.custom_view_ids.clone()
    }

    fn view_hierarchy_state(&self) -> Option<&HashMap<ViewId, S>> {
        self.view_hierarchy_state.as_ref()?.views.as_ref()
    }
}

/// Untyped containers: a non-integer id anywhere in the list counts as no list at all.
impl InstanceStateBundle for Value {
    type Views = Map<String, Value>;

    fn custom_view_ids(&self) -> Option<Vec<ViewId>> {
        self.get(CUSTOM_VIEW_IDS_KEY)?
            .as_array()?
            .iter()
            .map(|id| id.as_i64().and_then(|id| ViewId::try_from(id).ok()))
            .collect()
    }

    fn view_hierarchy_state(&self) -> Option<&Map<String, Value>> {
        self.get(VIEW_HIERARCHY_STATE_KEY)?.get(VIEWS_KEY)?.as_object()
    }
}

/// Row states captured before a teardown, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct RestorableRowState<S> {
    rows: Vec<(ViewId, Option<S>)>,
}

impl<S> RestorableRowState<S> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> Vec<ViewId> {
        self.rows.iter().map(|(id, _)| *id).collect()
    }

    pub fn get(&self, index: usize) -> Option<&(ViewId, Option<S>)> {
        self.rows.get(index)
    }

    pub fn into_rows(self) -> Vec<(ViewId, Option<S>)> {
        self.rows
    }
}

/// Ids with no saved entry keep a `None` placeholder so positions line up with `row_ids`.
pub fn capture<L: RowStateLookup>(row_ids: &[ViewId], lookup: &L) -> RestorableRowState<L::State> {
    let rows = row_ids.iter().map(|id| (*id, lookup.row_state(*id))).collect();
    RestorableRowState { rows }
}

/// `None` when either the row id list or the nested view state is missing.
pub fn capture_bundle<B: InstanceStateBundle>(
    bundle: &B,
) -> Option<RestorableRowState<<B::Views as RowStateLookup>::State>> {
    let Some(row_ids) = bundle.custom_view_ids() else {
        log::debug!("Saved state has no usable '{}'", CUSTOM_VIEW_IDS_KEY);
        return None;
    };
    let Some(views) = bundle.view_hierarchy_state() else {
        log::debug!("Saved state has no usable '{}.{}'", VIEW_HIERARCHY_STATE_KEY, VIEWS_KEY);
        return None;
    };
    Some(capture(&row_ids, views))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_capture_keeps_listed_ids_in_order() {
        let mut views = HashMap::new();
        views.insert(7, "seven".to_string());
        views.insert(3, "three".to_string());
        views.insert(99, "unrelated".to_string());

        let state = capture(&[3, 7, 12], &views);
        assert_eq!(state.len(), 3);
        assert_eq!(state.ids(), vec![3, 7, 12]);
        assert_eq!(
            state.into_rows(),
            vec![(3, Some("three".to_string())), (7, Some("seven".to_string())), (12, None)]
        );
    }

    #[test]
    fn test_typed_bundle_round_trip() {
        let saved = SavedInstanceState::from_rows(vec![(10, json!({"text": "A"})), (11, json!(null))]);
        let text = serde_json::to_string(&saved).unwrap();
        assert!(text.contains(CUSTOM_VIEW_IDS_KEY));
        assert!(text.contains(VIEW_HIERARCHY_STATE_KEY));

        let loaded: SavedInstanceState<Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded, saved);

        let state = capture_bundle(&loaded).unwrap();
        assert_eq!(state.ids(), vec![10, 11]);
        assert_eq!(state.get(0), Some(&(10, Some(json!({"text": "A"})))));
    }

    #[test]
    fn test_typed_bundle_missing_keys() {
        let no_ids: SavedInstanceState<Value> =
            serde_json::from_value(json!({"viewHierarchyState": {"views": {"1": "x"}}})).unwrap();
        assert!(capture_bundle(&no_ids).is_none());

        let no_views: SavedInstanceState<Value> =
            serde_json::from_value(json!({"customViewIds": [1], "viewHierarchyState": {}}))
                .unwrap();
        assert!(capture_bundle(&no_views).is_none());
    }

    #[test]
    fn test_untyped_bundle() {
        let bundle = json!({
            "customViewIds": [4, 5],
            "viewHierarchyState": {"views": {"4": {"text": "front"}, "8": "other"}}
        });
        let state = capture_bundle(&bundle).unwrap();
        assert_eq!(state.into_rows(), vec![(4, Some(json!({"text": "front"}))), (5, None)]);
    }

    #[test]
    fn test_untyped_bundle_wrong_shapes() {
        let bad_ids = json!({"customViewIds": [1, "two"], "viewHierarchyState": {"views": {}}});
        assert!(capture_bundle(&bad_ids).is_none());

        let ids_not_list = json!({"customViewIds": 1, "viewHierarchyState": {"views": {}}});
        assert!(capture_bundle(&ids_not_list).is_none());

        let views_not_object = json!({"customViewIds": [1], "viewHierarchyState": {"views": []}});
        assert!(capture_bundle(&views_not_object).is_none());

        assert!(capture_bundle(&json!("not a bundle")).is_none());
    }
}
