use std::collections::{
    BTreeSet,
    HashMap,
};

use crate::{
    anki::{
        Model,
        TemplateFieldMap,
    },
    core::Result,
};

/// Model-change field map: (old slot, new slot) links, as chosen in a "change note type" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotRemapTable {
    links: BTreeSet<(usize, usize)>,
}

impl SlotRemapTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_old_to_new(map: HashMap<usize, usize>) -> Self {
        Self { links: map.into_iter().collect() }
    }

    pub fn from_new_to_old(map: HashMap<usize, usize>) -> Self {
        Self { links: map.into_iter().map(|(new, old)| (old, new)).collect() }
    }

    /// Every slot below `count` keeps its position.
    pub fn identity(count: usize) -> Self {
        Self { links: (0..count).map(|slot| (slot, slot)).collect() }
    }

    pub fn insert(&mut self, old_slot: usize, new_slot: usize) {
        self.links.insert((old_slot, new_slot));
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The old slot feeding `new_slot`. If several do, the lowest wins; callers should not
    /// rely on that.
    pub fn old_slot_for(&self, new_slot: usize) -> Option<usize> {
        self.links.iter().find(|(_, new)| *new == new_slot).map(|(old, _)| *old)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.links.iter().copied()
    }
}

impl FromIterator<(usize, usize)> for SlotRemapTable {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self { links: iter.into_iter().collect() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Init,
    ClearKeepSticky,
    ChangeFieldCount,
    Refresh,
    RefreshWithMap,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Init => "init",
            ChangeKind::ClearKeepSticky => "clear_keep_sticky",
            ChangeKind::ChangeFieldCount => "change_field_count",
            ChangeKind::Refresh => "refresh",
            ChangeKind::RefreshWithMap => "refresh_with_map",
        }
    }
}

/// Target of a note type change. Only built through [`FieldChangeType::refresh_with_map`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModelChange {
    new_model: TemplateFieldMap,
    remap: SlotRemapTable,
}

impl ModelChange {
    pub fn new_model(&self) -> &TemplateFieldMap {
        &self.new_model
    }

    pub fn remap(&self) -> &SlotRemapTable {
        &self.remap
    }
}

/// How fields should be changed when the editor is rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChangeType {
    Init,
    ClearKeepSticky,
    ChangeFieldCount,
    Refresh,
    RefreshWithMap(ModelChange),
}

impl FieldChangeType {
    pub fn on_activity_creation() -> Self {
        FieldChangeType::Init
    }

    pub fn refresh() -> Self {
        FieldChangeType::Refresh
    }

    pub fn refresh_with_sticky_fields() -> Self {
        FieldChangeType::ClearKeepSticky
    }

    pub fn change_field_count() -> Self {
        FieldChangeType::ChangeFieldCount
    }

    /// Fails with `InvalidArgument` when the model's slots are not exactly `0..n`.
    pub fn refresh_with_map(new_model: &Model, remap: SlotRemapTable) -> Result<Self> {
        Self::refresh_with_field_map(new_model.field_map(), remap)
    }

    pub fn refresh_with_field_map(new_model: TemplateFieldMap, remap: SlotRemapTable) -> Result<Self> {
        new_model.validate()?;
        Ok(FieldChangeType::RefreshWithMap(ModelChange { new_model, remap }))
    }

    pub fn kind(&self) -> ChangeKind {
        match self {
            FieldChangeType::Init => ChangeKind::Init,
            FieldChangeType::ClearKeepSticky => ChangeKind::ClearKeepSticky,
            FieldChangeType::ChangeFieldCount => ChangeKind::ChangeFieldCount,
            FieldChangeType::Refresh => ChangeKind::Refresh,
            FieldChangeType::RefreshWithMap(_) => ChangeKind::RefreshWithMap,
        }
    }

    pub fn is_initial_load(&self) -> bool {
        matches!(self, FieldChangeType::Init)
    }

    pub fn model_change(&self) -> Option<&ModelChange> {
        match self {
            FieldChangeType::RefreshWithMap(change) => Some(change),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldStateError;

    #[test]
    fn test_constructors_map_to_kinds() {
        assert_eq!(FieldChangeType::on_activity_creation().kind(), ChangeKind::Init);
        assert_eq!(FieldChangeType::refresh().kind(), ChangeKind::Refresh);
        assert_eq!(FieldChangeType::refresh_with_sticky_fields().kind(), ChangeKind::ClearKeepSticky);
        assert_eq!(FieldChangeType::change_field_count().kind(), ChangeKind::ChangeFieldCount);
        assert!(FieldChangeType::on_activity_creation().is_initial_load());
        assert!(!FieldChangeType::refresh().is_initial_load());
        assert!(FieldChangeType::refresh().model_change().is_none());
    }

    #[test]
    fn test_refresh_with_map_carries_payload() {
        let model = Model::new("Basic (and reversed card)", &["Front", "Back"]);
        let change = FieldChangeType::refresh_with_map(&model, SlotRemapTable::new()).unwrap();
        assert_eq!(change.kind(), ChangeKind::RefreshWithMap);
        assert_eq!(change.kind().as_str(), "refresh_with_map");

        let payload = change.model_change().unwrap();
        assert_eq!(payload.new_model().len(), 2);
        assert!(payload.remap().is_empty());
    }

    #[test]
    fn test_refresh_with_map_rejects_inconsistent_model() {
        let mut model = Model::new("Cloze", &["Text", "Extra"]);
        model.flds[1].ord = 7;
        let result = FieldChangeType::refresh_with_map(&model, SlotRemapTable::identity(2));
        assert!(matches!(result, Err(FieldStateError::InvalidArgument(_))));
    }

    #[test]
    fn test_remap_table_lookup() {
        let table: SlotRemapTable = [(0, 1), (2, 0)].into_iter().collect();
        assert_eq!(table.old_slot_for(1), Some(0));
        assert_eq!(table.old_slot_for(0), Some(2));
        assert_eq!(table.old_slot_for(2), None);

        let mut by_new = HashMap::new();
        by_new.insert(1, 0);
        by_new.insert(0, 2);
        assert_eq!(SlotRemapTable::from_new_to_old(by_new), table);

        let mut by_old = HashMap::new();
        by_old.insert(0, 1);
        by_old.insert(2, 0);
        assert_eq!(SlotRemapTable::from_old_to_new(by_old), table);

        // one old field copied into two new slots
        let mut fan_out = HashMap::new();
        fan_out.insert(0, 0);
        fan_out.insert(1, 0);
        let fan_out = SlotRemapTable::from_new_to_old(fan_out);
        assert_eq!(fan_out.old_slot_for(0), Some(0));
        assert_eq!(fan_out.old_slot_for(1), Some(0));

        let identity = SlotRemapTable::identity(3);
        assert_eq!(identity.len(), 3);
        assert_eq!(identity.iter().collect::<Vec<_>>(), vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_non_injective_table_still_resolves() {
        let mut table = SlotRemapTable::new();
        table.insert(3, 0);
        table.insert(1, 0);
        assert!(table.old_slot_for(0).is_some());
    }
}
