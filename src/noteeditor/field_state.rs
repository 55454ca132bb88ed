use super::{
    change_type::FieldChangeType,
    field::{
        EditLine,
        Field,
    },
    remap::remap_fields,
    saved_state::{
        capture_bundle,
        InstanceStateBundle,
        RestorableRowState,
        RowStateLookup,
    },
};
use crate::{
    anki::NoteField,
    settings::FieldStateSettings,
};

/// Decides which field rows the note editor shows each time it is rebuilt.
///
/// Row state saved before a teardown is replayed once, on the next initial load. Every other
/// rebuild computes its rows from the note's current fields.
#[derive(Debug, Clone)]
pub struct FieldState<S> {
    saved_field_data: Option<RestorableRowState<S>>,
    settings: FieldStateSettings,
}

impl<S> Default for FieldState<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> FieldState<S> {
    pub fn new() -> Self {
        Self::with_settings(FieldStateSettings::default())
    }

    pub fn with_settings(settings: FieldStateSettings) -> Self {
        Self { saved_field_data: None, settings }
    }

    pub fn settings(&self) -> &FieldStateSettings {
        &self.settings
    }

    pub fn has_restorable_state(&self) -> bool {
        self.saved_field_data.is_some()
    }

    /// Rows for the editor. An initial load with captured state replays it and drops it.
    pub fn load_field_edit_lines(
        &mut self,
        change: &FieldChangeType,
        note_fields: &[NoteField],
    ) -> Vec<EditLine<S>> {
        if change.is_initial_load() {
            if let Some(saved) = self.saved_field_data.take() {
                log::debug!("Restoring {} field rows from saved state", saved.len());
                return Self::recreate_fields_from_state(saved);
            }
        }

        self.load_fields(change, note_fields).into_iter().map(EditLine::Computed).collect()
    }

    /// Computes rows from `note_fields` without looking at saved state.
    pub fn load_fields(&self, change: &FieldChangeType, note_fields: &[NoteField]) -> Vec<Field> {
        let fields = self.get_fields(change, note_fields);
        log::debug!("Computed {} field rows for {}", fields.len(), change.kind().as_str());

        fields
            .into_iter()
            .enumerate()
            .map(|(ord, field)| Field::from_note_field(field, ord))
            .collect()
    }

    fn get_fields(&self, change: &FieldChangeType, note_fields: &[NoteField]) -> Vec<NoteField> {
        match change.model_change() {
            Some(model_change) => remap_fields(
                note_fields,
                model_change.new_model(),
                model_change.remap(),
                &self.settings,
            ),
            None => note_fields.to_vec(),
        }
    }

    fn recreate_fields_from_state(saved: RestorableRowState<S>) -> Vec<EditLine<S>> {
        saved
            .into_rows()
            .into_iter()
            .enumerate()
            .map(|(ord, (previous_id, state))| EditLine::Restored { ord, previous_id, state })
            .collect()
    }

    /// Captures row state from the container saved on teardown.
    ///
    /// A missing or malformed container leaves nothing to restore; it never fails.
    pub fn set_instance_state<B>(&mut self, saved_instance_state: Option<&B>)
    where
        B: InstanceStateBundle,
        B::Views: RowStateLookup<State = S>,
    {
        let captured = saved_instance_state.and_then(capture_bundle);
        match &captured {
            Some(state) => log::debug!("Captured saved state for {} field rows", state.len()),
            None if self.saved_field_data.is_some() => {
                log::warn!("Saved state is unusable; discarding previously captured field rows")
            }
            None => {}
        }
        self.saved_field_data = captured;
    }

    /// Removes captured row state so it will not be replayed.
    pub fn take_saved_state(&mut self) -> Option<RestorableRowState<S>> {
        self.saved_field_data.take()
    }
}
