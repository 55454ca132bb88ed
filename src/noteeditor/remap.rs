use super::change_type::SlotRemapTable;
use crate::{
    anki::{
        NoteField,
        TemplateFieldMap,
    },
    settings::FieldStateSettings,
};

/// Builds the label/value rows for a note moving to `new_model`.
///
/// Each slot of the new note type takes the value of the old field mapped onto it. Slots with no
/// mapping, or whose mapping points past the end of `old_fields`, come out empty. When the old
/// note type had enough fields for the choice to be ambiguous, mapped labels also name the old
/// field they came from.
pub fn remap_fields(
    old_fields: &[NoteField],
    new_model: &TemplateFieldMap,
    remap: &SlotRemapTable,
    settings: &FieldStateSettings,
) -> Vec<NoteField> {
    let show_old_labels = settings.allows_remap_labels(old_fields.len());
    let mut fields: Vec<Option<NoteField>> = vec![None; new_model.len()];

    for (name, slot, _) in new_model.iter() {
        let Some(target) = fields.get_mut(slot) else {
            log::trace!("Skipping field '{}' with out-of-range slot {}", name, slot);
            continue;
        };

        let old_field = remap.old_slot_for(slot).and_then(|old_slot| {
            let field = old_fields.get(old_slot);
            if field.is_none() {
                log::trace!(
                    "Remap entry {} -> {} points past {} old fields",
                    old_slot,
                    slot,
                    old_fields.len()
                );
            }
            field
        });

        *target = Some(match old_field {
            Some(old) => {
                let label = if show_old_labels {
                    settings.remap_label(name, &old.name)
                } else {
                    name.to_string()
                };
                NoteField { name: label, value: old.value.clone() }
            }
            None => NoteField::new(name, ""),
        });
    }

    fields.into_iter().flatten().collect()
}
