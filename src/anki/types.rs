use std::collections::{
    BTreeMap,
    HashMap,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    FieldStateError,
    Result,
};

/// One field definition of a note type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub ord: usize,
    #[serde(default)]
    pub sticky: bool,
}

impl FieldDefinition {
    pub fn new(name: &str, ord: usize) -> Self {
        Self { name: name.to_string(), ord, sticky: false }
    }

    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }
}

/// A note type ("model"): the named fields a note carries, in slot order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub flds: Vec<FieldDefinition>,
}

impl Model {
    pub fn new(name: &str, field_names: &[&str]) -> Self {
        let flds = field_names
            .iter()
            .enumerate()
            .map(|(ord, name)| FieldDefinition::new(name, ord))
            .collect();
        Self { id: 0, name: name.to_string(), flds }
    }

    pub fn field_map(&self) -> TemplateFieldMap {
        TemplateFieldMap::from_model(self)
    }

    /// Field names ordered by slot.
    pub fn field_names(&self) -> Vec<String> {
        let mut defs: Vec<&FieldDefinition> = self.flds.iter().collect();
        defs.sort_by_key(|def| def.ord);
        defs.into_iter().map(|def| def.name.clone()).collect()
    }
}

/// Field name -> (slot, definition) for one model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateFieldMap {
    fields: HashMap<String, (usize, FieldDefinition)>,
    declared: usize,
}

impl TemplateFieldMap {
    /// Later definitions with a repeated name replace earlier ones; `validate` reports it.
    pub fn from_model(model: &Model) -> Self {
        let fields = model
            .flds
            .iter()
            .map(|def| (def.name.clone(), (def.ord, def.clone())))
            .collect();
        Self { fields, declared: model.flds.len() }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&(usize, FieldDefinition)> {
        self.fields.get(name)
    }

    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.fields.get(name).map(|(slot, _)| *slot)
    }

    /// Entries ordered by slot.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize, &FieldDefinition)> {
        let by_slot: BTreeMap<usize, (&str, &FieldDefinition)> = self
            .fields
            .iter()
            .map(|(name, (slot, def))| (*slot, (name.as_str(), def)))
            .collect();
        by_slot.into_iter().map(|(slot, (name, def))| (name, slot, def))
    }

    /// Slots must cover exactly `0..len` with no repeats.
    pub fn validate(&self) -> Result<()> {
        if self.declared != self.fields.len() {
            return Err(FieldStateError::InvalidArgument(format!(
                "model declares {} fields but only {} names are distinct",
                self.declared,
                self.fields.len()
            )));
        }

        let mut seen = vec![false; self.fields.len()];
        for (name, (slot, _)) in &self.fields {
            match seen.get_mut(*slot) {
                Some(taken) => {
                    if *taken {
                        return Err(FieldStateError::InvalidArgument(format!(
                            "field '{}' reuses slot {}",
                            name, slot
                        )));
                    }
                    *taken = true;
                }
                None => {
                    return Err(FieldStateError::InvalidArgument(format!(
                        "field '{}' has slot {} but the model only has {} fields",
                        name,
                        slot,
                        self.fields.len()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// One entry of a note's field list, as shown in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteField {
    pub name: String,
    pub value: String,
}

impl NoteField {
    pub fn new(name: &str, value: &str) -> Self {
        Self { name: name.to_string(), value: value.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub model_name: String,
    pub fields: Vec<NoteField>,
}

impl Note {
    pub fn from_model(model: &Model) -> Self {
        let fields = model.field_names().iter().map(|name| NoteField::new(name, "")).collect();
        Self { model_name: model.name.clone(), fields }
    }

    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.to_string();
                true
            }
            None => false,
        }
    }

    /// The raw field set handed to the editor.
    pub fn editor_fields(&self) -> &[NoteField] {
        &self.fields
    }

    /// Clears every value except those of sticky fields.
    pub fn reset_keeping_sticky(&mut self, model: &Model) {
        let map = model.field_map();
        for field in &mut self.fields {
            let sticky = map.get(&field.name).map(|(_, def)| def.sticky).unwrap_or(false);
            if !sticky {
                field.value.clear();
            }
        }
    }
}
