use crate::slot::{Slot, SlotKind};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Text,
    Flag,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Text => "text",
            ValueType::Flag => "flag",
        }
    }
}

/// A named input advertised to the trigger platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub value_type: ValueType,
    pub required: bool,
}

impl Parameter {
    fn from_slot(slot: &Slot) -> Self {
        let value_type = if slot.kind.is_flag() {
            ValueType::Flag
        } else {
            ValueType::Text
        };
        Self {
            name: slot.token.clone(),
            value_type,
            required: slot.kind == SlotKind::MandatoryValue,
        }
    }
}

/// Derive the parameter list for a template.
///
/// The first slot naming a token decides its type and requiredness. Required
/// parameters come first, then optional ones, each group in first-seen order.
pub fn derive(slots: &[Slot]) -> Vec<Parameter> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut required = Vec::new();
    let mut optional = Vec::new();

    for slot in slots.iter().filter(|s| s.is_bound()) {
        if !seen.insert(slot.token.as_str()) {
            continue;
        }
        let param = Parameter::from_slot(slot);
        if param.required {
            required.push(param);
        } else {
            optional.push(param);
        }
    }

    required.extend(optional);
    required
}
