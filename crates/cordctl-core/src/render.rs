//! Turning slots plus caller bindings into a process argument vector.

use crate::slot::{Slot, SlotKind};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A caller-supplied value for one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Flag(bool),
}

impl Value {
    /// Only zero-length text is empty. Flags are never empty, whatever their
    /// value: absence from the bindings is the only way to suppress them.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Text(s) => s.is_empty(),
            Value::Flag(_) => false,
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Value::Flag(true))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Flag(b)
    }
}

/// Parameter name to value, for a single invocation.
pub type Bindings = HashMap<String, Value>;

/// Render one slot. `None` means the slot contributes no argument.
pub fn render_slot(slot: &Slot, bindings: &Bindings) -> Option<String> {
    let compose = |middle: &str| {
        format!("{}{}{}", slot.prefix, middle, slot.suffix)
            .trim()
            .to_string()
    };

    match slot.kind {
        SlotKind::MandatoryValue | SlotKind::OptionalValue => bindings
            .get(&slot.token)
            .filter(|v| !v.is_empty())
            .map(|v| compose(&v.to_string())),
        SlotKind::OptionalFlag => bindings
            .contains_key(&slot.token)
            .then(|| compose(&slot.token)),
        SlotKind::PresenceFlag => bindings
            .get(&slot.token)
            .filter(|v| v.is_true())
            .map(|_| compose("")),
        SlotKind::Literal => Some(compose(&slot.token)),
    }
}

/// Render every slot in order. The base command is not included.
pub fn render(slots: &[Slot], bindings: &Bindings) -> Vec<String> {
    slots
        .iter()
        .filter_map(|slot| render_slot(slot, bindings))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::parse_all;

    fn bind(pairs: &[(&str, Value)]) -> Bindings {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn literals_ignore_bindings_and_are_trimmed() {
        let slots = parse_all(&["  status  ", "--all", "{raw}"]);
        let expected = ["status", "--all", "{raw}"];
        assert_eq!(render(&slots, &Bindings::new()), expected);
        let noisy = bind(&[("raw", "x".into()), ("status", true.into())]);
        assert_eq!(render(&slots, &noisy), expected);
    }

    #[test]
    fn mandatory_value_substitutes_or_drops() {
        let slots = parse_all(&["--host= {$host} "]);
        assert_eq!(
            render(&slots, &bind(&[("host", "example.org".into())])),
            ["--host= example.org"]
        );
        assert!(render(&slots, &Bindings::new()).is_empty());
        assert!(render(&slots, &bind(&[("host", "".into())])).is_empty());
    }

    #[test]
    fn optional_value_substitutes_or_drops() {
        let slots = parse_all(&["--port={?port}"]);
        assert_eq!(
            render(&slots, &bind(&[("port", "8080".into())])),
            ["--port=8080"]
        );
        assert!(render(&slots, &bind(&[("port", "".into())])).is_empty());
    }

    #[test]
    fn flag_value_in_value_slot_is_never_empty() {
        let slots = parse_all(&["--enabled={$on}"]);
        assert_eq!(
            render(&slots, &bind(&[("on", false.into())])),
            ["--enabled=false"]
        );
        assert_eq!(
            render(&slots, &bind(&[("on", true.into())])),
            ["--enabled=true"]
        );
    }

    #[test]
    fn optional_flag_is_gated_on_presence_not_truth() {
        let slots = parse_all(&["--{=verbose}"]);
        assert_eq!(
            render(&slots, &bind(&[("verbose", false.into())])),
            ["--verbose"]
        );
        assert_eq!(
            render(&slots, &bind(&[("verbose", true.into())])),
            ["--verbose"]
        );
        assert_eq!(
            render(&slots, &bind(&[("verbose", "".into())])),
            ["--verbose"]
        );
        assert!(render(&slots, &Bindings::new()).is_empty());
    }

    #[test]
    fn presence_flag_needs_true() {
        let slots = parse_all(&["{!force} --force "]);
        assert_eq!(
            render(&slots, &bind(&[("force", true.into())])),
            ["--force"]
        );
        assert!(render(&slots, &bind(&[("force", false.into())])).is_empty());
        assert!(render(&slots, &bind(&[("force", "true".into())])).is_empty());
        assert!(render(&slots, &Bindings::new()).is_empty());
    }

    #[test]
    fn shared_token_renders_each_slot_independently() {
        let slots = parse_all(&["--src={$path}", "--dst={$path}.bak"]);
        assert_eq!(
            render(&slots, &bind(&[("path", "a.txt".into())])),
            ["--src=a.txt", "--dst=a.txt.bak"]
        );
    }

    #[test]
    fn mixed_template_renders_in_slot_order() {
        let slots = parse_all(&[
            "{$target}",
            "--port={?port}",
            "{=quiet}",
            "{!yes}--assume-yes",
        ]);
        let bindings = bind(&[("target", "host1".into()), ("quiet", "x".into())]);
        assert_eq!(render(&slots, &bindings), ["host1", "quiet"]);
    }

    #[test]
    fn whitespace_only_literal_still_emits_an_argument() {
        let slots = parse_all(&["   "]);
        assert_eq!(render(&slots, &Bindings::new()), [""]);
    }

    #[test]
    fn value_display_and_emptiness() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(true).to_string(), "true");
        assert!(Value::from("").is_empty());
        assert!(!Value::from(false).is_empty());
        assert!(Value::from(true).is_true());
        assert!(!Value::from("true").is_true());
    }
}
