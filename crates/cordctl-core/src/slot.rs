//! Placeholder grammar for template arguments.
//!
//! Each argument string holds at most one placeholder:
//!
//! ```text
//! <prefix>{<sigil><name>}<suffix>
//! ```
//!
//! | sigil | kind             | renders when                      |
//! |-------|------------------|-----------------------------------|
//! | `$`   | `MandatoryValue` | bound to a non-empty value        |
//! | `?`   | `OptionalValue`  | bound to a non-empty value        |
//! | `=`   | `OptionalFlag`   | bound at all (emits the name)     |
//! | `!`   | `PresenceFlag`   | bound to `true` (name is dropped) |
//!
//! Anything else, including `{}` and braces without a sigil, is literal text.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    MandatoryValue,
    OptionalValue,
    OptionalFlag,
    PresenceFlag,
    Literal,
}

impl SlotKind {
    /// Map a placeholder sigil to its kind. `None` for anything unrecognised.
    pub fn from_sigil(sigil: char) -> Option<Self> {
        match sigil {
            '$' => Some(SlotKind::MandatoryValue),
            '?' => Some(SlotKind::OptionalValue),
            '=' => Some(SlotKind::OptionalFlag),
            '!' => Some(SlotKind::PresenceFlag),
            _ => None,
        }
    }

    pub fn sigil(&self) -> Option<char> {
        match self {
            SlotKind::MandatoryValue => Some('$'),
            SlotKind::OptionalValue => Some('?'),
            SlotKind::OptionalFlag => Some('='),
            SlotKind::PresenceFlag => Some('!'),
            SlotKind::Literal => None,
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, SlotKind::OptionalFlag | SlotKind::PresenceFlag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::MandatoryValue => "mandatory_value",
            SlotKind::OptionalValue => "optional_value",
            SlotKind::OptionalFlag => "optional_flag",
            SlotKind::PresenceFlag => "presence_flag",
            SlotKind::Literal => "literal",
        }
    }
}

/// One parsed template argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub prefix: String,
    pub token: String,
    pub suffix: String,
    pub kind: SlotKind,
}

impl Slot {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            prefix: text.into(),
            token: String::new(),
            suffix: String::new(),
            kind: SlotKind::Literal,
        }
    }

    /// Parse one argument string. Only the first `{` and the first `}` are
    /// considered; later braces stay in the suffix untouched.
    pub fn parse(arg: &str) -> Self {
        let (Some(start), Some(end)) = (arg.find('{'), arg.find('}')) else {
            return Slot::literal(arg);
        };
        if end < start {
            return Slot::literal(arg);
        }

        let prefix = &arg[..start];
        let inner = &arg[start + 1..end];
        let suffix = &arg[end + 1..];

        let kind = inner.chars().next().and_then(SlotKind::from_sigil);
        match kind {
            // Every sigil is a single ASCII byte.
            Some(kind) => Slot {
                prefix: prefix.to_string(),
                token: inner[1..].to_string(),
                suffix: suffix.to_string(),
                kind,
            },
            None => Slot {
                prefix: prefix.to_string(),
                token: format!("{{{inner}}}"),
                suffix: suffix.to_string(),
                kind: SlotKind::Literal,
            },
        }
    }

    /// Whether rendering this slot consults the bindings.
    pub fn is_bound(&self) -> bool {
        self.kind != SlotKind::Literal && !self.token.is_empty()
    }
}

/// Parse every argument of a template, preserving order.
pub fn parse_all<S: AsRef<str>>(args: &[S]) -> Vec<Slot> {
    args.iter().map(|a| Slot::parse(a.as_ref())).collect()
}
