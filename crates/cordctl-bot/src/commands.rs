//! Translation between compiled templates and Discord application commands.

use cordctl_core::{Bindings, CompiledTemplate, Parameter, Value, ValueType};
use serenity::all::{
    CommandDataOption, CommandDataOptionValue, CommandOptionType, CreateCommand,
    CreateCommandOption,
};

/// Discord message character limit.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Build the slash-command definition advertised for a template.
///
/// Parameters keep their derived order, which puts required options first
/// as Discord demands. Each option is described by its own name.
pub fn build_command(template: &CompiledTemplate) -> CreateCommand {
    let description = if template.description().is_empty() {
        template.name()
    } else {
        template.description()
    };
    let options = template.parameters().iter().map(build_option).collect();

    CreateCommand::new(template.name())
        .description(description)
        .set_options(options)
}

fn build_option(param: &Parameter) -> CreateCommandOption {
    let kind = match param.value_type {
        ValueType::Text => CommandOptionType::String,
        ValueType::Flag => CommandOptionType::Boolean,
    };
    CreateCommandOption::new(kind, &param.name, &param.name).required(param.required)
}

/// Collect string and boolean options into bindings. Other option kinds
/// are never advertised and are ignored.
pub fn bindings_from_options(options: &[CommandDataOption]) -> Bindings {
    options
        .iter()
        .filter_map(|opt| option_value(&opt.value).map(|v| (opt.name.clone(), v)))
        .collect()
}

pub fn option_value(value: &CommandDataOptionValue) -> Option<Value> {
    match value {
        CommandDataOptionValue::String(s) => Some(Value::Text(s.clone())),
        CommandDataOptionValue::Boolean(b) => Some(Value::Flag(*b)),
        _ => None,
    }
}

/// Split a reply into message-sized pieces, preferring newline boundaries.
pub fn chunk_message(content: &str) -> Vec<&str> {
    if content.len() <= MAX_MESSAGE_LENGTH {
        return vec![content];
    }

    let mut chunks = Vec::new();
    let mut remaining = content;

    while !remaining.is_empty() {
        if remaining.len() <= MAX_MESSAGE_LENGTH {
            chunks.push(remaining);
            break;
        }

        let boundary = floor_char_boundary(remaining, MAX_MESSAGE_LENGTH);
        let split_at = match remaining[..boundary].rfind('\n') {
            Some(i) if i > 0 => i,
            _ => boundary,
        };

        let (chunk, rest) = remaining.split_at(split_at);
        chunks.push(chunk);
        remaining = rest.strip_prefix('\n').unwrap_or(rest);
    }

    chunks
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCAN_YAML: &str = r#"
name: scan
description: Scan a host
command: tool
args: ["{?port}", "{$target}", "{!yes}--assume-yes"]
"#;

    #[test]
    fn command_definition_lists_required_options_first() {
        let template = CompiledTemplate::from_yaml(SCAN_YAML).unwrap();
        let json = serde_json::to_value(build_command(&template)).unwrap();

        assert_eq!(json["name"], "scan");
        assert_eq!(json["description"], "Scan a host");

        let options = json["options"].as_array().unwrap();
        let names: Vec<&str> = options.iter().map(|o| o["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["target", "port", "yes"]);

        assert_eq!(options[0]["type"], 3);
        assert_eq!(options[0]["required"], true);
        assert_eq!(options[0]["description"], "target");
        assert_eq!(options[2]["type"], 5);
        for opt in &options[1..] {
            assert!(!opt.get("required").and_then(|r| r.as_bool()).unwrap_or(false));
        }
    }

    #[test]
    fn missing_description_falls_back_to_name() {
        let template = CompiledTemplate::from_yaml("name: uptime\ncommand: uptime\n").unwrap();
        let json = serde_json::to_value(build_command(&template)).unwrap();
        assert_eq!(json["description"], "uptime");
    }

    #[test]
    fn string_and_boolean_options_become_values() {
        assert_eq!(
            option_value(&CommandDataOptionValue::String("host1".into())),
            Some(Value::Text("host1".into()))
        );
        assert_eq!(
            option_value(&CommandDataOptionValue::Boolean(false)),
            Some(Value::Flag(false))
        );
        assert_eq!(option_value(&CommandDataOptionValue::Integer(3)), None);
    }

    #[test]
    fn short_reply_is_one_chunk() {
        assert_eq!(chunk_message("hello"), ["hello"]);
        assert_eq!(chunk_message(""), [""]);
    }

    #[test]
    fn long_reply_splits_at_newlines() {
        let line = "x".repeat(1500);
        let content = format!("{line}\n{line}\n{line}");
        let chunks = chunk_message(&content);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| *c == line));
    }

    #[test]
    fn long_reply_without_newlines_splits_on_char_boundary() {
        let content = "é".repeat(1500);
        let chunks = chunk_message(&content);
        assert!(chunks.iter().all(|c| c.len() <= MAX_MESSAGE_LENGTH));
        assert_eq!(chunks.concat(), content);
    }

    #[test]
    fn leading_newline_does_not_produce_empty_chunk() {
        let content = format!("\n{}", "y".repeat(2500));
        let chunks = chunk_message(&content);
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }
}
