use std::sync::Arc;

use super::*;
use crate::store::MemoryStore;

fn store() -> ConversationStore {
    ConversationStore::load(Arc::new(MemoryStore::new())).unwrap()
}

// =============================================================
// parse_command
// =============================================================

#[test]
fn blank_line_is_nothing() {
    assert_eq!(parse_command("   ").unwrap(), None);
}

#[test]
fn plain_text_is_submitted_verbatim() {
    assert_eq!(parse_command("  explain quantum ").unwrap(), Some(Command::Submit("  explain quantum ".into())));
}

#[test]
fn simple_commands() {
    assert_eq!(parse_command("/new").unwrap(), Some(Command::New));
    assert_eq!(parse_command("/list").unwrap(), Some(Command::List));
    assert_eq!(parse_command("/ls").unwrap(), Some(Command::List));
    assert_eq!(parse_command("/show").unwrap(), Some(Command::Show));
    assert_eq!(parse_command("/help").unwrap(), Some(Command::Help));
    assert_eq!(parse_command("/quit").unwrap(), Some(Command::Quit));
    assert_eq!(parse_command("/exit").unwrap(), Some(Command::Quit));
}

#[test]
fn select_requires_argument() {
    assert_eq!(parse_command("/select 2").unwrap(), Some(Command::Select("2".into())));
    let err = parse_command("/select").unwrap_err();
    assert!(matches!(err, ReplError::MissingArgument { command: "select", .. }));
    assert_eq!(err.error_code(), "E_MISSING_ARGUMENT");
}

#[test]
fn delete_argument_is_optional() {
    assert_eq!(parse_command("/delete").unwrap(), Some(Command::Delete(None)));
    assert_eq!(parse_command("/delete 3").unwrap(), Some(Command::Delete(Some("3".into()))));
}

#[test]
fn mode_parses_processing_mode() {
    assert_eq!(parse_command("/mode shorten").unwrap(), Some(Command::Mode(ProcessingMode::Shorten)));
    let err = parse_command("/mode poetry").unwrap_err();
    assert!(matches!(err, ReplError::Mode(_)));
    assert!(err.to_string().contains("poetry"));
}

#[test]
fn key_keeps_full_argument() {
    assert_eq!(parse_command("/key   AIza-abc  ").unwrap(), Some(Command::Key("AIza-abc".into())));
    assert!(parse_command("/key").is_err());
}

#[test]
fn unknown_command_errors() {
    let err = parse_command("/frobnicate now").unwrap_err();
    assert!(matches!(err, ReplError::UnknownCommand(ref name) if name == "frobnicate"));
    assert!(err.to_string().contains("/help"));
}

// =============================================================
// LineBuffer / parse_input
// =============================================================

#[test]
fn single_lines_pass_through() {
    let mut buffer = LineBuffer::new();
    assert_eq!(buffer.push_line("hello"), Some(Input::Line("hello".into())));
    assert!(!buffer.in_block());
}

#[test]
fn fenced_block_collects_lines() {
    let mut buffer = LineBuffer::new();
    assert_eq!(buffer.push_line("\"\"\""), None);
    assert!(buffer.in_block());
    assert_eq!(buffer.push_line("/not a command"), None);
    assert_eq!(buffer.push_line("second line"), None);
    let input = buffer.push_line("\"\"\"").unwrap();
    assert!(!buffer.in_block());
    assert_eq!(input, Input::Block("/not a command\nsecond line".into()));
    assert_eq!(
        parse_input(&input).unwrap(),
        Some(Command::Submit("/not a command\nsecond line".into()))
    );
}

#[test]
fn empty_block_is_nothing() {
    assert_eq!(parse_input(&Input::Block("\n  \n".into())).unwrap(), None);
}

// =============================================================
// resolve_target
// =============================================================

#[test]
fn resolve_target_by_position_or_id() {
    let mut store = store();
    let older = store.create_conversation();
    let newer = store.create_conversation();
    assert_eq!(resolve_target(&store, "1"), newer);
    assert_eq!(resolve_target(&store, "2"), older);
    assert_eq!(resolve_target(&store, &older), older);
}

#[test]
fn resolve_target_out_of_range_falls_back_to_raw() {
    let mut store = store();
    store.create_conversation();
    assert_eq!(resolve_target(&store, "0"), "0");
    assert_eq!(resolve_target(&store, "9"), "9");
}

// =============================================================
// rendering
// =============================================================

#[test]
fn empty_list_invites_new_chat() {
    assert!(render_conversation_list(&store()).contains("No conversations yet"));
}

#[test]
fn list_marks_active_conversation() {
    let mut store = store();
    store.create_conversation();
    let newer = store.create_conversation();
    store.append_message(&newer, Message::user("hello there"));
    let rendered = render_conversation_list(&store);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('*'));
    assert!(lines[0].contains("hello there... (1 messages)"));
    assert!(lines[1].contains("Chat 1"));
}

#[test]
fn conversation_renders_roles_in_order() {
    let mut store = store();
    let id = store.create_conversation();
    store.append_message(&id, Message::user("question"));
    store.append_message(&id, Message::assistant("answer"));
    let rendered = render_conversation(store.get(&id).unwrap());
    let you = rendered.find("You:\nquestion").unwrap();
    let gemini = rendered.find("Gemini:\nanswer").unwrap();
    assert!(you < gemini);
    assert!(rendered.starts_with("== question... =="));
}

#[test]
fn modes_mark_current() {
    let rendered = render_modes(ProcessingMode::Summarize);
    let current: Vec<&str> = rendered.lines().filter(|l| l.starts_with('*')).collect();
    assert_eq!(current.len(), 1);
    assert!(current[0].contains("summarize"));
    assert!(current[0].contains("2-3 paragraphs max"));
}

#[test]
fn notice_rendering_includes_code() {
    let notice = Notice::from_error(&crate::llm::LlmError::MalformedResponse);
    assert_eq!(render_notice(&notice), "Error: Invalid response from Gemini API [E_MALFORMED_RESPONSE]");
    assert_eq!(render_notice(&Notice::info("Saved", "ok")), "Saved: ok");
}
