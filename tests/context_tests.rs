//! Tests for context assembly: line dedup, ordering, idempotence.

use rag_chat::context::assemble;

#[test]
fn deduplicates_lines_keeping_first_seen_order() {
    let passages = vec!["a\nb".to_string(), "b\nc".to_string()];
    assert_eq!(assemble(&passages), "a\n\nb\n\nc");
}

#[test]
fn empty_input_yields_empty_string() {
    assert_eq!(assemble(&[]), "");
}

#[test]
fn whitespace_only_passages_yield_empty_string() {
    let passages = vec!["   \n  ".to_string(), "\n\n".to_string()];
    assert_eq!(assemble(&passages), "");
}

#[test]
fn trims_lines_before_deduplicating() {
    let passages = vec!["  jacket  ".to_string(), "jacket".to_string()];
    assert_eq!(assemble(&passages), "jacket");
}

#[test]
fn identical_passages_collapse_to_one() {
    let row = "name: jacket | size: 140".to_string();
    let passages = vec![row.clone(), row.clone(), row.clone()];
    assert_eq!(assemble(&passages), "name: jacket | size: 140");
}

#[test]
fn assembly_is_idempotent() {
    let passages = vec![
        "boys jacket\nwinter".to_string(),
        "winter\nsize 140".to_string(),
        "boys jacket".to_string(),
    ];
    let once = assemble(&passages);
    let twice = assemble(&[once.clone()]);
    assert_eq!(twice, once);
}
