use chrono::Utc;

use super::*;

#[test]
fn test_render_table() {
    let rows = vec![
        vec!["a".to_string(), "long cell".to_string(), "x".to_string()],
        vec!["bbb".to_string(), "c".to_string(), "y".to_string()],
    ];
    assert_eq!(
        render_table(&["K", "VALUE", "LAST"], &rows),
        "K    VALUE      LAST\na    long cell  x\nbbb  c          y"
    );
}

#[test]
fn test_conversation_table() {
    let mut first = ConversationSummary::new("c-1", "Travel policy").with_message_count(4);
    first.updated_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).single();
    let second = ConversationSummary::new("c-2", "x".repeat(60));

    let out = conversation_table_in(&[first, second], Some("c-1"), &Utc);
    let lines = out.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("#   TITLE"));
    assert!(lines[1].starts_with("*1  Travel policy"));
    assert!(lines[1].contains("2024/05/01 09:30"));
    assert!(lines[1].ends_with("c-1"));
    assert!(lines[2].contains(&format!("{}…", "x".repeat(MAX_TITLE_WIDTH - 1))));
    assert!(lines[2].contains(" - "));

    assert_eq!(conversation_table(&[], None), "No conversations yet");
}

#[test]
fn test_document_table() {
    let docs = vec![
        Document::new("handbook.pdf", 1536).with_created_at(1_700_000_000.0),
        Document::new("leave.txt", 0),
    ];
    assert_eq!(
        document_table_in(&docs, &Utc),
        "NAME          SIZE     UPLOADED\nhandbook.pdf  1.5 KB   2023/11/14\nleave.txt     0 Bytes  1970/01/01"
    );
    assert_eq!(document_table(&[]), "No documents uploaded yet");
}

#[test]
fn test_stats_table() {
    let stats = KnowledgeStats {
        document_count: 3,
        vector_count: 120,
    };
    assert_eq!(stats_table(&stats), "DOCUMENTS  VECTORS\n3          120");
}
