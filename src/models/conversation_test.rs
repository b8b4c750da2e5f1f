use super::*;

#[test]
fn test_split_blocks() {
    let content = "Article 3 applies:\n```python\nprint('hi')\n```\nSee also article 4.";
    let blocks = split_blocks(content);
    assert_eq!(
        blocks,
        vec![
            Block::Text("Article 3 applies:".to_string()),
            Block::Code(CodeBlock {
                language: "python".to_string(),
                code: "print('hi')".to_string(),
            }),
            Block::Text("See also article 4.".to_string()),
        ]
    );
}

#[test]
fn test_split_blocks_unterminated_fence() {
    let blocks = split_blocks("```\nfirst\nsecond");
    assert_eq!(
        blocks,
        vec![Block::Code(CodeBlock {
            language: String::new(),
            code: "first\nsecond".to_string(),
        })]
    );

    assert_eq!(split_blocks(""), vec![Block::Text(String::new())]);
}

#[test]
fn test_deserialize_chat_response() {
    let raw = r#"{
        "conversation_id": "c-1",
        "message": {
            "id": "m-1",
            "conversation_id": "c-1",
            "role": "user",
            "content": "How many vacation days do I get?",
            "created_at": "2024-05-01T09:00:00.000001"
        },
        "response": {
            "id": "m-2",
            "conversation_id": "c-1",
            "role": "assistant",
            "content": "Fifteen days per year.",
            "created_at": "2024-05-01T09:00:03"
        }
    }"#;

    let res: ChatResponse = serde_json::from_str(raw).expect("valid chat response");
    assert_eq!(res.conversation_id, "c-1");
    assert_eq!(res.message.role, Role::User);
    assert_eq!(res.response.role, Role::Assistant);
    assert_eq!(res.response.content, "Fifteen days per year.");
    assert!(res.response.created_at.is_some());
    assert!(!res.response.failed());
}

#[test]
fn test_chat_request_serializes_null_conversation() {
    let req = ChatRequest::new("hello");
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"message": "hello", "conversation_id": null})
    );

    let req = ChatRequest::new("hello").with_conversation_id(Some("c-9".to_string()));
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value["conversation_id"], "c-9");
}

#[test]
fn test_conversation_summary_defaults() {
    let raw = r#"[{"id": "c-1", "title": "Leave policy"}]"#;
    let list: Vec<ConversationSummary> = serde_json::from_str(raw).unwrap();
    assert_eq!(list[0], ConversationSummary::new("c-1", "Leave policy"));
    assert_eq!(list[0].message_count, 0);
}
