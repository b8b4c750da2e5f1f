use std::sync::Arc;

use super::*;
use crate::{
    api::{ApiError, MockApi},
    app::testutils::memory_storage,
    config::ThemeConfig,
    models::{ChatResponse, ConversationSummary, Message, Theme},
};

#[test]
fn test_parse_line() {
    assert_eq!(parse_line("   "), ReplCommand::Empty);
    assert_eq!(
        parse_line("  How do I claim expenses? "),
        ReplCommand::Send("How do I claim expenses?".to_string())
    );
    assert_eq!(parse_line("/new"), ReplCommand::New);
    assert_eq!(parse_line("/LIST"), ReplCommand::List);
    assert_eq!(parse_line("/open 2"), ReplCommand::Open("2".to_string()));
    assert_eq!(parse_line("/open"), ReplCommand::Usage("/open <n|id>"));
    assert_eq!(
        parse_line("/delete  c-1 "),
        ReplCommand::Delete("c-1".to_string())
    );
    assert_eq!(parse_line("/clear"), ReplCommand::Clear);
    assert_eq!(
        parse_line("/rename Travel policy 2024"),
        ReplCommand::Rename("Travel policy 2024".to_string())
    );
    assert_eq!(parse_line("/rename   "), ReplCommand::Usage("/rename <title>"));
    assert_eq!(parse_line("/theme"), ReplCommand::Theme);
    assert_eq!(parse_line("/help"), ReplCommand::Help);
    assert_eq!(parse_line("/quit"), ReplCommand::Quit);
    assert_eq!(parse_line("/exit"), ReplCommand::Quit);
    assert_eq!(
        parse_line("/frobnicate now"),
        ReplCommand::Unknown("/frobnicate now".to_string())
    );
}

async fn repl(api: MockApi) -> Repl {
    let theme = ThemeManager::init(memory_storage().await, ThemeConfig::default())
        .await
        .unwrap();
    Repl::new(ChatSession::new(Arc::new(api)), theme, Input::stdin())
        .with_assume_yes(true)
        .with_interactive(false)
}

#[tokio::test]
async fn test_send_and_quit() {
    let mut api = MockApi::new();
    api.expect_chat().times(1).returning(|_| {
        Box::pin(async {
            Ok(ChatResponse {
                conversation_id: "c-1".to_string(),
                message: Message::user("hi"),
                response: Message::assistant("Hello!"),
            })
        })
    });
    api.expect_list_conversations()
        .returning(|| Box::pin(async { Ok(vec![ConversationSummary::new("c-1", "Greeting")]) }));

    let mut repl = repl(api).await;
    assert_eq!(
        repl.handle(parse_line("hi")).await.unwrap(),
        Flow::Continue
    );
    assert_eq!(repl.chat().current(), Some("c-1"));
    assert_eq!(repl.chat().title(), "Greeting");
    assert_eq!(repl.handle(parse_line("/quit")).await.unwrap(), Flow::Quit);
}

#[tokio::test]
async fn test_delete_by_index() {
    let mut api = MockApi::new();
    api.expect_list_conversations().returning(|| {
        Box::pin(async {
            Ok(vec![
                ConversationSummary::new("c-1", "Travel"),
                ConversationSummary::new("c-2", "Leave"),
            ])
        })
    });
    api.expect_delete_conversation()
        .withf(|id| id == "c-2")
        .times(1)
        .returning(|_| Box::pin(async { Ok(()) }));

    let mut repl = repl(api).await;
    repl.handle(parse_line("/delete 2")).await.unwrap();
}

#[tokio::test]
async fn test_unknown_reference_fails() {
    let mut api = MockApi::new();
    api.expect_list_conversations()
        .returning(|| Box::pin(async { Ok(vec![]) }));
    api.expect_get_messages().never();

    let mut repl = repl(api).await;
    let err = repl.handle(parse_line("/open 3")).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<crate::app::ChatError>(),
        Some(&crate::app::ChatError::UnknownConversation("3".to_string()))
    );
}

#[tokio::test]
async fn test_theme_toggle() {
    let mut repl = repl(MockApi::new()).await;
    repl.handle(ReplCommand::Theme).await.unwrap();
    assert_eq!(repl.theme.current_theme(), Theme::Dark);
}

#[tokio::test]
async fn test_rename_without_conversation() {
    let mut api = MockApi::new();
    api.expect_rename_conversation().never();

    let mut repl = repl(api).await;
    assert_eq!(
        repl.handle(parse_line("/rename Policies")).await.unwrap(),
        Flow::Continue
    );
}

#[tokio::test]
async fn test_list_propagates_api_errors() {
    let mut api = MockApi::new();
    api.expect_list_conversations()
        .returning(|| Box::pin(async { Err(ApiError::new(401, "Could not validate credentials").into()) }));

    let mut repl = repl(api).await;
    let err = repl.handle(ReplCommand::List).await.unwrap_err();
    assert!(is_unauthorized(&err));
}

#[tokio::test]
async fn test_unauthorized_chat_ends_the_loop() {
    let mut api = MockApi::new();
    api.expect_chat().times(1).returning(|_| {
        Box::pin(async { Err(ApiError::new(401, "Could not validate credentials").into()) })
    });

    let mut repl = repl(api).await;
    let err = repl.handle(parse_line("hello")).await.unwrap_err();
    assert!(is_unauthorized(&err));
    assert!(repl.chat().transcript()[1].failed());
}

#[tokio::test]
async fn test_failed_chat_keeps_the_loop_going() {
    let mut api = MockApi::new();
    api.expect_chat()
        .times(1)
        .returning(|_| Box::pin(async { Err(ApiError::new(500, "Request failed").into()) }));

    let mut repl = repl(api).await;
    assert_eq!(
        repl.handle(parse_line("hello")).await.unwrap(),
        Flow::Continue
    );
}
