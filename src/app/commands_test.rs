use std::sync::Arc;

use super::*;
use crate::{
    api::{ApiError, MockApi},
    app::testutils::memory_storage,
    cli::Confirm,
    config::Configuration,
    models::{ConversationSummary, Token},
};

async fn app_with(api: MockApi, user: Option<User>) -> App {
    let app = App::new(Arc::new(api), memory_storage().await, Configuration::default());
    if let Some(user) = user {
        app.session.save_token("jwt-token").await.unwrap();
        app.session.save_user(&user).await.unwrap();
    }
    app
}

fn unauthorized() -> eyre::Report {
    ApiError::new(401, "Could not validate credentials").into()
}

#[tokio::test]
async fn test_unauthorized_clears_session() {
    let mut api = MockApi::new();
    api.expect_list_conversations()
        .returning(|| Box::pin(async { Err(unauthorized()) }));
    api.expect_set_token()
        .withf(|token| token.is_none())
        .times(1)
        .return_const(());

    let app = app_with(api, Some(User::new("alice"))).await;
    let err = run(
        &app,
        Some(Commands::Conversations(ConversationsCommand::List)),
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), SESSION_EXPIRED);
    assert!(!app.session.is_authenticated().await.unwrap());
}

#[tokio::test]
async fn test_failed_login_keeps_session_untouched() {
    let mut api = MockApi::new();
    api.expect_login()
        .returning(|_, _| Box::pin(async { Err(ApiError::new(401, "Incorrect username or password").into()) }));
    api.expect_set_token().never();

    let app = app_with(api, None).await;
    let err = run(
        &app,
        Some(Commands::Login {
            username: Some("alice".to_string()),
            password: Some("bad".to_string()),
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Incorrect username or password");
}

#[tokio::test]
async fn test_register_then_login() {
    let mut api = MockApi::new();
    api.expect_register()
        .times(1)
        .returning(|req| Box::pin(async move { Ok(User::new(req.username)) }));
    api.expect_login().times(1).returning(|_, _| {
        Box::pin(async {
            Ok(Token {
                access_token: "jwt".to_string(),
                token_type: "bearer".to_string(),
            })
        })
    });
    api.expect_set_token().return_const(());
    api.expect_me()
        .returning(|| Box::pin(async { Ok(User::new("bob")) }));

    let app = app_with(api, None).await;
    run(
        &app,
        Some(Commands::Register {
            username: "bob".to_string(),
            password: "secret".to_string(),
            email: None,
            login: true,
        }),
    )
    .await
    .unwrap();
    assert_eq!(app.session.landing_page().await.unwrap(), Page::Chat);
}

#[tokio::test]
async fn test_commands_require_login() {
    let mut api = MockApi::new();
    api.expect_list_conversations().never();

    let app = app_with(api, None).await;
    let err = run(
        &app,
        Some(Commands::Conversations(ConversationsCommand::Clear {
            confirm: Confirm { yes: true },
        })),
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.downcast_ref::<crate::models::AccessError>(),
        Some(&crate::models::AccessError::NotAuthenticated)
    );
}

#[tokio::test]
async fn test_admin_commands_require_superuser() {
    let mut api = MockApi::new();
    api.expect_knowledge_stats().never();

    let app = app_with(api, Some(User::new("alice"))).await;
    let err = run(&app, Some(Commands::Admin(AdminCommand::Stats)))
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<crate::models::AccessError>(),
        Some(&crate::models::AccessError::NotAdmin)
    );
}

#[tokio::test]
async fn test_delete_conversation_with_yes() {
    let mut api = MockApi::new();
    api.expect_list_conversations()
        .returning(|| Box::pin(async { Ok(vec![ConversationSummary::new("c-1", "Travel")]) }));
    api.expect_delete_conversation()
        .withf(|id| id == "c-1")
        .times(1)
        .returning(|_| Box::pin(async { Ok(()) }));

    let app = app_with(api, Some(User::new("alice"))).await;
    run(
        &app,
        Some(Commands::Conversations(ConversationsCommand::Delete {
            conversation: "1".to_string(),
            confirm: Confirm { yes: true },
        })),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_upload_reports_failures() {
    let mut api = MockApi::new();
    api.expect_upload_document().never();

    let app = app_with(api, Some(User::new("root").with_superuser(true))).await;
    let err = run(
        &app,
        Some(Commands::Admin(AdminCommand::Upload {
            files: vec!["/nonexistent/a.exe".into(), "/nonexistent/b.pdf".into()],
        })),
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "2 of 2 uploads failed");
}

#[tokio::test]
async fn test_theme_commands() {
    let app = app_with(MockApi::new(), None).await;
    run(
        &app,
        Some(Commands::Theme {
            action: Some(ThemeCommand::Set {
                theme: "dark".to_string(),
            }),
        }),
    )
    .await
    .unwrap();
    assert_eq!(app.theme().await.unwrap().current_theme(), Theme::Dark);

    run(
        &app,
        Some(Commands::Theme {
            action: Some(ThemeCommand::Toggle),
        }),
    )
    .await
    .unwrap();
    assert_eq!(app.theme().await.unwrap().current_theme(), Theme::Light);

    let err = run(
        &app,
        Some(Commands::Theme {
            action: Some(ThemeCommand::Set {
                theme: "sepia".to_string(),
            }),
        }),
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("unknown theme"));
}

#[tokio::test]
async fn test_landing_without_session() {
    let app = app_with(MockApi::new(), None).await;
    run(&app, None).await.unwrap();
}

#[tokio::test]
async fn test_unauthorized_chat_clears_session() {
    let mut api = MockApi::new();
    api.expect_chat()
        .times(1)
        .returning(|_| Box::pin(async { Err(unauthorized()) }));
    api.expect_set_token()
        .withf(|token| token.is_none())
        .times(1)
        .return_const(());

    let app = app_with(api, Some(User::new("alice"))).await;
    let err = run(
        &app,
        Some(Commands::Chat {
            conversation: None,
            message: vec!["hello".to_string()],
        }),
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), SESSION_EXPIRED);
    assert!(!app.session.is_authenticated().await.unwrap());
}

#[tokio::test]
async fn test_failed_chat_keeps_session() {
    let mut api = MockApi::new();
    api.expect_chat()
        .returning(|_| Box::pin(async { Err(ApiError::new(502, "Bad gateway").into()) }));
    api.expect_set_token().never();

    let app = app_with(api, Some(User::new("alice"))).await;
    let err = run(
        &app,
        Some(Commands::Chat {
            conversation: None,
            message: vec!["hello".to_string()],
        }),
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "chat request failed");
    assert!(app.session.is_authenticated().await.unwrap());
}
