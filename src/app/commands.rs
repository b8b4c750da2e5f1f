#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;

use eyre::{Context, Result};
use std::io::IsTerminal;

use crate::{
    api::is_unauthorized,
    cli::{AdminCommand, Commands, ConversationsCommand, ThemeCommand},
    error_notice, info_notice,
    models::{NoticeMessage, Page, Theme, User},
    success_notice,
    ui::{self, Input, Renderer, table},
};

use super::{App, ChatSession, Repl, ThemeManager};

pub const SESSION_EXPIRED: &str = "your session has expired, run `regbot login` to sign in again";

/// Run one command, or the landing page when none is given. A 401 from the
/// backend drops the stored session.
pub async fn run(app: &App, command: Option<Commands>) -> Result<()> {
    let signing_in = matches!(
        command,
        Some(Commands::Login { .. }) | Some(Commands::Register { .. })
    );

    let theme = app.theme().await?;
    let result = dispatch(app, theme, command).await;

    match result {
        Err(err) if !signing_in && is_unauthorized(&err) => {
            log::warn!("Backend rejected the session: {}", err);
            app.auth().forget().await?;
            Err(err.wrap_err(SESSION_EXPIRED))
        }
        other => other,
    }
}

async fn dispatch(app: &App, mut theme: ThemeManager, command: Option<Commands>) -> Result<()> {
    let renderer = theme.renderer();
    let Some(command) = command else {
        return landing(app, theme, &renderer).await;
    };

    match command {
        Commands::Login { username, password } => {
            login(app, &renderer, username, password).await?;
        }
        Commands::Register {
            username,
            password,
            email,
            login: then_login,
        } => {
            let user = app
                .auth()
                .register(&username, &password, email.as_deref())
                .await?;
            notice(
                &renderer,
                success_notice!(format!("Account {} created", user.username)),
            );
            if then_login {
                login(app, &renderer, Some(username), Some(password)).await?;
            }
        }
        Commands::Logout { yes } => {
            if !app.session.is_authenticated().await? {
                notice(&renderer, info_notice!("You are not logged in"));
            } else if confirm(yes, "Log out?").await? {
                app.auth().logout().await?;
                notice(&renderer, success_notice!("Logged out"));
            }
        }
        Commands::Whoami { refresh } => {
            app.session.require_authenticated().await?;
            let user = match (refresh, app.session.user().await?) {
                (false, Some(user)) => user,
                _ => app.auth().refresh_profile().await?,
            };
            print_user(&user);
        }
        Commands::Chat {
            conversation,
            message,
        } => {
            app.session.require_authenticated().await?;
            let text = message.join(" ");
            if text.trim().is_empty() {
                let mut repl = Repl::new(app.chat(), theme, Input::stdin())
                    .with_interactive(std::io::stderr().is_terminal());
                if let Some(reference) = conversation {
                    repl.open(&reference).await?;
                }
                return repl.run().await;
            }
            ask(app, &renderer, conversation.as_deref(), &text).await?;
        }
        Commands::Conversations(action) => {
            app.session.require_authenticated().await?;
            conversations(app, &renderer, action).await?;
        }
        Commands::Admin(action) => admin(app, &renderer, action).await?,
        Commands::Theme { action } => {
            let current = match action.unwrap_or(ThemeCommand::Show) {
                ThemeCommand::Show => theme.current_theme(),
                ThemeCommand::Toggle => theme.toggle_theme().await?,
                ThemeCommand::Set { theme: name } => {
                    theme.set_theme(name.parse::<Theme>()?).await?
                }
            };
            println!(
                "Theme: {} (code highlighting: {})",
                current,
                theme.highlight_theme_name()
            );
        }
    }
    Ok(())
}

async fn landing(app: &App, theme: ThemeManager, renderer: &Renderer) -> Result<()> {
    let page = app.session.landing_page().await?;
    log::debug!("Landing on the {} page", page);

    match page {
        Page::Login => notice(
            renderer,
            info_notice!(
                "You are not logged in. Run `regbot login` to sign in or `regbot register` to create an account."
            ),
        ),
        Page::Chat => {
            Repl::new(app.chat(), theme, Input::stdin())
                .with_interactive(std::io::stderr().is_terminal())
                .run()
                .await?;
        }
        Page::Admin => {
            let console = app.admin().await?;
            println!("Admin dashboard ({})\n", console.user().username);
            println!("{}\n", table::stats_table(&console.stats().await?));
            let documents = console.documents().await?;
            println!("{}", table::document_table(&documents.documents));
            println!("\nRun `regbot admin --help` to manage documents.");
        }
    }
    Ok(())
}

async fn login(
    app: &App,
    renderer: &Renderer,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let mut input = Input::stdin();
    let username = match username {
        Some(username) => username,
        None => input.required("Username: ").await?,
    };
    let password = match password {
        Some(password) => password,
        None => input.required("Password: ").await?,
    };

    let (user, page) = app.auth().login(&username, &password).await?;
    notice(
        renderer,
        success_notice!(format!("Logged in as {} ({})", user.username, user.role())),
    );
    match page {
        Page::Admin => notice(
            renderer,
            info_notice!("Run `regbot` to open the admin dashboard"),
        ),
        _ => notice(renderer, info_notice!("Run `regbot chat` to start chatting")),
    }
    Ok(())
}

async fn ask(app: &App, renderer: &Renderer, reference: Option<&str>, text: &str) -> Result<()> {
    let mut chat = app.chat();
    if let Some(reference) = reference {
        let id = resolve(&mut chat, reference).await?;
        chat.open_conversation(&id).await?;
    }

    let mut typing = ui::TypingIndicator::on_terminal("assistant is typing");
    let reply = chat.send_message(text).await;
    typing.stop();

    let Some(reply) = reply else {
        return Ok(());
    };
    println!("{}", renderer.message(&reply)?);
    if reply.failed() {
        return match chat.take_error() {
            Some(err) if is_unauthorized(&err) => Err(err),
            _ => Err(eyre::eyre!("chat request failed")),
        };
    }
    if let Some(id) = chat.current() {
        log::debug!("Reply stored in conversation {}", id);
    }
    Ok(())
}

async fn conversations(
    app: &App,
    renderer: &Renderer,
    action: ConversationsCommand,
) -> Result<()> {
    let mut chat = app.chat();
    chat.load_conversations().await?;

    match action {
        ConversationsCommand::List => {
            println!("{}", table::conversation_table(chat.conversations(), None));
        }
        ConversationsCommand::Show { conversation } => {
            let id = chat.resolve(&conversation)?;
            chat.open_conversation(&id).await?;
            println!("== {} ==\n", chat.title());
            for message in chat.transcript() {
                println!("{}\n", renderer.message(message)?);
            }
        }
        ConversationsCommand::Delete {
            conversation,
            confirm: yes,
        } => {
            let id = chat.resolve(&conversation)?;
            if confirm(yes.yes, &format!("Delete conversation {}?", id)).await? {
                chat.delete_conversation(&id).await?;
                notice(renderer, success_notice!("Conversation deleted"));
            }
        }
        ConversationsCommand::Clear { confirm: yes } => {
            let count = chat.conversations().len();
            if count == 0 {
                notice(renderer, info_notice!("No conversations to delete"));
            } else if confirm(yes.yes, &format!("Delete all {} conversations?", count)).await? {
                let deleted = chat.clear_all().await?;
                notice(
                    renderer,
                    success_notice!(format!("Deleted {} conversations", deleted)),
                );
            }
        }
        ConversationsCommand::Rename {
            conversation,
            title,
        } => {
            let id = chat.resolve(&conversation)?;
            chat.rename_conversation(&id, &title.join(" ")).await?;
            notice(renderer, success_notice!("Conversation renamed"));
        }
    }
    Ok(())
}

async fn admin(app: &App, renderer: &Renderer, action: AdminCommand) -> Result<()> {
    let console = app.admin().await?;

    match action {
        AdminCommand::Stats => println!("{}", table::stats_table(&console.stats().await?)),
        AdminCommand::Documents => {
            let documents = console.documents().await?;
            println!("{}", table::document_table(&documents.documents));
            println!("\nTotal: {}", documents.total);
        }
        AdminCommand::Upload { files } => {
            let mut failed = 0;
            for file in &files {
                match console.upload(file).await {
                    Ok(result) => notice(
                        renderer,
                        success_notice!(format!(
                            "Uploaded {} ({} chunks)",
                            result.filename, result.chunks_count
                        )),
                    ),
                    Err(err) if is_unauthorized(&err) => {
                        return Err(err);
                    }
                    Err(err) => {
                        failed += 1;
                        notice(
                            renderer,
                            error_notice!(format!("{}: {:#}", file.display(), err)),
                        );
                    }
                }
            }
            if failed > 0 {
                eyre::bail!("{} of {} uploads failed", failed, files.len());
            }
        }
        AdminCommand::Delete {
            filename,
            confirm: yes,
        } => {
            if confirm(yes.yes, &format!("Delete document {}?", filename)).await? {
                let warning = console.delete_document(&filename).await?;
                notice(renderer, warning);
            }
        }
        AdminCommand::Rebuild { confirm: yes } => {
            if confirm(
                yes.yes,
                "Rebuild the knowledge base? Every document is processed again.",
            )
            .await?
            {
                let result = console.rebuild().await?;
                notice(
                    renderer,
                    success_notice!(format!(
                        "Knowledge base rebuilt: {} documents, {} chunks",
                        result.documents_processed, result.total_chunks
                    )),
                );
            }
        }
    }
    Ok(())
}

async fn resolve(chat: &mut ChatSession, reference: &str) -> Result<String> {
    chat.load_conversations().await?;
    chat.resolve(reference)
        .wrap_err(format!("opening conversation {}", reference))
}

async fn confirm(assume_yes: bool, question: &str) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Input::stdin().confirm(question).await
}

fn print_user(user: &User) {
    println!("{} ({})", user.username, user.role());
    if let Some(email) = &user.email {
        println!("email: {}", email);
    }
    println!("id: {}", user.id);
}

fn notice(renderer: &Renderer, notice: NoticeMessage) {
    ui::print_notice(renderer, &notice);
}
