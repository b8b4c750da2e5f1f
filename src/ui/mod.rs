pub mod format;
pub mod input;
pub mod render;
pub mod syntaxes;
pub mod table;
pub mod typing;

pub use input::Input;
pub use render::Renderer;
pub use typing::TypingIndicator;

use crate::models::{NoticeKind, NoticeMessage};

/// Print a notice, errors and warnings to stderr and the rest to stdout.
pub fn print_notice(renderer: &Renderer, notice: &NoticeMessage) {
    let line = renderer.notice(notice);
    match notice.kind() {
        NoticeKind::Error | NoticeKind::Warning => eprintln!("{}", line),
        _ => println!("{}", line),
    }
}
