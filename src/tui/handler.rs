use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::Platform;

#[derive(Debug, Clone)]
pub enum AppAction {
    Quit,
    MoveUp,
    MoveDown,
    NextPlatform,
    PrevPlatform,
    SelectPlatform(Platform),
    Generate,
    CopyText,
    Share,
    RemoveArticle,
    ClearBatch,
    ShowHelp,
    HideHelp,
    // Path input actions (load batch / attach image)
    LoadFileStart,
    AttachImageStart,
    PathInputChar(char),
    PathInputBackspace,
    PathInputConfirm,
    PathInputCancel,
}

pub fn handle_key_event(
    key: KeyEvent,
    path_input_active: bool,
    show_help: bool,
) -> Option<AppAction> {
    // If help is showing, any key closes it
    if show_help {
        return Some(AppAction::HideHelp);
    }

    // Path input mode
    if path_input_active {
        return match key.code {
            KeyCode::Enter => Some(AppAction::PathInputConfirm),
            KeyCode::Esc => Some(AppAction::PathInputCancel),
            KeyCode::Backspace => Some(AppAction::PathInputBackspace),
            KeyCode::Char(c) => Some(AppAction::PathInputChar(c)),
            _ => None,
        };
    }

    // Normal mode
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => Some(AppAction::Quit),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppAction::Quit),

        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(AppAction::MoveDown),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(AppAction::MoveUp),

        (KeyCode::Tab, _) | (KeyCode::Right, _) => Some(AppAction::NextPlatform),
        (KeyCode::BackTab, _) | (KeyCode::Left, _) => Some(AppAction::PrevPlatform),
        (KeyCode::Char('1'), _) => Some(AppAction::SelectPlatform(Platform::Twitter)),
        (KeyCode::Char('2'), _) => Some(AppAction::SelectPlatform(Platform::LinkedIn)),
        (KeyCode::Char('3'), _) => Some(AppAction::SelectPlatform(Platform::Facebook)),
        (KeyCode::Char('4'), _) => Some(AppAction::SelectPlatform(Platform::Threads)),

        (KeyCode::Enter, _) | (KeyCode::Char('g'), _) => Some(AppAction::Generate),

        (KeyCode::Char('c'), _) => Some(AppAction::CopyText),
        (KeyCode::Char('s'), _) => Some(AppAction::Share),
        (KeyCode::Char('d'), _) => Some(AppAction::RemoveArticle),
        (KeyCode::Char('x'), _) => Some(AppAction::ClearBatch),
        (KeyCode::Char('l'), _) => Some(AppAction::LoadFileStart),
        (KeyCode::Char('i'), _) => Some(AppAction::AttachImageStart),

        (KeyCode::Char('?'), _) => Some(AppAction::ShowHelp),

        _ => None,
    }
}
