//! Keybinding definitions for the TUI.
//!
//! Normal mode maps keys to commands. Editing mode routes keys into the
//! focused text field.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextView,
    PrevView,
    SwitchView(usize),
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    NewItem,
    EditItem,
    DeleteItem,
    TestEndpoint,
    SubmitForm,
    Save,
    OpenHelp,
    Refresh,
    Confirm,
    Cancel,
}

/// Keys while a text field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Insert(char),
    Backspace,
    Enter,
    Escape,
    Save,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('s') => Some(Action::Save),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char('n') => Some(Action::NewItem),
        KeyCode::Char('e') => Some(Action::EditItem),
        KeyCode::Char('d') => Some(Action::DeleteItem),
        KeyCode::Char('t') => Some(Action::TestEndpoint),
        KeyCode::Char('s') => Some(Action::SubmitForm),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextView),
        KeyCode::BackTab => Some(Action::PrevView),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveRight),
        KeyCode::Char(c @ '1'..='9') => Some(Action::SwitchView(c as usize - '1' as usize)),
        _ => None,
    }
}

pub fn map_edit_key(event: KeyEvent) -> Option<EditAction> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('s') => Some(EditAction::Save),
            KeyCode::Char('c') => Some(EditAction::Escape),
            _ => None,
        };
    }

    match code {
        KeyCode::Char(c) => Some(EditAction::Insert(c)),
        KeyCode::Backspace => Some(EditAction::Backspace),
        KeyCode::Enter => Some(EditAction::Enter),
        KeyCode::Esc => Some(EditAction::Escape),
        _ => None,
    }
}

/// One-line help for the footer, depending on mode.
pub fn help_line(editing: bool) -> &'static str {
    if editing {
        "type to edit • Enter commit (newline in multi-line) • Esc commit multi-line • Ctrl+S save"
    } else {
        "j/k move • Enter edit • Tab switch • n new • e edit • d delete • t test • Ctrl+S save • ? help • q quit"
    }
}

pub const HELP_TEXT: &str = "\
1/2/3 switch views (Dashboard, Agents, Builder)
Tab / Shift+Tab cycle views, or builder tabs while in the builder
j/k or arrows move focus and selection
Enter edit the focused field (Enter commits single-line, Esc multi-line)
h/l cycle the HTTP method in the endpoint form
n new agent or endpoint, e edit, d delete, t test endpoint
s submit the endpoint form, Esc cancel it
Ctrl+S save the agent, Ctrl+R refresh, q quit";
