use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::model::Focus;
use crate::app::{App, Message, Model};
use crate::editor::Direction;
use crate::tasks::EditCommand;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                Self::handle_key(*key, model)
            }
            Event::Paste(text) => Self::handle_paste(text, model),
            Event::Resize(..) => Some(Message::Redraw),
            _ => None,
        }
    }

    fn handle_paste(text: &str, model: &Model) -> Option<Message> {
        if model.help_visible || model.bulk_input.is_some() {
            return None;
        }
        match model.focus {
            Focus::Buffer => Some(Message::Edit(EditCommand::InsertText(text.to_string()))),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if model.bulk_input.is_some() {
            return match key.code {
                KeyCode::Esc => Some(Message::BulkCancel),
                KeyCode::Char('s') if ctrl => Some(Message::BulkSubmit),
                KeyCode::Enter => Some(Message::BulkNewline),
                KeyCode::Backspace => Some(Message::BulkDeleteBack),
                KeyCode::Up => Some(Message::BulkMoveCursor(Direction::Up)),
                KeyCode::Down => Some(Message::BulkMoveCursor(Direction::Down)),
                KeyCode::Left => Some(Message::BulkMoveCursor(Direction::Left)),
                KeyCode::Right => Some(Message::BulkMoveCursor(Direction::Right)),
                KeyCode::Char(c) if !ctrl => Some(Message::BulkInsertChar(c)),
                _ => None,
            };
        }

        // Global keys
        match key.code {
            KeyCode::Char('q' | 'c') if ctrl => return Some(Message::Quit),
            KeyCode::Char('a') if ctrl => return Some(Message::Analyze),
            KeyCode::Char('g') if ctrl => return Some(Message::Suggest),
            KeyCode::Char('t') if ctrl => return Some(Message::CycleStrategy),
            KeyCode::Char('l') if ctrl => return Some(Message::LoadSample),
            KeyCode::Char('b') if ctrl => return Some(Message::OpenBulk),
            KeyCode::Char('r') if ctrl => return Some(Message::ClearResults),
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::Tab => return Some(Message::FocusNext),
            KeyCode::BackTab => return Some(Message::FocusPrev),
            _ => {}
        }
        if ctrl || key.modifiers.contains(KeyModifiers::ALT) {
            return None;
        }

        match model.focus {
            Focus::Buffer => Self::buffer_key(key),
            Focus::Form => match key.code {
                KeyCode::Up => Some(Message::FormUp),
                KeyCode::Down => Some(Message::FormDown),
                KeyCode::Enter => Some(Message::FormSubmit),
                KeyCode::Esc => Some(Message::FormCancel),
                KeyCode::Backspace => Some(Message::FormBackspace),
                KeyCode::Char(c) => Some(Message::FormInput(c)),
                _ => None,
            },
            Focus::LiveList => match key.code {
                KeyCode::Up | KeyCode::Char('k') => Some(Message::LiveUp),
                KeyCode::Down | KeyCode::Char('j') => Some(Message::LiveDown),
                KeyCode::Enter | KeyCode::Char('e') => Some(Message::LiveEdit),
                KeyCode::Delete | KeyCode::Char('d') => Some(Message::LiveRemove),
                _ => None,
            },
            Focus::Results => match key.code {
                KeyCode::Up | KeyCode::Char('k') => Some(Message::ResultsScrollUp(1)),
                KeyCode::Down | KeyCode::Char('j') => Some(Message::ResultsScrollDown(1)),
                KeyCode::PageUp => Some(Message::ResultsScrollUp(10)),
                KeyCode::PageDown => Some(Message::ResultsScrollDown(10)),
                _ => None,
            },
        }
    }

    fn buffer_key(key: KeyEvent) -> Option<Message> {
        let command = match key.code {
            KeyCode::Char(c) => EditCommand::InsertChar(c),
            KeyCode::Enter => EditCommand::Newline,
            KeyCode::Backspace => EditCommand::DeleteBack,
            KeyCode::Delete => EditCommand::DeleteForward,
            KeyCode::Up => EditCommand::MoveCursor(Direction::Up),
            KeyCode::Down => EditCommand::MoveCursor(Direction::Down),
            KeyCode::Left => EditCommand::MoveCursor(Direction::Left),
            KeyCode::Right => EditCommand::MoveCursor(Direction::Right),
            KeyCode::Home => EditCommand::MoveHome,
            KeyCode::End => EditCommand::MoveEnd,
            _ => return None,
        };
        Some(Message::Edit(command))
    }
}
