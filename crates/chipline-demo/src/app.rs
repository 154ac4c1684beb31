//! Demo application state: two stacked tag inputs.
//!
//! Mirrors the classic example screen: a vertical wrapping input for plain
//! tags, and a horizontal scrolling input that extracts email addresses.

use anyhow::Result;
use chipline_core::{Axis, HeightPolicy, TagInputConfig, TagValue};
use chipline_widgets::{TagInputAction, TagInputWidget, Theme};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::borrow::Cow;
use tracing::info;

const EMAIL_PATTERN: &str = r"[^\s,;]+@[^\s,;]+\.[^\s,;]+";

/// An email address tag. Rejects tokens without a domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Email(String);

impl TagValue for Email {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.0)
    }

    fn from_input(text: &str) -> Option<Self> {
        let (local, domain) = text.split_once('@')?;
        if local.is_empty() || !domain.contains('.') {
            return None;
        }
        Some(Email(text.to_lowercase()))
    }
}

/// Which input currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Tags,
    Emails,
}

/// The demo app.
pub struct App {
    tags: Vec<String>,
    emails: Vec<Email>,
    tag_input: TagInputWidget<String>,
    email_input: TagInputWidget<Email>,
    pane: Pane,
    theme: Theme,
    quit: bool,
}

impl App {
    /// Build the two inputs.
    pub fn new(max_tags: Option<usize>, no_auto_scroll: bool) -> Result<Self> {
        let mut tag_config = TagInputConfig::terminal()
            .with_no_auto_scroll(no_auto_scroll)
            .with_height_policy(HeightPolicy::ContentMeasured { max_height: 4.0 });
        if let Some(max) = max_tags {
            tag_config = tag_config.with_max_tags(max);
        }
        let tag_input = TagInputWidget::new(tag_config)?.with_placeholder("Add a tag");

        let email_config = TagInputConfig::terminal()
            .with_axis(Axis::Horizontal)
            .with_pattern(EMAIL_PATTERN)
            .with_parse_on_blur(true)
            .with_no_auto_scroll(no_auto_scroll);
        let email_input = TagInputWidget::new(email_config)?.with_placeholder("email");

        Ok(Self {
            tags: Vec::new(),
            emails: Vec::new(),
            tag_input,
            email_input,
            pane: Pane::Tags,
            theme: Theme::default(),
            quit: false,
        })
    }

    /// Whether the app should exit.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.quit = true;
                    return;
                }
                // Force a parse of whatever is pending.
                KeyCode::Char('p') => {
                    match self.pane {
                        Pane::Tags => {
                            let action = self.tag_input.parse_tags();
                            self.commit_tags(action);
                        }
                        Pane::Emails => {
                            let action = self.email_input.parse_tags();
                            self.commit_emails(action);
                        }
                    }
                    return;
                }
                // Append a suggested tag without parsing.
                KeyCode::Char('t') => {
                    let action = self.tag_input.add_custom_tag("suggested".to_string());
                    self.commit_tags(action);
                    return;
                }
                _ => {}
            }
        }

        if key.code == KeyCode::Tab {
            self.toggle_pane();
            return;
        }

        match self.pane {
            Pane::Tags => {
                let action = self.tag_input.handle_key(key);
                self.commit_tags(action);
            }
            Pane::Emails => {
                let action = self.email_input.handle_key(key);
                self.commit_emails(action);
            }
        }
    }

    /// Handle pasted text by appending it to the focused input.
    pub fn handle_paste(&mut self, text: &str) {
        match self.pane {
            Pane::Tags => {
                let combined = format!("{}{}", self.tag_input.pending_text(), text);
                self.tag_input.set_pending_text(&combined);
            }
            Pane::Emails => {
                let combined = format!("{}{}", self.email_input.pending_text(), text);
                self.email_input.set_pending_text(&combined);
                let action = self.email_input.parse_tags();
                self.commit_emails(action);
            }
        }
    }

    fn toggle_pane(&mut self) {
        match self.pane {
            Pane::Tags => {
                self.pane = Pane::Emails;
                let action = self.tag_input.blur();
                self.commit_tags(action);
                self.email_input.focus();
            }
            Pane::Emails => {
                self.pane = Pane::Tags;
                let action = self.email_input.blur();
                self.commit_emails(action);
                self.tag_input.focus();
            }
        }
    }

    fn commit_tags(&mut self, action: TagInputAction<String>) {
        if let TagInputAction::Changed(next) = action {
            info!(count = next.len(), "tags changed");
            self.tags = next.clone();
            self.tag_input.set_value(next);
        }
    }

    fn commit_emails(&mut self, action: TagInputAction<Email>) {
        if let TagInputAction::Changed(next) = action {
            info!(count = next.len(), "emails changed");
            self.emails = next.clone();
            self.email_input.set_value(next);
        }
    }

    /// Render the screen.
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(self.tag_input.desired_height() + 2),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(frame.area());

        let help = Line::from(
            "Tab: switch | Ctrl+P: parse | Ctrl+T: suggest | Ctrl+C: quit",
        );
        frame.render_widget(
            Paragraph::new(help).style(Style::default().fg(self.theme.placeholder)),
            chunks[0],
        );

        self.render_pane(frame, chunks[1], "Tags (wrap)", Pane::Tags);
        self.render_pane(frame, chunks[2], "To (emails, scroll)", Pane::Emails);

        // Ensure first-frame focus lands once the widgets are attached.
        if !self.tag_input.is_focused() && !self.email_input.is_focused() {
            match self.pane {
                Pane::Tags => self.tag_input.focus(),
                Pane::Emails => self.email_input.focus(),
            }
        }
    }

    fn render_pane(&mut self, frame: &mut Frame, area: Rect, title: &str, pane: Pane) {
        let focused = self.pane == pane;
        let border_style = if focused {
            Style::default().fg(self.theme.chip_text)
        } else {
            Style::default().fg(self.theme.border)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {title} "));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match pane {
            Pane::Tags => self.tag_input.render(frame, inner, &self.theme),
            Pane::Emails => self.email_input.render(frame, inner, &self.theme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_from_input() {
        assert_eq!(
            Email::from_input("A@b.com"),
            Some(Email("a@b.com".to_string()))
        );
        assert!(Email::from_input("nodomain").is_none());
        assert!(Email::from_input("@b.com").is_none());
        assert!(Email::from_input("a@nodot").is_none());
    }

    #[test]
    fn test_app_quits_on_ctrl_c() {
        let mut app = App::new(None, false).unwrap();
        assert!(!app.should_quit());
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }
}
