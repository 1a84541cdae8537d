use crate::app::AssistantState;
use crate::ui::components::{InputWidget, NavBar};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct AssistantScreen<'a> {
    pub state: &'a AssistantState,
    pub busy: bool,
}

impl<'a> AssistantScreen<'a> {
    pub fn new(state: &'a AssistantState) -> Self {
        Self { state, busy: false }
    }

    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

impl Widget for AssistantScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(3), // Question
                Constraint::Min(6),    // Answer
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Voice Assistant", Theme::title()),
            Span::styled(" - answering in ", Theme::dim()),
            Span::styled(self.state.language.as_str(), Theme::highlight()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        InputWidget::new("Your question", &self.state.question)
            .placeholder("Ask about watering, pests, fertilizer...")
            .focused(!self.busy)
            .render(chunks[1], buf);

        let block = Block::default()
            .title(Span::styled("Answer", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let body = if self.busy {
            Paragraph::new(Span::styled("Thinking...", Theme::dim()))
        } else if let Some(ref error) = self.state.error {
            Paragraph::new(Span::styled(error.as_str(), Theme::error()))
        } else if let Some(ref answer) = self.state.answer {
            Paragraph::new(answer.as_str()).style(Theme::normal())
        } else {
            Paragraph::new(Span::styled(
                "Type a question and press Enter",
                Theme::dim(),
            ))
        };
        body.block(block)
            .wrap(Wrap { trim: false })
            .render(chunks[2], buf);

        NavBar::new(&[
            ("Enter", "Ask"),
            ("Tab", "Language"),
            ("Ctrl-S", "Speak"),
            ("Esc", "Dashboard"),
            ("Ctrl-C", "Quit"),
        ])
        .render(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn shows_error_over_answer() {
        let mut state = AssistantState::new(Language::Marathi);
        state.answer = Some("old answer".into());
        state.error = Some("Assistant timed out".into());

        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        AssistantScreen::new(&state).render(area, &mut buf);

        assert!(row(&buf, 0).contains("Marathi"));
        assert!(row(&buf, 6).contains("Assistant timed out"));
    }
}
