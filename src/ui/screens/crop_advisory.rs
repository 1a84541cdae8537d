use crate::app::{CropAdvisoryState, CropField};
use crate::models::{Crop, GrowthStage, Language};
use crate::ui::components::{InputWidget, NavBar, SelectWidget};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct CropAdvisoryScreen<'a> {
    pub state: &'a CropAdvisoryState,
    pub busy: bool,
}

impl<'a> CropAdvisoryScreen<'a> {
    pub fn new(state: &'a CropAdvisoryState) -> Self {
        Self { state, busy: false }
    }

    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

impl Widget for CropAdvisoryScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Selectors
                Constraint::Length(3), // Location and image
                Constraint::Min(6),    // Advisory
                Constraint::Length(1), // Nav
            ])
            .split(area);

        Paragraph::new(Span::styled("Crop Advisory", Theme::title())).render(chunks[0], buf);

        self.render_selectors(chunks[1], buf);
        self.render_inputs(chunks[2], buf);
        self.render_answer(chunks[3], buf);

        NavBar::new(&[
            ("Tab/↑↓", "Field"),
            ("←→", "Change"),
            ("Enter", "Get advice"),
            ("Ctrl-S", "Speak"),
            ("Esc", "Dashboard"),
        ])
        .render(chunks[4], buf);
    }
}

impl CropAdvisoryScreen<'_> {
    fn focused(&self, field: CropField) -> bool {
        !self.busy && self.state.focused_field == field
    }

    fn render_selectors(&self, area: Rect, buf: &mut Buffer) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(area);

        let crops: Vec<&str> = Crop::ALL.iter().map(|c| c.as_str()).collect();
        let crop_index = Crop::ALL
            .iter()
            .position(|c| *c == self.state.crop)
            .unwrap_or(0);
        SelectWidget::new("Crop", &crops, crop_index)
            .focused(self.focused(CropField::Crop))
            .render(cols[0], buf);

        let stages: Vec<&str> = GrowthStage::ALL.iter().map(|s| s.as_str()).collect();
        let stage_index = GrowthStage::ALL
            .iter()
            .position(|s| *s == self.state.stage)
            .unwrap_or(0);
        SelectWidget::new("Growth stage", &stages, stage_index)
            .focused(self.focused(CropField::Stage))
            .render(cols[1], buf);

        let languages: Vec<&str> = Language::ALL.iter().map(|l| l.locale()).collect();
        SelectWidget::new("Language", &languages, self.state.language.index())
            .focused(self.focused(CropField::Language))
            .render(cols[2], buf);
    }

    fn render_inputs(&self, area: Rect, buf: &mut Buffer) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        InputWidget::new("Location (village/city/state)", &self.state.location)
            .placeholder("e.g. Nashik, Maharashtra")
            .focused(self.focused(CropField::Location))
            .render(cols[0], buf);

        InputWidget::new("Crop/field photo (optional)", &self.state.image_path)
            .placeholder("/path/to/field.jpg")
            .focused(self.focused(CropField::Image))
            .render(cols[1], buf);
    }

    fn render_answer(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("AI Advisory", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let body = if self.busy {
            Paragraph::new(Span::styled("Preparing advice...", Theme::dim()))
        } else if let Some(ref error) = self.state.error {
            Paragraph::new(Span::styled(error.as_str(), Theme::error()))
        } else if let Some(ref answer) = self.state.answer {
            Paragraph::new(answer.as_str()).style(Theme::normal())
        } else {
            Paragraph::new(Span::styled(
                "Choose a crop and stage, enter your location, then press Enter",
                Theme::dim(),
            ))
        };

        body.block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn focused_selector_is_marked() {
        let mut state = CropAdvisoryState::new(Language::Hindi);
        state.crop = Crop::Cotton;
        let area = Rect::new(0, 0, 90, 14);
        let mut buf = Buffer::empty(area);
        CropAdvisoryScreen::new(&state).render(area, &mut buf);

        let selectors = row(&buf, 2);
        assert!(selectors.contains("< Cotton >"));
        assert!(selectors.contains("Sowing"));
        assert!(selectors.contains("hi-IN"));
    }
}
