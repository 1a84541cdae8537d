use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Single text field; typing always appends, so the cursor sits at the end.
pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = if self.value.is_empty() && !self.focused {
            vec![Span::styled(self.placeholder, Theme::dim())]
        } else {
            vec![Span::raw(self.value)]
        };
        if self.focused {
            spans.push(Span::styled(" ", Theme::selected()));
        }

        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

/// One choice out of a fixed list, cycled with the arrow keys.
pub struct SelectWidget<'a> {
    label: &'a str,
    options: &'a [&'a str],
    selected: usize,
    focused: bool,
}

impl<'a> SelectWidget<'a> {
    pub fn new(label: &'a str, options: &'a [&'a str], selected: usize) -> Self {
        Self {
            label,
            options,
            selected,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn position(&self) -> String {
        format!("{}/{}", self.selected + 1, self.options.len())
    }
}

impl Widget for SelectWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (border_style, value_style) = if self.focused {
            (Theme::border_focused(), Theme::highlight())
        } else {
            (Theme::border(), Theme::normal())
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let value = self.options.get(self.selected).copied().unwrap_or("-");
        let line = if self.focused {
            Line::from(vec![
                Span::styled(format!("< {} >", value), value_style),
                Span::styled(format!(" {}", self.position()), Theme::dim()),
            ])
        } else {
            Line::from(Span::styled(value, value_style))
        };

        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16, width: u16) -> String {
        (1..width - 1)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn placeholder_shows_when_empty_and_unfocused() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        InputWidget::new("Image", "")
            .placeholder("path/to/leaf.jpg")
            .render(area, &mut buf);
        assert_eq!(row_text(&buf, 1, 30), "path/to/leaf.jpg");
    }

    #[test]
    fn focused_input_shows_value() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        InputWidget::new("Question", "when to sow")
            .placeholder("ignored")
            .focused(true)
            .render(area, &mut buf);
        assert_eq!(row_text(&buf, 1, 30), "when to sow");
    }

    #[test]
    fn select_out_of_range_shows_dash() {
        let options = ["Wheat"];
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        SelectWidget::new("Crop", &options, 4).render(area, &mut buf);
        assert_eq!(row_text(&buf, 1, 20), "-");
    }

    #[test]
    fn select_marks_focus() {
        let options = ["Wheat", "Rice"];
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        SelectWidget::new("Crop", &options, 1)
            .focused(true)
            .render(area, &mut buf);
        assert_eq!(row_text(&buf, 1, 20), "< Rice > 2/2");
    }
}
