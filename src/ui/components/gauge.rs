use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    min: f64,
    max: f64,
    color: fn(f64) -> Color,
    precision: usize,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            color: |_| Theme::FG,
            precision: 1,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Color the value and bar by the band the value falls into.
    pub fn colored_by(mut self, color: fn(f64) -> Color) -> Self {
        self.color = color;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn get_color(&self, value: f64) -> Color {
        (self.color)(value)
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        match self.value {
            Some(value) => {
                let color = self.get_color(value);
                let value_str = format!("{:.prec$}{}", value, self.unit, prec = self.precision);

                // Render value
                let value_line =
                    Line::from(vec![Span::styled(value_str, Style::default().fg(color))]);

                let para = Paragraph::new(value_line);
                para.render(inner, buf);

                // Render bar if space allows
                if inner.height >= 2 {
                    let bar_area = Rect {
                        x: inner.x,
                        y: inner.y + 1,
                        width: inner.width,
                        height: 1,
                    };

                    let ratio = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
                    let filled = (bar_area.width as f64 * ratio) as u16;

                    for x in bar_area.x..bar_area.x + bar_area.width {
                        let ch = if x < bar_area.x + filled {
                            '█'
                        } else {
                            '░'
                        };
                        buf[(x, bar_area.y)].set_char(ch).set_fg(color);
                    }
                }
            }
            None => {
                let na_line = Line::from(vec![Span::styled("N/A", Theme::dim())]);
                let para = Paragraph::new(na_line);
                para.render(inner, buf);
            }
        }
    }
}

pub fn temperature_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "°C")
        .range(0.0, 50.0)
        .colored_by(Theme::temp_color)
}

pub fn moisture_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "%")
        .range(0.0, 100.0)
        .precision(0)
        .colored_by(Theme::moisture_color)
}

pub fn air_quality_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, " ppm")
        .range(0.0, 3000.0)
        .precision(0)
        .colored_by(Theme::air_quality_color)
}

pub fn humidity_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "%")
        .range(0.0, 100.0)
        .precision(0)
        .colored_by(|h| {
            if (40.0..=80.0).contains(&h) {
                Theme::SUCCESS
            } else {
                Theme::WARNING
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_color_follows_bands() {
        let gauge = moisture_gauge("Soil", Some(35.0));
        assert_eq!(gauge.get_color(10.0), Theme::MOISTURE_DRY);
        assert_eq!(gauge.get_color(35.0), Theme::MOISTURE_DRYING);
        assert_eq!(gauge.get_color(75.0), Theme::MOISTURE_OK);
    }

    #[test]
    fn air_quality_boundaries_match_bands() {
        let gauge = air_quality_gauge("Air", None);
        assert_eq!(gauge.get_color(1000.0), Theme::AIR_GOOD);
        assert_eq!(gauge.get_color(1500.0), Theme::AIR_POOR);
        assert_eq!(gauge.get_color(2000.0), Theme::AIR_POOR);
        assert_eq!(gauge.get_color(2500.0), Theme::AIR_DANGEROUS);

        let gauge = humidity_gauge("Humidity", None);
        assert_eq!(gauge.get_color(39.0), Theme::WARNING);
        assert_eq!(gauge.get_color(80.0), Theme::SUCCESS);
        assert_eq!(gauge.get_color(81.0), Theme::WARNING);
    }

    #[test]
    fn renders_value_and_bar() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        humidity_gauge("Humidity", Some(50.0)).render(area, &mut buf);
        let row: String = (1..19).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.starts_with("50%"));
        assert_eq!(buf[(1, 2)].symbol(), "█");
    }

    #[test]
    fn missing_value_shows_na() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        temperature_gauge("Temp", None).render(area, &mut buf);
        let row: String = (1..4).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert_eq!(row, "N/A");
    }
}
