pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget},
};
use webbrowser::Browser;

use crate::{App, Screen};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.session.view();

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);
        let cyan_italic_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::ITALIC);
        let magenta_style = Style::default().fg(Color::Magenta);

        match self.screen {
            Screen::Ready => {
                let lines = vec![
                    Line::from(Span::styled("clickdash", bold_style)),
                    Line::default(),
                    Line::from(vec![
                        Span::styled("round length  ", dim_bold_style),
                        Span::styled(format!("‹ {} ›", self.selector.label()), green_bold_style),
                    ]),
                    Line::from(Span::styled(
                        format!("personal best  {}", view.high_score),
                        dim_bold_style,
                    )),
                    Line::default(),
                    Line::from(Span::styled(view.status_line, italic_style)),
                ];

                let chunks = centered_chunks(area, lines.len() as u16);
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .render(chunks[1], buf);

                let legend = Paragraph::new(Span::styled(
                    "(←/→) round length / (space) start / (esc)ape",
                    italic_style,
                ));
                legend.render(chunks[2], buf);
            }
            Screen::Playing => {
                let lines = vec![
                    Line::from(Span::styled(view.remaining, dim_bold_style)),
                    Line::default(),
                    Line::from(Span::styled(
                        format!("{} clicks", view.clicks),
                        green_bold_style,
                    )),
                    Line::default(),
                    Line::from(Span::styled(view.status_line, italic_style)),
                ];

                let chunks = centered_chunks(area, lines.len() as u16);
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .render(chunks[1], buf);
            }
            Screen::Results => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .horizontal_margin(HORIZONTAL_MARGIN)
                    .vertical_margin(VERTICAL_MARGIN)
                    .constraints([
                        Constraint::Min(1),    // chart
                        Constraint::Length(1), // stats
                        Constraint::Length(1), // best / new best banner
                        Constraint::Length(1), // padding
                        Constraint::Length(1), // legend
                    ])
                    .split(area);

                let (overall_duration, highest_rate) = charting::compute_chart_params(
                    self.session.cps_coords(),
                    self.session.duration_secs(),
                );

                let datasets = vec![Dataset::default()
                    .marker(ratatui::symbols::Marker::Braille)
                    .style(magenta_style)
                    .graph_type(GraphType::Line)
                    .data(self.session.cps_coords())];

                let chart = Chart::new(datasets)
                    .x_axis(
                        Axis::default()
                            .title("seconds")
                            .bounds([1.0, overall_duration])
                            .labels(vec![
                                Span::styled("1", bold_style),
                                Span::styled(charting::format_label(overall_duration), bold_style),
                            ]),
                    )
                    .y_axis(
                        Axis::default()
                            .title("clicks/sec")
                            .bounds([0.0, highest_rate])
                            .labels(vec![
                                Span::styled("0", bold_style),
                                Span::styled(charting::format_label(highest_rate), bold_style),
                            ]),
                    );

                chart.render(chunks[0], buf);

                let stats = match self.session.outcome() {
                    Some(outcome) => format!(
                        "{} clicks   {:.2} cps   {:.2} sd",
                        outcome.final_score, outcome.clicks_per_sec, outcome.consistency
                    ),
                    None => format!("{} clicks", view.clicks),
                };
                Paragraph::new(Span::styled(stats, bold_style))
                    .alignment(Alignment::Center)
                    .render(chunks[1], buf);

                let best_line = match self.session.outcome() {
                    Some(outcome) if outcome.is_new_high_score => view.status_line,
                    _ => format!("personal best: {}", view.high_score),
                };
                Paragraph::new(Span::styled(best_line, cyan_italic_style))
                    .alignment(Alignment::Center)
                    .render(chunks[2], buf);

                let legend = Paragraph::new(Span::styled(
                    String::from(if Browser::is_available() {
                        "(r)etry / (t)weet / (esc)ape"
                    } else {
                        "(r)etry / (esc)ape"
                    }),
                    italic_style,
                ));
                legend.render(chunks[4], buf);
            }
        }
    }
}

/// Vertically center `height` lines, keeping a one-line legend row at
/// the bottom.
fn centered_chunks(area: Rect, height: u16) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height + 1) / 2),
            Constraint::Length(height),
            Constraint::Min(1),
        ])
        .split(area)
}
