use chrono::Datelike;
use itertools::Itertools;
use tui::buffer::Buffer;
use tui::layout::{Constraint, Rect};
use tui::style::Style;
use tui::text::{Span, Spans};
use tui::widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, Widget};

use crate::context::Context;
use crate::family::Severity;
use crate::ui::Theme;

pub struct DayCell {
    day_num: u8,
    selected: bool,
    is_today: bool,
    style: Style,
    focus_style: Style,
    today_style: Style,
    today_symbol: Option<char>,
}

impl DayCell {
    pub fn new(day_num: u8) -> Self {
        DayCell {
            day_num,
            selected: false,
            is_today: false,
            style: Style::default(),
            focus_style: Style::default(),
            today_style: Style::default(),
            today_symbol: None,
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn focus_style(mut self, style: Style) -> Self {
        self.focus_style = style;
        self
    }

    pub fn today_style(mut self, style: Style) -> Self {
        self.today_style = style;
        self
    }

    pub fn today_symbol_opt(mut self, symbol: Option<char>) -> Self {
        self.today_symbol = symbol;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn today(mut self, is_today: bool) -> Self {
        self.is_today = is_today;
        self
    }
}

impl<'a> From<DayCell> for Cell<'a> {
    fn from(cell: DayCell) -> Self {
        let mut style = cell.style;
        if cell.is_today {
            style = style.patch(cell.today_style);
        }
        if cell.selected {
            style = style.patch(cell.focus_style);
        }

        let marker = match (cell.is_today, cell.today_symbol) {
            (true, Some(symbol)) => symbol.to_string(),
            _ => " ".to_owned(),
        };

        Cell::from(Spans::from(vec![
            Span::styled(marker, style),
            Span::styled(format!("{:>2}", cell.day_num), style),
        ]))
    }
}

/// One month page: title, weekday header, the day grid colored by each
/// day's aggregated severity, and the severity legend.
pub struct MonthView {
    theme: Theme,
}

impl MonthView {
    const COLUMNS: u16 = 7;
    const LABEL_ROWS: u16 = 1;
    const HEADER_ROWS: u16 = 1;
    const WEEK_ROWS: u16 = 6;

    pub fn new(theme: Theme) -> Self {
        MonthView { theme }
    }

    pub fn grid_height() -> u16 {
        Self::LABEL_ROWS + Self::HEADER_ROWS + Self::WEEK_ROWS
    }
}

impl Default for MonthView {
    fn default() -> Self {
        MonthView::new(Theme::default())
    }
}

impl StatefulWidget for MonthView {
    type State = Context;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let header = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
        let index = state.displayed;

        let offset = index.first_weekday_offset() as usize;
        let selected_day = if index.contains(state.selected) {
            Some(state.selected.day())
        } else {
            None
        };

        let cells: Vec<Cell> = std::iter::repeat_with(|| Cell::from(""))
            .take(offset)
            .chain((1..=index.days()).map(|day| {
                DayCell::new(day as u8)
                    .style(self.theme.severity_style(state.severity_of(day)))
                    .focus_style(self.theme.focus_style)
                    .today_style(self.theme.today_style)
                    .today_symbol_opt(self.theme.today_symbol)
                    .selected(selected_day == Some(day))
                    .today(state.is_today(day))
                    .into()
            }))
            .collect();

        let rows: Vec<Row> = cells
            .into_iter()
            .chunks(Self::COLUMNS as usize)
            .into_iter()
            .map(|chunk| Row::new(chunk.collect::<Vec<_>>()))
            .collect();

        Block::default()
            .borders(Borders::NONE)
            .title(Span::styled(index.to_string(), self.theme.header_style))
            .render(area, buf);

        let widths = [Constraint::Length(4); Self::COLUMNS as usize];
        Widget::render(
            Table::new(rows)
                .header(Row::new(header.to_vec()).style(self.theme.weekday_style))
                .column_spacing(1)
                .widths(&widths),
            Rect::new(
                area.x,
                area.y + Self::LABEL_ROWS,
                area.width,
                area.height.saturating_sub(Self::LABEL_ROWS),
            ),
            buf,
        );

        // Legend underneath the grid, when there is room for it.
        if area.height > Self::grid_height() {
            let legend: Vec<Span> = [
                Severity::Healthy,
                Severity::Reminder,
                Severity::Warning,
                Severity::Critical,
            ]
            .iter()
            .flat_map(|severity| {
                vec![
                    Span::styled("● ", self.theme.severity_style(*severity)),
                    Span::styled(
                        format!("{}  ", severity.label()),
                        self.theme.placeholder_style,
                    ),
                ]
            })
            .collect();

            Paragraph::new(Spans::from(legend)).render(
                Rect::new(area.x, area.y + Self::grid_height(), area.width, 1),
                buf,
            );
        }
    }
}
