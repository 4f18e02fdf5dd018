use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Style;
use tui::text::{Span, Spans, Text};
use tui::widgets::{Block, Borders, Paragraph, StatefulWidget, Widget};

use crate::context::{Context, DraftField};
use crate::ui::Theme;

/// The add-agenda form. The submit row renders dimmed while the draft is
/// incomplete; submitting then does nothing.
pub struct InsertView {
    theme: Theme,
}

impl InsertView {
    pub fn new(theme: Theme) -> Self {
        InsertView { theme }
    }

    fn field_line<'a>(&self, label: &str, value: Spans<'a>, focused: bool) -> Spans<'a> {
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            self.theme.owner_style
        } else {
            Style::default()
        };

        let mut spans = vec![
            Span::raw(marker.to_owned()),
            Span::styled(format!("{:<10}", label), label_style),
        ];
        spans.extend(value.0);
        Spans::from(spans)
    }
}

impl Default for InsertView {
    fn default() -> Self {
        InsertView::new(Theme::default())
    }
}

impl StatefulWidget for InsertView {
    type State = Context;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let draft = &state.draft;

        let owner_label = draft
            .owner
            .and_then(|id| state.agenda().person(id))
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "-".to_owned());

        let submit_style = if draft.can_submit() {
            self.theme.owner_style
        } else {
            self.theme.dim_style
        };

        let lines = Text::from(vec![
            self.field_line(
                "Title",
                Spans::from(Span::raw(draft.title.clone())),
                draft.field == DraftField::Title,
            ),
            self.field_line(
                "Time",
                Spans::from(Span::raw(draft.time.clone())),
                draft.field == DraftField::Time,
            ),
            self.field_line(
                "Severity",
                Spans::from(Span::styled(
                    draft.severity.label(),
                    self.theme.severity_style(draft.severity),
                )),
                draft.field == DraftField::Severity,
            ),
            self.field_line(
                "Owner",
                Spans::from(Span::raw(owner_label)),
                draft.field == DraftField::Owner,
            ),
            Spans::from(Span::styled(
                format!("  [ Add to {} ]", state.selected.format("%-d %B %Y")),
                submit_style,
            )),
            Spans::from(Span::styled(
                "  Tab: next field   Left/Right: change value   Enter: add   Esc: cancel",
                self.theme.dim_style,
            )),
        ]);

        Paragraph::new(lines)
            .block(Block::default().title("Add agenda").borders(Borders::ALL))
            .render(area, buf);
    }
}
