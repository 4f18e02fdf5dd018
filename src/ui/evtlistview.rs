use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Modifier, Style};
use tui::text::{Span, Spans, Text};
use tui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget};

use crate::context::Context;
use crate::ui::Theme;

/// The items of the selected date under the active filter, one block of
/// owner / title / time per item, or a placeholder when the day is blank.
pub struct AgendaListView {
    theme: Theme,
}

impl AgendaListView {
    pub fn new(theme: Theme) -> Self {
        AgendaListView { theme }
    }
}

impl Default for AgendaListView {
    fn default() -> Self {
        AgendaListView::new(Theme::default())
    }
}

impl StatefulWidget for AgendaListView {
    type State = Context;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let title = format!("Agenda - {}", state.selected.format("%-d %B %Y"));
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = state
            .current_items()
            .iter()
            .map(|item| {
                let owner = state
                    .agenda()
                    .person(item.owner)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "Unknown".to_owned());

                ListItem::new(Text::from(vec![
                    Spans::from(Span::styled(owner, self.theme.owner_style)),
                    Spans::from(Span::styled(
                        item.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Spans::from(vec![
                        Span::styled("● ", self.theme.severity_style(item.severity)),
                        Span::styled(item.time.clone(), self.theme.dim_style),
                    ]),
                    Spans::from(""),
                ]))
            })
            .collect();

        if items.is_empty() {
            Paragraph::new(Text::styled(
                "No agenda for this date.",
                self.theme.placeholder_style,
            ))
            .render(inner, buf);
        } else {
            let mut list_state = ListState::default();
            list_state.select(Some(state.list_index));

            StatefulWidget::render(
                List::new(items).highlight_symbol("> "),
                inner,
                buf,
                &mut list_state,
            );
        }
    }
}
