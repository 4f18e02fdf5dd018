use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::text::{Span, Spans};
use tui::widgets::{Paragraph, StatefulWidget, Widget};

use crate::context::Context;
use crate::ui::Theme;

/// Horizontal chip bar: `All` plus one chip per family member. The active
/// chip is highlighted.
pub struct FilterView {
    theme: Theme,
}

impl FilterView {
    pub fn new(theme: Theme) -> Self {
        FilterView { theme }
    }

    fn chip<'a>(&self, label: &str, active: bool) -> Span<'a> {
        let style = if active {
            self.theme.chip_active_style
        } else {
            self.theme.chip_style
        };
        Span::styled(format!(" {} ", label), style)
    }
}

impl Default for FilterView {
    fn default() -> Self {
        FilterView::new(Theme::default())
    }
}

impl StatefulWidget for FilterView {
    type State = Context;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let mut chips = vec![self.chip("All", state.filter.is_none()), Span::raw(" ")];

        for person in state.agenda().persons() {
            chips.push(self.chip(&person.name, state.filter == Some(person.id)));
            chips.push(Span::raw(" "));
        }

        Paragraph::new(Spans::from(chips)).render(area, buf);
    }
}
