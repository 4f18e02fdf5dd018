use std::error::Error;

use termion::event::Key;
use tui::backend::Backend;
use tui::layout::{Constraint, Direction, Layout};
use tui::widgets::Paragraph;
use tui::{Frame, Terminal};

use crate::agenda::Agenda;
use crate::cmds::{Cmd, CmdError, CmdResult};
use crate::config::Config;
use crate::context::{Context, Mode};
use crate::events::{Dispatcher, Event};
use crate::ui::{AgendaListView, FilterView, InsertView, MonthView};

pub fn draw<B: Backend>(f: &mut Frame<B>, app: &mut App) {
    let bottom_height = match app.context.mode {
        Mode::Insert => 8,
        Mode::Normal => 1,
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(bottom_height),
            ]
            .as_ref(),
        )
        .split(f.size());

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(30)].as_ref())
        .split(layout[1]);

    f.render_stateful_widget(FilterView::default(), layout[0], &mut app.context);
    f.render_stateful_widget(MonthView::default(), main[0], &mut app.context);
    f.render_stateful_widget(AgendaListView::default(), main[1], &mut app.context);

    match app.context.mode {
        Mode::Insert => {
            f.render_stateful_widget(InsertView::default(), layout[2], &mut app.context)
        }
        Mode::Normal => {
            let status = app.context.last_error_message.clone().unwrap_or_else(|| {
                "h/l day  j/k week  H/L month  t today  f filter  a add  q quit".to_owned()
            });
            f.render_widget(Paragraph::new(status), layout[2]);
        }
    }
}

pub struct App<'a> {
    quit: bool,
    config: &'a Config,
    context: Context,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, agenda: Agenda) -> App<'a> {
        App {
            quit: false,
            config,
            context: Context::new(agenda),
        }
    }

    pub fn handle(&mut self, event: Event) -> CmdResult {
        match event {
            Event::Update => {
                self.context.update();
                Ok(Cmd::Noop)
            }
            Event::Input(key) => match self.context.mode {
                Mode::Normal => self.handle_normal(key),
                Mode::Insert => self.handle_insert(key),
            },
        }
    }

    fn handle_normal(&mut self, key: Key) -> CmdResult {
        let cmd = *self
            .config
            .key_map
            .get(&key)
            .ok_or_else(|| CmdError::new(format!("no binding for key '{:?}'", key)))?;

        self.context.last_error_message = None;

        match cmd {
            Cmd::NextDay => self.context.move_selection(1),
            Cmd::PrevDay => self.context.move_selection(-1),
            Cmd::NextWeek => self.context.move_selection(7),
            Cmd::PrevWeek => self.context.move_selection(-7),
            Cmd::NextMonth => self.context.shift_month(1),
            Cmd::PrevMonth => self.context.shift_month(-1),
            Cmd::SelectToday => self.context.select_today(),
            Cmd::NextFilter => self.context.next_filter(),
            Cmd::PrevFilter => self.context.prev_filter(),
            Cmd::NextItem => self.context.scroll_items(true),
            Cmd::PrevItem => self.context.scroll_items(false),
            Cmd::EnterInsert => self.context.enter_insert(),
            Cmd::Exit => self.quit = true,
            Cmd::Noop => {}
        }

        Ok(cmd)
    }

    fn handle_insert(&mut self, key: Key) -> CmdResult {
        match key {
            Key::Esc => self.context.cancel_insert(),
            Key::Char('\n') => {
                // A no-op while the draft is incomplete; the form stays open.
                self.context.submit_draft();
            }
            Key::Char('\t') | Key::Down => self.context.draft.field = self.context.draft.field.next(),
            Key::BackTab | Key::Up => self.context.draft.field = self.context.draft.field.prev(),
            Key::Left | Key::Right => {
                let roster = self.context.agenda().persons().to_vec();
                self.context.draft.cycle_value(key == Key::Right, &roster);
            }
            Key::Backspace => self.context.draft.pop_char(),
            Key::Char(c) => self.context.draft.push_char(c),
            _ => {}
        }

        Ok(Cmd::Noop)
    }

    pub fn run<B: Backend>(
        &mut self,
        dispatcher: Dispatcher,
        mut terminal: Terminal<B>,
    ) -> Result<(), Box<dyn Error>> {
        while !self.quit {
            terminal.draw(|f| draw(f, self))?;

            match dispatcher.next() {
                Ok(event) => {
                    if let Err(e) = self.handle(event) {
                        log::debug!("{}", e);
                        self.context.last_error_message = Some(e.to_string());
                    }
                }
                Err(_) => break,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(config: &Config) -> App {
        App::new(config, Agenda::sample(crate::calendar::MonthIndex::from(
            chrono::Local::now().date_naive(),
        )))
    }

    #[test]
    fn quit_key_sets_quit_flag() {
        let config = Config::default();
        let mut app = app(&config);
        app.handle(Event::Input(Key::Char('q'))).unwrap();
        assert!(app.quit);
    }

    #[test]
    fn unmapped_key_reports_an_error() {
        let config = Config::default();
        let mut app = app(&config);
        assert!(app.handle(Event::Input(Key::Char('?'))).is_err());
    }

    #[test]
    fn month_keys_round_trip_the_displayed_month() {
        let config = Config::default();
        let mut app = app(&config);
        let original = app.context.displayed;

        app.handle(Event::Input(Key::Char('L'))).unwrap();
        assert_eq!(app.context.displayed, original.shift(1));
        app.handle(Event::Input(Key::Char('H'))).unwrap();
        assert_eq!(app.context.displayed, original);
    }

    #[test]
    fn insert_flow_adds_an_item_for_the_selected_date() {
        let config = Config::default();
        let mut app = app(&config);
        let selected = app.context.selected;

        // Filtering first makes the filtered person the default owner.
        app.handle(Event::Input(Key::Char('f'))).unwrap();
        app.handle(Event::Input(Key::Char('a'))).unwrap();
        assert_eq!(app.context.mode, Mode::Insert);

        for c in "Walk".chars() {
            app.handle(Event::Input(Key::Char(c))).unwrap();
        }
        app.handle(Event::Input(Key::Char('\n'))).unwrap();

        assert_eq!(app.context.mode, Mode::Normal);
        let items = app.context.current_items();
        let added = items.last().unwrap();
        assert_eq!(added.title, "Walk");
        assert_eq!(added.owner, app.context.filter.unwrap());
        assert_eq!(app.context.selected, selected);
    }

    #[test]
    fn incomplete_draft_keeps_the_form_open() {
        let config = Config::default();
        let mut app = app(&config);

        app.handle(Event::Input(Key::Char('a'))).unwrap();
        app.handle(Event::Input(Key::Char('\n'))).unwrap();
        assert_eq!(app.context.mode, Mode::Insert);

        app.handle(Event::Input(Key::Esc)).unwrap();
        assert_eq!(app.context.mode, Mode::Normal);
    }
}
