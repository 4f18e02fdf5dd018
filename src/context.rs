use chrono::{DateTime, Local, NaiveDate};

use crate::agenda::{Agenda, AgendaItem};
use crate::calendar::MonthIndex;
use crate::family::{Person, PersonId, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Time,
    Severity,
    Owner,
}

impl DraftField {
    pub fn next(self) -> Self {
        match self {
            DraftField::Title => DraftField::Time,
            DraftField::Time => DraftField::Severity,
            DraftField::Severity => DraftField::Owner,
            DraftField::Owner => DraftField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DraftField::Title => DraftField::Owner,
            DraftField::Time => DraftField::Title,
            DraftField::Severity => DraftField::Time,
            DraftField::Owner => DraftField::Severity,
        }
    }
}

/// Input state of the add-agenda form.
#[derive(Debug, Clone)]
pub struct AgendaDraft {
    pub title: String,
    pub time: String,
    pub severity: Severity,
    pub owner: Option<PersonId>,
    pub field: DraftField,
}

impl Default for AgendaDraft {
    fn default() -> Self {
        AgendaDraft {
            title: String::new(),
            time: "08:00 AM".to_owned(),
            severity: Severity::Reminder,
            owner: None,
            field: DraftField::Title,
        }
    }
}

impl AgendaDraft {
    /// The one guarded precondition: a non-empty title and a chosen owner.
    /// While this is false the submit row renders disabled and submission
    /// is a no-op.
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty() && self.owner.is_some()
    }

    pub fn push_char(&mut self, c: char) {
        match self.field {
            DraftField::Title => self.title.push(c),
            DraftField::Time => self.time.push(c),
            _ => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.field {
            DraftField::Title => {
                self.title.pop();
            }
            DraftField::Time => {
                self.time.pop();
            }
            _ => {}
        }
    }

    /// Cycles the value of a choice field. `roster` drives the owner
    /// rotation; text fields ignore this.
    pub fn cycle_value(&mut self, forward: bool, roster: &[Person]) {
        match self.field {
            DraftField::Severity => {
                self.severity = if forward {
                    self.severity.next()
                } else {
                    self.severity.prev()
                };
            }
            DraftField::Owner => {
                let pos = self
                    .owner
                    .and_then(|id| roster.iter().position(|p| p.id == id));
                self.owner = match (pos, forward) {
                    (None, true) => roster.first().map(|p| p.id),
                    (None, false) => roster.last().map(|p| p.id),
                    (Some(i), true) if i + 1 < roster.len() => Some(roster[i + 1].id),
                    (Some(_), true) => None,
                    (Some(0), false) => None,
                    (Some(i), false) => Some(roster[i - 1].id),
                };
            }
            _ => {}
        }
    }
}

/// All mutable view state, held apart from the widgets so every operation
/// below is testable without a terminal.
pub struct Context {
    agenda: Agenda,
    pub displayed: MonthIndex,
    pub selected: NaiveDate,
    pub filter: Option<PersonId>,
    pub mode: Mode,
    pub list_index: usize,
    pub draft: AgendaDraft,
    pub last_error_message: Option<String>,
    now: DateTime<Local>,
}

impl Context {
    pub fn new(agenda: Agenda) -> Self {
        let now = Local::now();
        Context {
            agenda,
            displayed: MonthIndex::from(now.date_naive()),
            selected: now.date_naive(),
            filter: None,
            mode: Mode::Normal,
            list_index: 0,
            draft: AgendaDraft::default(),
            last_error_message: None,
            now,
        }
    }

    pub fn agenda(&self) -> &Agenda {
        &self.agenda
    }

    pub fn now(&self) -> &DateTime<Local> {
        &self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn update(&mut self) {
        self.now = Local::now();
    }

    /// Moves the displayed month page; the selected date stays put.
    pub fn shift_month(&mut self, delta: i32) {
        self.displayed = self.displayed.shift(delta);
    }

    /// Reanchors the selection to `day` of the displayed month. Only
    /// rendered day numbers reach this, anything else is ignored.
    pub fn select_day(&mut self, day: u32) {
        if let Some(date) = self.displayed.date(day) {
            self.selected = date;
            self.list_index = 0;
        }
    }

    pub fn select_today(&mut self) {
        self.selected = self.today();
        self.displayed = MonthIndex::from(self.selected);
        self.list_index = 0;
    }

    /// Moves the selection by whole days, flipping the displayed month
    /// along when the selection crosses a month boundary.
    pub fn move_selection(&mut self, days: i64) {
        self.selected += chrono::Duration::days(days);
        self.displayed = MonthIndex::from(self.selected);
        self.list_index = 0;
    }

    pub fn set_filter(&mut self, filter: Option<PersonId>) {
        self.filter = filter;
        self.list_index = 0;
    }

    /// Cycles All -> first person -> ... -> last person -> All.
    pub fn next_filter(&mut self) {
        let roster = self.agenda.persons();
        let next = match self.filter.and_then(|id| roster.iter().position(|p| p.id == id)) {
            None => roster.first().map(|p| p.id),
            Some(i) if i + 1 < roster.len() => Some(roster[i + 1].id),
            Some(_) => None,
        };
        self.set_filter(next);
    }

    pub fn prev_filter(&mut self) {
        let roster = self.agenda.persons();
        let prev = match self.filter.and_then(|id| roster.iter().position(|p| p.id == id)) {
            None => roster.last().map(|p| p.id),
            Some(0) => None,
            Some(i) => Some(roster[i - 1].id),
        };
        self.set_filter(prev);
    }

    pub fn is_today(&self, day: u32) -> bool {
        self.displayed.date(day) == Some(self.today())
    }

    /// Agenda items of the selected date under the active filter.
    pub fn current_items(&self) -> Vec<&AgendaItem> {
        self.agenda.items_of_day(self.selected, self.filter)
    }

    /// Aggregated severity for `day` of the displayed month.
    pub fn severity_of(&self, day: u32) -> Severity {
        self.displayed
            .date(day)
            .map(|date| self.agenda.severity_of_day(date, self.filter))
            .unwrap_or(Severity::None)
    }

    pub fn scroll_items(&mut self, forward: bool) {
        let len = self.current_items().len();
        if forward {
            if self.list_index + 1 < len {
                self.list_index += 1;
            }
        } else {
            self.list_index = self.list_index.saturating_sub(1);
        }
    }

    pub fn enter_insert(&mut self) {
        self.draft = AgendaDraft::default();
        // A person filter doubles as the default owner.
        self.draft.owner = self.filter;
        self.mode = Mode::Insert;
    }

    pub fn cancel_insert(&mut self) {
        self.draft = AgendaDraft::default();
        self.mode = Mode::Normal;
    }

    /// Appends the drafted item to the selected date. Invalid drafts are
    /// a no-op so the form simply stays open.
    pub fn submit_draft(&mut self) -> bool {
        if !self.draft.can_submit() {
            return false;
        }
        let owner = self.draft.owner.unwrap();
        let (title, time, severity) = (
            self.draft.title.clone(),
            self.draft.time.clone(),
            self.draft.severity,
        );
        match self
            .agenda
            .add_item(owner, &title, &time, severity, self.selected)
        {
            Ok(_) => {
                self.draft = AgendaDraft::default();
                self.mode = Mode::Normal;
                true
            }
            Err(e) => {
                self.last_error_message = Some(e.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MonthIndex;
    use chrono::Month;

    fn context() -> Context {
        let month = MonthIndex::new(Month::September, 2026);
        let mut ctx = Context::new(Agenda::sample(month));
        ctx.displayed = month;
        ctx.selected = month.date(1).unwrap();
        ctx
    }

    #[test]
    fn month_shift_round_trips() {
        let mut ctx = context();
        let original = ctx.displayed;
        ctx.shift_month(1);
        ctx.shift_month(-1);
        assert_eq!(ctx.displayed, original);
    }

    #[test]
    fn month_shift_keeps_selection() {
        let mut ctx = context();
        let selected = ctx.selected;
        ctx.shift_month(5);
        assert_eq!(ctx.selected, selected);
        assert_eq!(ctx.displayed, MonthIndex::new(Month::February, 2027));
    }

    #[test]
    fn select_day_lands_in_displayed_month() {
        let mut ctx = context();
        ctx.shift_month(1);
        ctx.select_day(12);
        assert_eq!(
            ctx.selected,
            NaiveDate::from_ymd_opt(2026, 10, 12).unwrap()
        );
    }

    #[test]
    fn filter_cycle_visits_everyone_and_wraps() {
        let mut ctx = context();
        let roster_len = ctx.agenda().persons().len();

        assert_eq!(ctx.filter, None);
        for i in 0..roster_len {
            ctx.next_filter();
            assert_eq!(ctx.filter, Some(ctx.agenda().persons()[i].id));
        }
        ctx.next_filter();
        assert_eq!(ctx.filter, None);

        ctx.prev_filter();
        assert_eq!(
            ctx.filter,
            Some(ctx.agenda().persons()[roster_len - 1].id)
        );
    }

    #[test]
    fn invalid_draft_does_not_submit() {
        let mut ctx = context();
        ctx.enter_insert();
        assert!(!ctx.draft.can_submit());

        let before = ctx.current_items().len();
        assert!(!ctx.submit_draft());
        assert_eq!(ctx.current_items().len(), before);
        assert_eq!(ctx.mode, Mode::Insert);
    }

    #[test]
    fn valid_draft_submits_and_resets() {
        let mut ctx = context();
        let grandma = ctx.agenda().persons()[0].id;
        ctx.set_filter(Some(grandma));
        ctx.select_day(7);
        ctx.enter_insert();
        ctx.draft.title = "Checkup".to_owned();

        let before = ctx.current_items().len();
        assert!(ctx.submit_draft());

        let items = ctx.current_items();
        assert_eq!(items.len(), before + 1);
        assert_eq!(items.last().unwrap().title, "Checkup");
        assert_eq!(ctx.mode, Mode::Normal);
        assert!(ctx.draft.title.is_empty());
    }

    #[test]
    fn owner_cycle_includes_unset() {
        let mut ctx = context();
        ctx.enter_insert();
        ctx.draft.field = DraftField::Owner;

        let roster: Vec<Person> = ctx.agenda().persons().to_vec();
        assert_eq!(ctx.draft.owner, None);
        ctx.draft.cycle_value(true, &roster);
        assert_eq!(ctx.draft.owner, Some(roster[0].id));
        ctx.draft.cycle_value(false, &roster);
        assert_eq!(ctx.draft.owner, None);
    }

    #[test]
    fn item_scroll_clamps_to_list() {
        let mut ctx = context();
        ctx.select_day(2); // two items across the family
        assert_eq!(ctx.current_items().len(), 2);

        ctx.scroll_items(true);
        ctx.scroll_items(true);
        assert_eq!(ctx.list_index, 1);
        ctx.scroll_items(false);
        ctx.scroll_items(false);
        assert_eq!(ctx.list_index, 0);
    }
}
