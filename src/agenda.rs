use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::error;
use std::fmt;
use uuid::Uuid;

use crate::calendar::MonthIndex;
use crate::family::{Person, PersonId, Severity, SAMPLE_ROSTER};

/// A scheduled health activity. Items are append-only: there is no update
/// or delete path, the store lives for the session.
#[derive(Debug, Clone)]
pub struct AgendaItem {
    pub id: Uuid,
    pub owner: PersonId,
    pub title: String,
    pub time: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgendaError {
    EmptyTitle,
    UnknownOwner(PersonId),
}

impl fmt::Display for AgendaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgendaError::EmptyTitle => write!(f, "agenda title must not be empty"),
            AgendaError::UnknownOwner(id) => write!(f, "no person with id '{}'", id),
        }
    }
}

impl error::Error for AgendaError {}

type DayMap<T> = BTreeMap<NaiveDate, T>;

/// The family agenda: a fixed roster, per-day agenda items and per-day
/// baseline health entries, both keyed by person identity and full date.
pub struct Agenda {
    persons: Vec<Person>,
    items: HashMap<PersonId, DayMap<Vec<AgendaItem>>>,
    health: HashMap<PersonId, DayMap<Severity>>,
}

impl Agenda {
    pub fn new(persons: Vec<Person>) -> Self {
        Agenda {
            persons,
            items: HashMap::new(),
            health: HashMap::new(),
        }
    }

    /// The demo data set, seeded into `month`. Day numbers that do not
    /// exist in that month are skipped.
    pub fn sample(month: MonthIndex) -> Self {
        let mut agenda = Agenda::new(SAMPLE_ROSTER.clone());

        for (name, entries) in SAMPLE_HEALTH {
            let id = agenda.id_by_name(name).unwrap();
            for (day, severity) in entries.iter() {
                if let Some(date) = month.date(*day) {
                    agenda.record_health(id, date, *severity);
                }
            }
        }

        for (name, entries) in SAMPLE_ITEMS {
            let id = agenda.id_by_name(name).unwrap();
            for (day, title, time, severity) in entries.iter() {
                if let Some(date) = month.date(*day) {
                    agenda
                        .add_item(id, title, time, *severity, date)
                        .expect("sample data is well-formed");
                }
            }
        }

        agenda
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.iter().find(|p| p.id == id)
    }

    fn id_by_name(&self, name: &str) -> Option<PersonId> {
        self.persons.iter().find(|p| p.name == name).map(|p| p.id)
    }

    pub fn record_health(&mut self, person: PersonId, date: NaiveDate, severity: Severity) {
        self.health
            .entry(person)
            .or_default()
            .insert(date, severity);
    }

    /// Appends a new item for `owner` on `date`. Rejects an empty title or
    /// an owner outside the roster without touching the store.
    pub fn add_item(
        &mut self,
        owner: PersonId,
        title: &str,
        time: &str,
        severity: Severity,
        date: NaiveDate,
    ) -> Result<&AgendaItem, AgendaError> {
        if title.trim().is_empty() {
            return Err(AgendaError::EmptyTitle);
        }
        if self.person(owner).is_none() {
            return Err(AgendaError::UnknownOwner(owner));
        }

        let item = AgendaItem {
            id: Uuid::new_v4(),
            owner,
            title: title.trim().to_owned(),
            time: time.to_owned(),
            severity,
        };

        log::debug!("adding agenda item '{}' on {}", item.title, date);

        let day = self
            .items
            .entry(owner)
            .or_default()
            .entry(date)
            .or_default();
        day.push(item);
        Ok(day.last().unwrap())
    }

    fn persons_matching<'a>(
        &'a self,
        filter: Option<PersonId>,
    ) -> impl Iterator<Item = &'a Person> + 'a {
        self.persons
            .iter()
            .filter(move |p| filter.map_or(true, |id| p.id == id))
    }

    /// All items of `date`, restricted by `filter`. Per-person insertion
    /// order is preserved; unfiltered output concatenates persons in
    /// roster order.
    pub fn items_of_day(&self, date: NaiveDate, filter: Option<PersonId>) -> Vec<&AgendaItem> {
        self.persons_matching(filter)
            .filter_map(|p| self.items.get(&p.id).and_then(|days| days.get(&date)))
            .flatten()
            .collect()
    }

    /// Worst severity recorded for `date` over the health entries and the
    /// agenda items of every person passing `filter`. `Severity::None`
    /// when the day is blank.
    pub fn severity_of_day(&self, date: NaiveDate, filter: Option<PersonId>) -> Severity {
        let mut worst = Severity::None;
        for person in self.persons_matching(filter) {
            if let Some(severity) = self.health.get(&person.id).and_then(|days| days.get(&date)) {
                worst = worst.max(*severity);
            }
            if let Some(items) = self.items.get(&person.id).and_then(|days| days.get(&date)) {
                worst = items.iter().fold(worst, |acc, item| acc.max(item.severity));
            }
        }
        worst
    }
}

const SAMPLE_HEALTH: &[(&str, &[(u32, Severity)])] = &[
    (
        "Grandma Siti",
        &[
            (1, Severity::Healthy),
            (2, Severity::Reminder),
            (5, Severity::Warning),
            (10, Severity::Critical),
            (15, Severity::Healthy),
        ],
    ),
    (
        "Grandpa Budi",
        &[
            (3, Severity::Healthy),
            (6, Severity::Warning),
            (9, Severity::Reminder),
            (13, Severity::Critical),
        ],
    ),
    (
        "Uncle Rudi",
        &[
            (4, Severity::Critical),
            (8, Severity::Reminder),
            (11, Severity::Warning),
            (20, Severity::Healthy),
        ],
    ),
];

const SAMPLE_ITEMS: &[(&str, &[(u32, &str, &str, Severity)])] = &[
    (
        "Grandma Siti",
        &[
            (1, "Check blood pressure", "08:00 AM", Severity::Healthy),
            (2, "Take regular medication", "10:00 AM", Severity::Reminder),
            (5, "Doctor's appointment", "09:00 AM", Severity::Warning),
            (10, "Lab test", "01:00 PM", Severity::Critical),
        ],
    ),
    (
        "Grandpa Budi",
        &[
            (3, "Leg therapy", "09:00 AM", Severity::Warning),
            (9, "Take vitamins", "07:30 AM", Severity::Reminder),
        ],
    ),
    (
        "Uncle Rudi",
        &[
            (4, "Doctor consultation", "02:00 PM", Severity::Critical),
            (8, "Light exercise", "07:00 AM", Severity::Reminder),
        ],
    ),
    (
        "Aunt Lina",
        &[
            (2, "Morning yoga", "06:30 AM", Severity::Healthy),
            (21, "Medical check-up", "10:00 AM", Severity::Critical),
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    fn month() -> MonthIndex {
        MonthIndex::new(Month::September, 2026)
    }

    fn date(day: u32) -> NaiveDate {
        month().date(day).unwrap()
    }

    fn id_of(agenda: &Agenda, name: &str) -> PersonId {
        agenda.id_by_name(name).unwrap()
    }

    #[test]
    fn blank_day_aggregates_to_neutral() {
        let agenda = Agenda::sample(month());
        let grandma = id_of(&agenda, "Grandma Siti");

        assert_eq!(agenda.severity_of_day(date(27), None), Severity::None);
        assert_eq!(
            agenda.severity_of_day(date(27), Some(grandma)),
            Severity::None
        );
        assert!(agenda.items_of_day(date(27), None).is_empty());
    }

    #[test]
    fn critical_item_dominates_any_day() {
        let mut agenda = Agenda::sample(month());
        let grandma = id_of(&agenda, "Grandma Siti");

        // Day 1 starts out Healthy across the board.
        assert_eq!(agenda.severity_of_day(date(1), None), Severity::Healthy);

        agenda
            .add_item(grandma, "Emergency visit", "11:00 AM", Severity::Critical, date(1))
            .unwrap();

        assert_eq!(agenda.severity_of_day(date(1), None), Severity::Critical);
        assert_eq!(
            agenda.severity_of_day(date(1), Some(grandma)),
            Severity::Critical
        );
    }

    #[test]
    fn warning_outranks_reminder() {
        let mut agenda = Agenda::new(vec![
            Person::new("A", "Aunt", "70 bpm", Severity::Healthy),
            Person::new("B", "Uncle", "80 bpm", Severity::Healthy),
        ]);
        let a = id_of(&agenda, "A");
        let b = id_of(&agenda, "B");
        let day = NaiveDate::from_ymd_opt(2026, 9, 12).unwrap();

        agenda.record_health(a, day, Severity::Warning);
        agenda.record_health(b, day, Severity::Reminder);

        assert_eq!(agenda.severity_of_day(day, None), Severity::Warning);
        assert_eq!(agenda.severity_of_day(day, Some(b)), Severity::Reminder);
    }

    #[test]
    fn empty_title_leaves_store_untouched() {
        let mut agenda = Agenda::sample(month());
        let grandma = id_of(&agenda, "Grandma Siti");
        let before = agenda.items_of_day(date(5), Some(grandma)).len();

        let result = agenda.add_item(grandma, "   ", "09:00 AM", Severity::Healthy, date(5));

        assert_eq!(result.unwrap_err(), AgendaError::EmptyTitle);
        assert_eq!(agenda.items_of_day(date(5), Some(grandma)).len(), before);
    }

    #[test]
    fn unknown_owner_is_rejected() {
        let mut agenda = Agenda::sample(month());
        let stranger = PersonId::new();

        let result = agenda.add_item(stranger, "Checkup", "09:00 AM", Severity::Healthy, date(5));

        assert_eq!(result.unwrap_err(), AgendaError::UnknownOwner(stranger));
        assert!(agenda.items_of_day(date(5), Some(stranger)).is_empty());
    }

    #[test]
    fn new_item_appends_after_existing_ones() {
        let mut agenda = Agenda::sample(month());
        let grandma = id_of(&agenda, "Grandma Siti");

        // Day 5 already holds the doctor's appointment.
        agenda
            .add_item(grandma, "Checkup", "09:00 AM", Severity::Critical, date(5))
            .unwrap();

        let items = agenda.items_of_day(date(5), Some(grandma));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Doctor's appointment");
        let added = items[1];
        assert_eq!(added.title, "Checkup");
        assert_eq!(added.time, "09:00 AM");
        assert_eq!(added.severity, Severity::Critical);
        assert_eq!(added.owner, grandma);
    }

    #[test]
    fn filter_never_leaks_other_owners() {
        let agenda = Agenda::sample(month());
        let grandma = id_of(&agenda, "Grandma Siti");

        // Day 2 has items for both Grandma Siti and Aunt Lina.
        assert_eq!(agenda.items_of_day(date(2), None).len(), 2);
        let filtered = agenda.items_of_day(date(2), Some(grandma));
        assert_eq!(filtered.len(), 1);
        assert!(filtered.iter().all(|item| item.owner == grandma));
    }

    #[test]
    fn unfiltered_listing_follows_roster_order() {
        let agenda = Agenda::sample(month());
        let items = agenda.items_of_day(date(2), None);

        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Take regular medication", "Morning yoga"]);
    }

    #[test]
    fn sample_seeds_the_whole_demo_set() {
        let agenda = Agenda::sample(month());

        let total: usize = (1..=month().days())
            .map(|d| agenda.items_of_day(date(d), None).len())
            .sum();
        assert_eq!(total, 10);
    }
}
