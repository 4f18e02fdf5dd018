use once_cell::sync::Lazy;
use std::fmt;
use uuid::Uuid;

/// Health severity of a person or agenda item.
///
/// The variant order is the aggregation order: a day showing multiple
/// severities resolves to the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    None,
    Healthy,
    Reminder,
    Warning,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::None,
        Severity::Healthy,
        Severity::Reminder,
        Severity::Warning,
        Severity::Critical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Healthy => "Healthy",
            Severity::Reminder => "Reminder",
            Severity::Warning => "Warning",
            Severity::Critical => "Critical",
        }
    }

    /// Palette color of this severity, `None` for the neutral indicator.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            Severity::None => None,
            Severity::Healthy => Some((0xa6, 0xd1, 0x7d)),
            Severity::Reminder => Some((0x91, 0xbe, 0xf8)),
            Severity::Warning => Some((0xfd, 0xcb, 0x46)),
            Severity::Critical => Some((0xfa, 0x62, 0x55)),
        }
    }

    pub fn next(&self) -> Severity {
        match self {
            Severity::None => Severity::Healthy,
            Severity::Healthy => Severity::Reminder,
            Severity::Reminder => Severity::Warning,
            Severity::Warning => Severity::Critical,
            Severity::Critical => Severity::None,
        }
    }

    pub fn prev(&self) -> Severity {
        match self {
            Severity::None => Severity::Critical,
            Severity::Healthy => Severity::None,
            Severity::Reminder => Severity::Healthy,
            Severity::Warning => Severity::Reminder,
            Severity::Critical => Severity::Warning,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::None
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable identity of a family member. Stores key by this rather than by
/// display name, so the name is purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonId(Uuid);

impl PersonId {
    pub fn new() -> Self {
        PersonId(Uuid::new_v4())
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A monitored family member. Created once at startup, immutable after.
#[derive(Debug, Clone)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub role: String,
    pub avatar_url: Option<String>,
    pub heart_rate_text: String,
    pub baseline: Severity,
}

impl Person {
    pub fn new(name: &str, role: &str, heart_rate_text: &str, baseline: Severity) -> Self {
        Person {
            id: PersonId::new(),
            name: name.to_owned(),
            role: role.to_owned(),
            avatar_url: None,
            heart_rate_text: heart_rate_text.to_owned(),
            baseline,
        }
    }
}

/// Demo family used until a real data source exists. Ids are generated once
/// per process so different stores seeded from this roster agree on them.
pub static SAMPLE_ROSTER: Lazy<Vec<Person>> = Lazy::new(|| {
    vec![
        Person::new("Grandma Siti", "Grandmother", "76 bpm", Severity::Healthy),
        Person::new("Grandpa Budi", "Grandfather", "82 bpm", Severity::Warning),
        Person::new("Uncle Rudi", "Uncle", "95 bpm", Severity::Critical),
        Person::new("Aunt Lina", "Aunt", "72 bpm", Severity::Reminder),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_order_matches_priority() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Reminder);
        assert!(Severity::Reminder > Severity::Healthy);
        assert!(Severity::Healthy > Severity::None);
    }

    #[test]
    fn severity_cycle_is_closed() {
        for severity in Severity::ALL {
            assert_eq!(severity.next().prev(), severity);
        }
    }
}
