pub mod calview;
pub mod evtlistview;
pub mod filterview;
pub mod insert;
pub mod theme;

pub use calview::MonthView;
pub use evtlistview::AgendaListView;
pub use filterview::FilterView;
pub use insert::InsertView;
pub use theme::Theme;
