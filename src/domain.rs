use std::time::Duration;

use derive_setters::Setters;
use ratatui::crossterm::event::KeyEvent;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://randomuser.me/api/";
pub const DEFAULT_RESULT_COUNT: usize = 10;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_EVENT_POLL_MS: u64 = 100;

pub const HELP_TEXT: &str = "\
 Views
   1  stack table        Tab        next view
   2  material table     Shift-Tab  previous view
   3  data grid

 Navigation
   Up/k, Down/j    move row         Left/h, Right/l  move column
   g, G            first/last row   PgUp, PgDn       page

 Filtering and sorting
   /   edit the current column filter (Enter applies now, Esc discards)
   s   cycle sort on the current column (stack, material)
   S   add the column to the sort keys (stack)
   f   show or hide the filter row (grid)
   C   clear all filters (grid)

 Other
   Space  select row (material)
   ?      this help
   q, Ctrl-C  quit
";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// The three table views the dataset can be rendered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Stack,
    Material,
    Grid,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Stack, ViewKind::Material, ViewKind::Grid];

    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Stack => "Stack Table",
            ViewKind::Material => "Material Table",
            ViewKind::Grid => "Data Grid",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ViewKind::Stack => ViewKind::Material,
            ViewKind::Material => ViewKind::Grid,
            ViewKind::Grid => ViewKind::Stack,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            ViewKind::Stack => ViewKind::Grid,
            ViewKind::Material => ViewKind::Stack,
            ViewKind::Grid => ViewKind::Material,
        }
    }
}

/// Everything the controller can ask of the model. While a filter value is
/// being edited, keys are forwarded unmapped as [`Message::RawKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Quit,
    Exit,
    Help,
    SwitchView(ViewKind),
    NextView,
    PreviousView,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MovePageUp,
    MovePageDown,
    MoveBeginning,
    MoveEnd,
    ToggleSort,
    ExtendSort,
    EditFilter,
    ToggleFilterRow,
    ClearFilters,
    ToggleSelect,
    RawKey(KeyEvent),
}

#[derive(Debug, Clone, Setters)]
#[setters(prefix = "with_", into)]
pub struct AppConfig {
    /// Endpoint serving the person dataset.
    pub endpoint: String,
    /// How many records to request.
    pub result_count: usize,
    /// Quiet period before an edited filter value is applied.
    pub debounce: Duration,
    /// Timeout of one event poll in the input loop.
    pub event_poll: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            result_count: DEFAULT_RESULT_COUNT,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            event_poll: Duration::from_millis(DEFAULT_EVENT_POLL_MS),
        }
    }
}
