use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use ratatui::crossterm::event::KeyEvent;
use tracing::{debug, error, info, trace};

use crate::debounce::DebouncedInput;
use crate::domain::{AppConfig, AppError, Message, ViewKind};
use crate::inputter::{InputResult, Inputter};
use crate::people::{self, FetchOutcome, Person};
use crate::query::ColumnKey;
use crate::views::{GridView, MaterialView, StackView};

/// Rows a PageUp/PageDown jump covers.
const PAGE_STEP: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Loading,
    Ready,
    Quitting,
}

/// An in-flight filter edit. Raw keys feed the line editor; the edited text
/// reaches the owning view's filter set only through the debouncer, or
/// immediately on Enter.
#[derive(Debug)]
pub struct FilterEdit {
    pub view: ViewKind,
    pub column: ColumnKey,
    pub last_input: InputResult,
    inputter: Inputter,
    debounce: DebouncedInput<String>,
}

pub struct Model {
    pub status: Status,
    pub stack: StackView,
    pub material: MaterialView,
    pub grid: GridView,
    pub(crate) active: ViewKind,
    pub(crate) people: Vec<Person>,
    pub(crate) edit: Option<FilterEdit>,
    config: AppConfig,
    fetch: Option<Receiver<FetchOutcome>>,
    show_help: bool,
    status_message: String,
}

impl Model {
    /// Start with an empty record set and the fetch running in the
    /// background; the update ticks pick the outcome up once it lands.
    pub fn new(config: AppConfig) -> Self {
        let fetch = people::spawn_fetch(config.endpoint.clone(), config.result_count);
        let mut model = Self::with_people(config, Vec::new());
        model.status = Status::Loading;
        model.fetch = Some(fetch);
        model.status_message = "Loading people ...".to_string();
        model
    }

    /// Build over an already loaded record set. No fetch is started; this is
    /// the entry point for tests and offline callers.
    pub fn with_people(config: AppConfig, people: Vec<Person>) -> Self {
        let mut model = Self {
            status: Status::Ready,
            stack: StackView::default(),
            material: MaterialView::default(),
            grid: GridView::default(),
            active: ViewKind::Stack,
            people,
            edit: None,
            config,
            fetch: None,
            show_help: false,
            status_message: String::new(),
        };
        model.refresh_view(model.active);
        model
    }

    /// One pass of the update loop: time-based work first (fetch delivery,
    /// debounce deadline), then the message, routed by what currently holds
    /// the keyboard.
    pub fn update(&mut self, message: Option<Message>) -> Result<(), AppError> {
        self.poll_fetch();
        self.poll_debounce(Instant::now());
        if let Some(msg) = message {
            self.apply(msg);
        }
        Ok(())
    }

    pub fn quit(&mut self) {
        self.status = Status::Quitting;
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn active(&self) -> ViewKind {
        self.active
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn help_visible(&self) -> bool {
        self.show_help
    }

    /// While a filter value is edited, all key events reach the model raw.
    pub fn raw_keyevents(&self) -> bool {
        self.edit.is_some()
    }

    pub fn filter_edit(&self) -> Option<&FilterEdit> {
        self.edit.as_ref()
    }

    /// The records currently visible in the active view, in display order.
    pub fn visible(&self) -> Vec<&Person> {
        let rows = match self.active {
            ViewKind::Stack => &self.stack.rows,
            ViewKind::Material => &self.material.rows,
            ViewKind::Grid => &self.grid.rows,
        };
        rows.iter().map(|&idx| &self.people[idx]).collect()
    }

    // -------------------- Time-based work -------------------- //

    fn poll_fetch(&mut self) {
        let Some(rx) = &self.fetch else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(people)) => {
                self.fetch = None;
                self.status = Status::Ready;
                info!("Loaded {} people", people.len());
                self.people = people;
                self.refresh_view(self.active);
                self.set_status_message(format!("Loaded {} people", self.people.len()));
            }
            Ok(Err(e)) => {
                self.fetch = None;
                self.status = Status::Ready;
                error!("Loading people failed: {e}");
                self.set_status_message(format!("Request failed: {e}"));
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.fetch = None;
                self.status = Status::Ready;
                error!("Fetch worker hung up without a result");
                self.set_status_message("Request failed");
            }
        }
    }

    fn poll_debounce(&mut self, now: Instant) {
        let committed = match &mut self.edit {
            Some(edit) => edit
                .debounce
                .poll(now)
                .map(|value| (edit.view, edit.column, value)),
            None => None,
        };
        if let Some((view, column, value)) = committed {
            self.commit_filter(view, column, value);
        }
    }

    // -------------------- Message routing -------------------- //

    fn apply(&mut self, message: Message) {
        if self.edit.is_some() {
            match message {
                Message::Quit => self.quit(),
                Message::RawKey(key) => self.edit_key(key),
                // Leaving the view drops the session along with its pending
                // value.
                Message::SwitchView(kind) => self.switch_view(kind),
                Message::NextView => self.switch_view(self.active.next()),
                Message::PreviousView => self.switch_view(self.active.previous()),
                // The grid's clear-all acts like its toolbar button: it also
                // resets an edit in flight, which re-syncs the input.
                Message::ClearFilters => self.clear_filters(),
                _ => (),
            }
            return;
        }
        if self.show_help {
            match message {
                Message::Quit => self.quit(),
                Message::Help | Message::Exit => self.show_help = false,
                _ => (),
            }
            return;
        }
        match message {
            Message::Quit => self.quit(),
            Message::Exit => (),
            Message::Help => self.show_help = true,
            Message::SwitchView(kind) => self.switch_view(kind),
            Message::NextView => self.switch_view(self.active.next()),
            Message::PreviousView => self.switch_view(self.active.previous()),
            Message::MoveUp => self.move_up(1),
            Message::MoveDown => self.move_down(1),
            Message::MoveLeft => self.move_left(),
            Message::MoveRight => self.move_right(),
            Message::MovePageUp => self.move_up(PAGE_STEP),
            Message::MovePageDown => self.move_down(PAGE_STEP),
            Message::MoveBeginning => self.move_first(),
            Message::MoveEnd => self.move_last(),
            Message::ToggleSort => self.toggle_sort(),
            Message::ExtendSort => self.extend_sort(),
            Message::EditFilter => self.begin_filter_edit(),
            Message::ToggleFilterRow => self.toggle_filter_row(),
            Message::ClearFilters => self.clear_filters(),
            Message::ToggleSelect => self.toggle_select(),
            Message::RawKey(_) => (),
        }
    }

    // -------------------- View switching -------------------- //

    fn switch_view(&mut self, next: ViewKind) {
        if next == self.active {
            return;
        }
        // A pending, uncommitted filter edit dies with its view.
        self.edit = None;
        self.reset_view(self.active);
        self.active = next;
        self.refresh_view(next);
        trace!("Switched to {next:?}");
        self.set_status_message(format!("{} view", next.label()));
    }

    fn reset_view(&mut self, kind: ViewKind) {
        match kind {
            ViewKind::Stack => self.stack.reset(&self.people),
            ViewKind::Material => self.material.reset(&self.people),
            ViewKind::Grid => self.grid.reset(&self.people),
        }
    }

    fn refresh_view(&mut self, kind: ViewKind) {
        match kind {
            ViewKind::Stack => self.stack.refresh(&self.people),
            ViewKind::Material => self.material.refresh(&self.people),
            ViewKind::Grid => self.grid.refresh(&self.people),
        }
    }

    // -------------------- Navigation -------------------- //

    fn move_up(&mut self, step: usize) {
        match self.active {
            ViewKind::Stack => self.stack.cursor.up(step),
            ViewKind::Material => self.material.cursor.up(step),
            ViewKind::Grid => self.grid.cursor.up(step),
        }
    }

    fn move_down(&mut self, step: usize) {
        match self.active {
            ViewKind::Stack => self.stack.cursor.down(step, self.stack.rows.len()),
            ViewKind::Material => self.material.cursor.down(step, self.material.rows.len()),
            ViewKind::Grid => self.grid.cursor.down(step, self.grid.rows.len()),
        }
    }

    fn move_left(&mut self) {
        match self.active {
            ViewKind::Stack => self.stack.cursor.left(),
            ViewKind::Material => self.material.cursor.left(),
            ViewKind::Grid => self.grid.cursor.left(),
        }
    }

    fn move_right(&mut self) {
        match self.active {
            ViewKind::Stack => self.stack.cursor.right(self.stack.columns().len()),
            ViewKind::Material => self.material.cursor.right(self.material.columns().len()),
            ViewKind::Grid => self.grid.cursor.right(self.grid.columns().len()),
        }
    }

    fn move_first(&mut self) {
        match self.active {
            ViewKind::Stack => self.stack.cursor.first_row(),
            ViewKind::Material => self.material.cursor.first_row(),
            ViewKind::Grid => self.grid.cursor.first_row(),
        }
    }

    fn move_last(&mut self) {
        match self.active {
            ViewKind::Stack => self.stack.cursor.last_row(self.stack.rows.len()),
            ViewKind::Material => self.material.cursor.last_row(self.material.rows.len()),
            ViewKind::Grid => self.grid.cursor.last_row(self.grid.rows.len()),
        }
    }

    // -------------------- Sorting and selection -------------------- //

    fn toggle_sort(&mut self) {
        match self.active {
            ViewKind::Stack => {
                self.stack.toggle_sort(&self.people);
                self.report_sort();
            }
            ViewKind::Material => {
                self.material.toggle_sort(&self.people);
                self.report_sort();
            }
            ViewKind::Grid => self.set_status_message("The data grid does not sort"),
        }
    }

    fn extend_sort(&mut self) {
        match self.active {
            ViewKind::Stack => {
                self.stack.extend_sort(&self.people);
                self.report_sort();
            }
            _ => self.set_status_message("Multi-sort is a stack table feature"),
        }
    }

    fn report_sort(&mut self) {
        let text = {
            let sort = match self.active {
                ViewKind::Stack => &self.stack.sort,
                ViewKind::Material => &self.material.sort,
                ViewKind::Grid => return,
            };
            if sort.is_empty() {
                "Sort cleared".to_string()
            } else {
                let keys: Vec<String> = sort
                    .keys()
                    .iter()
                    .map(|(column, direction)| {
                        format!("{} {}", column.header(), direction.marker())
                    })
                    .collect();
                format!("Sorted by {}", keys.join(", "))
            }
        };
        self.set_status_message(text);
    }

    fn toggle_select(&mut self) {
        match self.active {
            ViewKind::Material => {
                self.material.toggle_select();
                let summary = self.material.selection_summary(self.people.len());
                self.set_status_message(summary);
            }
            _ => self.set_status_message("Row selection is a material table feature"),
        }
    }

    // -------------------- Filtering -------------------- //

    fn begin_filter_edit(&mut self) {
        let column = match self.active {
            ViewKind::Stack => self.stack.current_column(),
            ViewKind::Material => self.material.current_column(),
            ViewKind::Grid => {
                if !self.grid.filters.enabled {
                    self.set_status_message("Filter row is hidden (press f to show it)");
                    return;
                }
                self.grid.current_column()
            }
        };
        let committed = self.committed_filter(self.active, column).to_string();
        let mut inputter = Inputter::default();
        inputter.seed(&committed);
        let last_input = inputter.get();
        self.edit = Some(FilterEdit {
            view: self.active,
            column,
            last_input,
            inputter,
            debounce: DebouncedInput::new(committed, self.config.debounce),
        });
        trace!("Editing the {column:?} filter on {:?}", self.active);
    }

    fn committed_filter(&self, view: ViewKind, column: ColumnKey) -> &str {
        match view {
            ViewKind::Stack => self.stack.filters.get(column),
            ViewKind::Material => self.material.filters.get(column),
            ViewKind::Grid => self.grid.filters.get(column),
        }
    }

    fn edit_key(&mut self, key: KeyEvent) {
        let Some(edit) = &mut self.edit else {
            return;
        };
        let result = edit.inputter.read(key);
        edit.last_input = result.clone();
        if result.canceled {
            self.edit = None;
            self.set_status_message("Filter edit discarded");
            return;
        }
        if result.finished {
            let (view, column) = (edit.view, edit.column);
            self.edit = None;
            self.commit_filter(view, column, result.input);
            return;
        }
        // Unchanged text (cursor movement, rejected chords) must not restart
        // the quiet window.
        if *edit.debounce.value() != result.input {
            edit.debounce.edit(result.input, Instant::now());
        }
    }

    fn commit_filter(&mut self, view: ViewKind, column: ColumnKey, value: String) {
        debug!("Applying the {column:?} filter {value:?} on {view:?}");
        match view {
            ViewKind::Stack => self.stack.set_filter(column, value, &self.people),
            ViewKind::Material => self.material.set_filter(column, value, &self.people),
            ViewKind::Grid => self.grid.set_filter(column, value, &self.people),
        }
        let visible = match view {
            ViewKind::Stack => self.stack.rows.len(),
            ViewKind::Material => self.material.rows.len(),
            ViewKind::Grid => self.grid.rows.len(),
        };
        self.set_status_message(format!(
            "{} filter applied, {visible} of {} rows",
            column.header(),
            self.people.len()
        ));
    }

    fn toggle_filter_row(&mut self) {
        match self.active {
            ViewKind::Grid => {
                self.grid.toggle_filter_row();
                let shown = self.grid.filters.enabled;
                self.set_status_message(if shown {
                    "Filter row shown"
                } else {
                    "Filter row hidden"
                });
            }
            _ => self.set_status_message("Only the data grid hides its filter row"),
        }
    }

    fn clear_filters(&mut self) {
        match self.active {
            ViewKind::Grid => {
                self.grid.clear_filters(&self.people);
                // An edit in flight adopts the cleared value right away
                // instead of waiting out its quiet window.
                if let Some(edit) = &mut self.edit
                    && edit.view == ViewKind::Grid
                {
                    edit.debounce.sync(String::new());
                    edit.inputter.seed("");
                    edit.last_input = edit.inputter.get();
                }
                self.set_status_message("Filters cleared");
            }
            _ => self.set_status_message("Only the data grid clears all filters"),
        }
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        debug!("Status: {}", self.status_message);
    }
}
