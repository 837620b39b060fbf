//! The filter and sort engine shared by all three views.
//!
//! Views never touch the fetched records. Each keeps a [`FilterSet`] and,
//! where sorting exists, a [`SortSpec`], and resolves both to an index vector
//! with [`visible_rows`]. Clearing every filter therefore always restores the
//! full set in fetch order.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::people::Person;

/// Identifies one of the presented columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Name,
    Gender,
    Email,
    Phone,
}

impl ColumnKey {
    pub const COUNT: usize = 4;
    pub const ALL: [ColumnKey; Self::COUNT] = [
        ColumnKey::Name,
        ColumnKey::Gender,
        ColumnKey::Email,
        ColumnKey::Phone,
    ];

    pub fn header(self) -> &'static str {
        match self {
            ColumnKey::Name => "Name",
            ColumnKey::Gender => "Gender",
            ColumnKey::Email => "Email",
            ColumnKey::Phone => "Phone",
        }
    }

    fn slot(self) -> usize {
        match self {
            ColumnKey::Name => 0,
            ColumnKey::Gender => 1,
            ColumnKey::Email => 2,
            ColumnKey::Phone => 3,
        }
    }
}

/// Cell content as displayed.
pub fn cell_text(person: &Person, column: ColumnKey) -> String {
    match column {
        ColumnKey::Name => person.display_name(),
        ColumnKey::Gender => person.gender.clone(),
        ColumnKey::Email => person.email.clone(),
        ColumnKey::Phone => person.phone.clone(),
    }
}

/// Canonical text a column is matched and ordered by: trimmed and lowercased,
/// with the name column reduced to first and last name.
pub fn derived_text(person: &Person, column: ColumnKey) -> String {
    match column {
        ColumnKey::Name => person.name_key(),
        ColumnKey::Gender => person.gender.trim().to_lowercase(),
        ColumnKey::Email => person.email.trim().to_lowercase(),
        ColumnKey::Phone => person.phone.trim().to_lowercase(),
    }
}

/// Per-column filter strings plus the visibility flag of the filter row.
///
/// `enabled` gates only the presentation of the inputs; committed values keep
/// filtering while the row is hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet {
    values: [String; ColumnKey::COUNT],
    pub enabled: bool,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            values: Default::default(),
            enabled: true,
        }
    }
}

impl FilterSet {
    pub fn get(&self, column: ColumnKey) -> &str {
        &self.values[column.slot()]
    }

    pub fn set(&mut self, column: ColumnKey, value: impl Into<String>) {
        self.values[column.slot()] = value.into();
    }

    /// Drop every committed value, keeping the visibility flag.
    pub fn clear_values(&mut self) {
        self.values = Default::default();
    }

    pub fn any_active(&self) -> bool {
        self.values.iter().any(|value| !value.is_empty())
    }

    /// The columns with a non-empty filter and their values.
    pub fn active(&self) -> impl Iterator<Item = (ColumnKey, &str)> {
        ColumnKey::ALL.into_iter().filter_map(|column| {
            let value = self.get(column);
            (!value.is_empty()).then_some((column, value))
        })
    }
}

/// True when the column's derived text contains `needle`, case-insensitively.
/// An empty needle matches everything.
pub fn column_matches(person: &Person, column: ColumnKey, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    derived_text(person, column).contains(&needle.to_lowercase())
}

/// True when the record satisfies every non-empty filter (AND semantics).
pub fn matches_all(person: &Person, filters: &FilterSet) -> bool {
    ColumnKey::ALL
        .into_iter()
        .all(|column| column_matches(person, column, filters.get(column)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn marker(self) -> &'static str {
        match self {
            Direction::Ascending => "▲",
            Direction::Descending => "▼",
        }
    }
}

/// Ordered sort keys; the first entry dominates, later entries break ties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortSpec {
    keys: Vec<(ColumnKey, Direction)>,
}

impl SortSpec {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[(ColumnKey, Direction)] {
        &self.keys
    }

    pub fn direction_of(&self, column: ColumnKey) -> Option<Direction> {
        self.keys
            .iter()
            .find(|(key, _)| *key == column)
            .map(|(_, direction)| *direction)
    }

    /// 1-based position of the column among the sort keys.
    pub fn priority_of(&self, column: ColumnKey) -> Option<usize> {
        self.keys
            .iter()
            .position(|(key, _)| *key == column)
            .map(|idx| idx + 1)
    }

    /// Single-sort cycle: ascending, then descending, then unsorted. Any
    /// other column's sort is dropped.
    pub fn toggle(&mut self, column: ColumnKey) {
        let next = match self.direction_of(column) {
            None => Some(Direction::Ascending),
            Some(Direction::Ascending) => Some(Direction::Descending),
            Some(Direction::Descending) => None,
        };
        self.keys.clear();
        if let Some(direction) = next {
            self.keys.push((column, direction));
        }
    }

    /// Multi-sort: cycles the column like [`toggle`](Self::toggle) but keeps
    /// the other keys, appending new columns at the lowest priority.
    pub fn toggle_additional(&mut self, column: ColumnKey) {
        match self.keys.iter().position(|(key, _)| *key == column) {
            None => self.keys.push((column, Direction::Ascending)),
            Some(idx) => match self.keys[idx].1 {
                Direction::Ascending => self.keys[idx].1 = Direction::Descending,
                Direction::Descending => {
                    self.keys.remove(idx);
                }
            },
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

/// Indices of the records that pass `filters`, ordered per `sort`.
///
/// The record set itself is never reordered. Ties keep fetch order (the sort
/// is stable), and an empty sort spec keeps fetch order outright.
pub fn visible_rows(people: &[Person], filters: &FilterSet, sort: &SortSpec) -> Vec<usize> {
    let mut rows: Vec<usize> = people
        .iter()
        .enumerate()
        .filter(|(_, person)| matches_all(person, filters))
        .map(|(idx, _)| idx)
        .collect();
    if !sort.is_empty() {
        rows.sort_by(|&a, &b| compare(&people[a], &people[b], sort));
    }
    rows
}

fn compare(a: &Person, b: &Person, sort: &SortSpec) -> Ordering {
    for &(column, direction) in sort.keys() {
        let ordering = derived_text(a, column).cmp(&derived_text(b, column));
        let ordering = match direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Number of distinct derived values in the column, for filter placeholders.
pub fn unique_count(people: &[Person], column: ColumnKey) -> usize {
    people
        .iter()
        .map(|person| derived_text(person, column))
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::people::PersonName;

    fn person(title: &str, first: &str, last: &str, gender: &str, email: &str) -> Person {
        Person {
            gender: gender.into(),
            name: PersonName {
                title: title.into(),
                first: first.into(),
                last: last.into(),
            },
            email: email.into(),
            phone: "555-0100".into(),
        }
    }

    fn two() -> Vec<Person> {
        vec![
            person("Mr", "Bob", "Jones", "male", "bob@example.com"),
            person("Ms", "Ann", "Zed", "female", "ann@example.com"),
        ]
    }

    #[test]
    fn name_filter_matches_without_the_title() {
        // "an" sits in "ann zed" but nowhere in "bob jones"; the "Mr"/"Ms"
        // titles never participate.
        let people = two();
        let mut filters = FilterSet::default();
        filters.set(ColumnKey::Name, "an");
        assert_eq!(
            visible_rows(&people, &filters, &SortSpec::default()),
            vec![1]
        );
    }

    #[test]
    fn matching_ignores_case() {
        let people = two();
        let mut filters = FilterSet::default();
        filters.set(ColumnKey::Name, "BOB");
        assert_eq!(
            visible_rows(&people, &filters, &SortSpec::default()),
            vec![0]
        );
    }

    #[test]
    fn filters_combine_with_and_semantics() {
        let mut people = two();
        people.push(person("Dr", "Ann", "Jones", "female", "aj@example.com"));
        let mut filters = FilterSet::default();
        filters.set(ColumnKey::Name, "ann");
        filters.set(ColumnKey::Email, "aj");
        assert_eq!(
            visible_rows(&people, &filters, &SortSpec::default()),
            vec![2]
        );
    }

    #[test]
    fn clearing_filters_restores_fetch_order() {
        let people = two();
        let mut filters = FilterSet::default();
        filters.set(ColumnKey::Gender, "fem");
        assert_eq!(
            visible_rows(&people, &filters, &SortSpec::default()),
            vec![1]
        );
        filters.clear_values();
        assert_eq!(
            visible_rows(&people, &filters, &SortSpec::default()),
            vec![0, 1]
        );
    }

    #[test]
    fn name_sort_uses_first_and_last_only() {
        // By title "Mr Bob" would precede "Ms Ann"; by name Ann comes first.
        let people = two();
        let mut sort = SortSpec::default();
        sort.toggle(ColumnKey::Name);
        assert_eq!(
            visible_rows(&people, &FilterSet::default(), &sort),
            vec![1, 0]
        );
    }

    #[test]
    fn descending_reverses_ascending() {
        let mut people = two();
        people.push(person("Dr", "Carol", "Young", "female", "cy@example.com"));
        let mut sort = SortSpec::default();
        sort.toggle(ColumnKey::Email);
        let ascending = visible_rows(&people, &FilterSet::default(), &sort);
        sort.toggle(ColumnKey::Email);
        let descending = visible_rows(&people, &FilterSet::default(), &sort);
        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);
    }

    #[test]
    fn sort_cycle_ends_unsorted() {
        let mut sort = SortSpec::default();
        sort.toggle(ColumnKey::Name);
        sort.toggle(ColumnKey::Name);
        sort.toggle(ColumnKey::Name);
        assert!(sort.is_empty());
    }

    #[test]
    fn toggling_another_column_replaces_the_sort() {
        let mut sort = SortSpec::default();
        sort.toggle(ColumnKey::Name);
        sort.toggle(ColumnKey::Email);
        assert_eq!(sort.keys(), &[(ColumnKey::Email, Direction::Ascending)]);
    }

    #[test]
    fn additional_keys_break_ties_in_order() {
        let people = vec![
            person("Mr", "Bob", "Jones", "male", "b@example.com"),
            person("Ms", "Ann", "Zed", "female", "z@example.com"),
            person("Ms", "Ann", "Young", "female", "a@example.com"),
        ];
        let mut sort = SortSpec::default();
        sort.toggle_additional(ColumnKey::Gender);
        sort.toggle_additional(ColumnKey::Email);
        assert_eq!(sort.priority_of(ColumnKey::Gender), Some(1));
        assert_eq!(sort.priority_of(ColumnKey::Email), Some(2));
        // female before male, and the two females by email.
        assert_eq!(
            visible_rows(&people, &FilterSet::default(), &sort),
            vec![2, 1, 0]
        );
    }

    #[test]
    fn additional_key_cycles_out_without_touching_the_rest() {
        let mut sort = SortSpec::default();
        sort.toggle_additional(ColumnKey::Gender);
        sort.toggle_additional(ColumnKey::Email);
        sort.toggle_additional(ColumnKey::Gender);
        sort.toggle_additional(ColumnKey::Gender);
        assert_eq!(sort.keys(), &[(ColumnKey::Email, Direction::Ascending)]);
    }

    #[test]
    fn ties_keep_fetch_order() {
        let people = vec![
            person("Mr", "Bob", "Jones", "male", "b@example.com"),
            person("Ms", "Ann", "Zed", "female", "z@example.com"),
            person("Mr", "Carl", "Fox", "male", "c@example.com"),
        ];
        let mut sort = SortSpec::default();
        sort.toggle(ColumnKey::Gender);
        assert_eq!(
            visible_rows(&people, &FilterSet::default(), &sort),
            vec![1, 0, 2]
        );
    }

    #[test]
    fn sorting_respects_active_filters() {
        let mut people = two();
        people.push(person("Dr", "Carol", "Young", "female", "cy@example.com"));
        let mut filters = FilterSet::default();
        filters.set(ColumnKey::Gender, "female");
        let mut sort = SortSpec::default();
        sort.toggle(ColumnKey::Name);
        assert_eq!(visible_rows(&people, &filters, &sort), vec![1, 2]);
    }

    #[test]
    fn comparison_trims_and_lowercases() {
        let people = vec![
            person("", "zoe", "adams", "male", "x@example.com"),
            person("", "  Alf", "Burke  ", "male", "y@example.com"),
        ];
        let mut sort = SortSpec::default();
        sort.toggle(ColumnKey::Name);
        assert_eq!(
            visible_rows(&people, &FilterSet::default(), &sort),
            vec![1, 0]
        );
    }

    #[test]
    fn unique_count_collapses_case() {
        let people = vec![
            person("Mr", "Bob", "Jones", "Male", "b@example.com"),
            person("Mr", "Carl", "Fox", "male", "c@example.com"),
            person("Ms", "Ann", "Zed", "female", "a@example.com"),
        ];
        assert_eq!(unique_count(&people, ColumnKey::Gender), 2);
        assert_eq!(unique_count(&people, ColumnKey::Name), 3);
    }

    #[test]
    fn active_filters_iterate_in_column_order() {
        let mut filters = FilterSet::default();
        filters.set(ColumnKey::Phone, "55");
        filters.set(ColumnKey::Name, "ann");
        let active: Vec<_> = filters.active().collect();
        assert_eq!(
            active,
            vec![(ColumnKey::Name, "ann"), (ColumnKey::Phone, "55")]
        );
    }

    #[test]
    fn hidden_filter_row_does_not_disable_matching() {
        let people = two();
        let mut filters = FilterSet::default();
        filters.set(ColumnKey::Gender, "fem");
        filters.enabled = false;
        assert_eq!(
            visible_rows(&people, &filters, &SortSpec::default()),
            vec![1]
        );
    }
}
