//! Person records and the randomuser.me fetch.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Instant;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::AppError;

/// Name block of a person record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PersonName {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub last: String,
}

/// One person record, reduced to the fields the views present.
///
/// The API sends a lot more (location, login, portrait urls, ...); unknown
/// fields are ignored on decode, and a record missing one of these fields
/// decodes with that field empty instead of failing the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub name: PersonName,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl Person {
    /// Display name including the honorific title, e.g. "Ms Ann Zed".
    pub fn display_name(&self) -> String {
        let mut out = String::new();
        for part in [&self.name.title, &self.name.first, &self.name.last] {
            if part.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(part);
        }
        out
    }

    /// The name text filters match and sorts compare: first and last name,
    /// lowercased. The title is presentation only.
    pub fn name_key(&self) -> String {
        format!("{} {}", self.name.first, self.name.last)
            .trim()
            .to_lowercase()
    }
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    #[serde(default)]
    results: Vec<Person>,
}

/// What a fetch delivers back to the update loop.
pub type FetchOutcome = Result<Vec<Person>, AppError>;

pub fn request_url(endpoint: &str, count: usize) -> String {
    format!("{endpoint}?results={count}")
}

/// Decode one API response body.
pub fn parse_people(body: &str) -> Result<Vec<Person>, AppError> {
    let page: ApiPage = serde_json::from_str(body)?;
    Ok(page.results)
}

/// Request `count` records from `endpoint`, blocking until done.
pub fn fetch_people(endpoint: &str, count: usize) -> FetchOutcome {
    let url = request_url(endpoint, count);
    debug!("Requesting {url}");
    let start = Instant::now();
    let body = reqwest::blocking::get(&url)?.error_for_status()?.text()?;
    let people = parse_people(&body)?;
    info!(
        "Fetched {} people in {}ms",
        people.len(),
        start.elapsed().as_millis()
    );
    Ok(people)
}

/// Run the fetch on a background thread so the UI can draw right away; the
/// outcome arrives on the returned channel.
pub fn spawn_fetch(endpoint: String, count: usize) -> Receiver<FetchOutcome> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let outcome = fetch_people(&endpoint, count);
        if let Err(e) = &outcome {
            warn!("Fetch failed: {e}");
        }
        // The receiver is gone if the app quit before the response came in.
        let _ = tx.send(outcome);
    });
    rx
}
