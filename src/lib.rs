//! Render one fetched person dataset through three interchangeable terminal
//! table views.
//!
//! The crate is split Elm-style: [`model::Model`] owns all state and applies
//! [`domain::Message`]s, [`controller::Controller`] maps terminal events to
//! messages, and [`ui`] draws the current model. The three views in [`views`]
//! are thin presentation layers over the shared filter/sort engine in
//! [`query`]; filter edits reach the engine through the debounce primitive in
//! [`debounce`].

pub mod controller;
pub mod debounce;
pub mod domain;
pub mod inputter;
pub mod model;
pub mod people;
pub mod query;
pub mod ui;
pub mod views;
