//! # Archfolio
//!
//! The catalog behind an architecture studio's portfolio site: projects
//! grouped by service category, a hero carousel of featured work, category
//! and project overlays, and a contact form.
//!
//! # Architecture
//!
//! Everything a page shows is derived from one immutable [`catalog::Catalog`]
//! snapshot. Page state sits on top of it and never mutates it:
//!
//! ```text
//!   DataSource ──load_catalog──▶ Catalog ──▶ CatalogStore (Arc snapshot, revision)
//!                  │                               │
//!          fallback on failure                     ▼
//!                                              PageSession
//!                                   ┌──────────────┼───────────────┐
//!                              FilterState    ModalMachine    HeroCarousel
//!                              (query)        (modal, timer)  (carousel)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Project, category, and hero slide records |
//! | [`query`] | Search, category and year filters, sorting, counts |
//! | [`modal`] | Category and project overlays with delayed exits and scroll lock |
//! | [`timer`] | Cancellable delayed actions on a caller-driven clock |
//! | [`carousel`] | Auto-advancing hero slides |
//! | [`catalog`] | Data sources, parallel loading with fallback, snapshot store, audit |
//! | [`fallback`] | Built-in dataset embedded at compile time |
//! | [`rows`] | Backend row mapping: image URLs, completion year, category join |
//! | [`contact`] | Contact form validation and submission through a [`contact::Mailer`] |
//! | [`session`] | Routes, per-page affordances, and the page state that ties it together |
//! | [`config`] | `config.toml` loading, merging onto stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Caller-Driven Time
//!
//! No state machine sleeps or spawns timers. Exit animations and carousel
//! advances are deadlines on a millisecond clock the owner passes in, and
//! the owner calls `tick(now)` to apply whatever has come due. Tests step
//! through a 300 ms exit without waiting for it, and teardown is just
//! dropping the pending list.
//!
//! ## Never a Blank Page
//!
//! Each collection falls back to the built-in dataset independently. A
//! broken project feed still shows real categories; an unknown category
//! still renders with a placeholder card.
//!
//! ## Snapshots, Not Patches
//!
//! A reload replaces the whole catalog. Pages hold an `Arc` to the snapshot
//! they render, so a late response can never mix its projects with another
//! load's categories.

pub mod carousel;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod fallback;
pub mod modal;
pub mod output;
pub mod query;
pub mod rows;
pub mod session;
pub mod timer;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
