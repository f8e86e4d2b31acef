//! # rofi-tracker - desktop search for rofi
//!
//! A rofi script-mode backend that lists hits from the Tracker desktop
//! search index and lets the user open files or drill down into folders.
//!
//! ## Architecture
//!
//! Every keystroke-driven query and every selection is a separate process.
//! The crate is organized into these modules:
//!
//! - [`adapter`] - Decides what an invocation is for and assembles the output
//! - [`context`] - Info tokens, the only state carried between invocations
//! - [`translator`] - Free text to a bounded candidate list
//! - [`resolver`] - Follow-up actions for a selected row
//! - [`output`] - rofi's row and option format
//! - [`settings`] - Environment settings and argv as query text
//! - [`index`] - The index service interface and the Tracker endpoint client
//! - [`utils`] - Configuration, logging and byte helpers
//!
//! ## Quick Start
//!
//! ```ignore
//! use rofi_tracker::adapter::Adapter;
//! use rofi_tracker::index::TrackerEndpoint;
//! use rofi_tracker::resolver::DesktopOpener;
//! use rofi_tracker::utils::AppConfig;
//!
//! let config = AppConfig::default();
//! let index = TrackerEndpoint::new(config.bus_name.clone(), config.dbus_timeout());
//! let adapter = Adapter::new(&index, DesktopOpener, &config);
//!
//! let outcome = adapter.run("invoice", None);
//! for line in &outcome.lines {
//!     println!("{}", line.text);
//! }
//! ```
//!
//! ## Limitations
//!
//! At most `max_results` rows (15 by default) are listed per query; there is
//! no paging. Invocations are independent, so a slow stale query may print
//! after a newer one; ordering is left to rofi.

pub mod adapter;
pub mod context;
pub mod index;
pub mod output;
pub mod resolver;
pub mod settings;
pub mod translator;
pub mod utils;

#[cfg(test)]
mod testing;
