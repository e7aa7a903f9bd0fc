//! Paris Connection client application.
//!
//! Three layers over the library crates:
//!
//! - [`state`] — the explicit application-state struct (view/tab routing,
//!   favorites, search) with command-handler mutation entry points.
//! - [`controller`] — async command handlers dispatching into the data
//!   gateway and the extraction adapter, including the parallel
//!   load-everything fan-out and the admin publish/delete flows.
//! - [`shell`] — the interactive terminal front end.

pub mod config;
pub mod controller;
pub mod shell;
pub mod state;

pub use config::Config;
pub use controller::{AppController, PublishOutcome};
pub use state::{AppState, Tab, View};
