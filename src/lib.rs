//! leconsole - Agent console core
//!
//! Endpoint recommendation and agent relationship graph for the agent console.
//! Each subsystem lives in its own crate and is re-exported here behind a
//! cargo feature:
//!
//! - `catalogue` - [`lecatalogue`]: validated endpoint catalog
//! - `recommandation` - [`lerecommandation`]: scoring, ranking, URL validation
//! - `graphe` - [`legraphe`]: agent graph layout and activity feed
//! - `cli` - the `leconsole` binary

#![warn(missing_docs)]

#[cfg(feature = "catalogue")]
pub use lecatalogue as catalogue;

#[cfg(feature = "recommandation")]
pub use lerecommandation as recommandation;

#[cfg(feature = "graphe")]
pub use legraphe as graphe;

/// TOML configuration.
#[cfg(all(feature = "recommandation", feature = "graphe"))]
pub mod config;

/// Command-line interface.
#[cfg(feature = "cli")]
pub mod cli;
