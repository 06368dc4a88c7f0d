//! Shared test fixtures for AllocForge crates.
//!
//! This crate provides builders and reference scenarios for testing.
//! It depends only on `allocforge-core` so every other crate can use it as a
//! dev-dependency without cycles.
//!
//! - [`builders`] - terse task and worker constructors
//! - [`scenarios`] - reference allocation problems with known outcomes
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! allocforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use allocforge_test::scenarios::two_skill_example;
//!
//! let scenario = two_skill_example();
//! assert_eq!(scenario.tasks.len(), 2);
//! let problem = scenario.into_problem().unwrap();
//! assert_eq!(problem.workers().len(), 2);
//! ```

pub mod builders;
pub mod scenarios;

pub use builders::{task, worker};
pub use scenarios::Scenario;
