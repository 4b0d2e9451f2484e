//! Interactive scaffolder that turns a freshly created Django app into a
//! redistributable, installable package.
//!
//! The binary resolves a set of feature decisions into an immutable
//! [`plan::ScaffoldPlan`], then [`compose`] executes the plan as an ordered
//! sequence of directory creations, template copies, and external-process
//! calls.

pub mod cli;
pub mod compose;
pub mod fetch;
pub mod git;
pub mod plan;
pub mod prompt;
pub mod render;
pub mod templates;
pub mod verify;
