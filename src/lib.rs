//! Static check that every Inertia page referenced from PHP code exists on disk.
//!
//! The rule works one call node at a time: [`matcher`] recognises
//! `Inertia::render('Page')`, `Route::inertia('/url', 'Page')`, `inertia('Page')`
//! and `$this->inertia('Page')`, and [`resolver`] looks the name up under the
//! configured page directories and extensions. [`fingerprint`] summarises the
//! page directories into a cache key so a host can skip re-running the rule.

pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fingerprint;
pub mod fs;
pub mod grammar;
pub mod matcher;
pub mod resolver;
pub mod rule;
pub mod scanner;
pub mod syntax;
pub mod types;
