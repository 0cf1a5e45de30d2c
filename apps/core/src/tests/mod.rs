//! Test Module
//!
//! Cross-module test suite for the Herbwise backend.
//!
//! ## Test Categories
//! - `nlp_tests`: Whole-pipeline properties of the symptom analyzer
//! - `database_tests`: Herb catalog CRUD, history and bookmarks
//! - `api_tests`: HTTP routes, identity headers, rate limiting and error bodies

pub mod api_tests;
