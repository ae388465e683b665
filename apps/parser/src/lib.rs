//! Resume parsing service: turns uploaded resume documents into structured
//! profiles (contact details, education, experience, skills).
//!
//! The [`parsing`] pipeline is a pure, synchronous library; [`routes`] wraps
//! it in an HTTP API.

pub mod config;
pub mod errors;
pub mod formats;
pub mod parsing;
pub mod routes;
pub mod state;

pub use formats::{AdapterRegistry, FormatAdapter};
pub use parsing::{parse_document, parse_text, ParseError, ResumeParser, StructuredProfile, Vocabulary};
