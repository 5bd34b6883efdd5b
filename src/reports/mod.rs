//! Audit log exports
//!
//! Both renderers take entries already ordered newest-first and emit exactly
//! one row or line per entry.

pub mod audit_csv;
pub mod audit_pdf;
