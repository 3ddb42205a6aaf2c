//! Rule engine for patent application filings.
//!
//! Turns the flat field set posted by the filing form into a statutory fee
//! breakdown and the context handed to the document template collaborator.
//! The drafting workflow wraps draft storage and section generation behind
//! traits so the transport can wire in whichever adapters it has.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
