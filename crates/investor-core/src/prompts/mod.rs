//! Prompt templates for the five completion calls
//!
//! One function per message; system instructions and user content are built
//! separately and paired by the pipeline.

pub mod system;
pub mod user;
