//! Domain model for the consolidated event planning document.
//!
//! # Responsibility
//! - Define the canonical aggregate loaded, merged and saved as one blob.
//! - Keep one shape for codec, migration and merge layers.
//!
//! # Invariants
//! - The aggregate is owned by exactly one load-mutate-save cycle at a time.
//! - Slot numbers stay within 1..=33.

pub mod document;
