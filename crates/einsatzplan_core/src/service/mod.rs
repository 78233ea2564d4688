//! Use-case services over the document repository.
//!
//! # Responsibility
//! - Provide the load-merge-save entry points used by the planner UI.
//! - Keep merge semantics in one place, storage-agnostic.

pub mod plan_service;

pub use plan_service::{
    DocumentPatch, EventInfoPatch, LadefPatch, PlanService, SlotPatch,
};
