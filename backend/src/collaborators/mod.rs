//! Interfaces to the services TrustGrid depends on but does not implement:
//! the generative text analyzer and the transactional email sender.
//!
//! Both are optional to the primary flows. A failing analyzer is replaced by
//! the local estimate, and a failing notifier is reported to the caller
//! without undoing what was already persisted.

pub mod analyzer;
pub mod notifier;
