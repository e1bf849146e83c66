//! Request-scoped context module.
//!
//! Provides `RequestContext` extractor that bundles request-scoped data
//! to complement application-scoped `AppState`.

mod extractor;

pub use extractor::RequestContext;
