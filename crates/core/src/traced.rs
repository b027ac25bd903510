// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured tracing for effects

/// Implemented by side effects the executor runs inside a span
pub trait TracedEffect {
    /// Span name, e.g. "save_claims" or "notify"
    fn name(&self) -> &'static str;

    /// Key-value pairs logged when the effect starts
    fn fields(&self) -> Vec<(&'static str, String)>;
}
