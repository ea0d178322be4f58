//! String schema constraints.

use crate::model::{Format, Pattern, StringSpec};
use crate::state::SchemaState;

use super::Schema;

/// Start a string schema.
pub fn string() -> Schema<StringSpec> {
    Schema::from_spec(StringSpec::default())
}

impl<S: SchemaState> Schema<StringSpec, S> {
    /// Minimum length in Unicode scalar values, inclusive.
    pub fn min_length(mut self, n: usize) -> Self {
        self.spec_mut().min_length = Some(n);
        self
    }

    /// Maximum length in Unicode scalar values, inclusive.
    pub fn max_length(mut self, n: usize) -> Self {
        self.spec_mut().max_length = Some(n);
        self
    }

    /// Whole-string regular expression.
    ///
    /// Compiled immediately. An invalid pattern does not fail here; the
    /// schema is poisoned and every validation reports a `pattern` error
    /// carrying the compile diagnostic.
    pub fn pattern(mut self, source: impl Into<String>) -> Self {
        self.spec_mut().pattern = Some(Pattern::new(source));
        self
    }

    /// Require an email address.
    pub fn email(mut self) -> Self {
        self.spec_mut().format = Some(Format::Email);
        self
    }

    /// Require an absolute URI with a scheme and a host.
    pub fn url(mut self) -> Self {
        self.spec_mut().format = Some(Format::Uri);
        self
    }

    /// Require the exact literal.
    pub fn literal(mut self, literal: impl Into<String>) -> Self {
        self.spec_mut().literal = Some(literal.into());
        self
    }
}
