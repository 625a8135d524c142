//! Decorators over a single matcher.

use delegate::delegate;

use crate::{Description, Matcher, SelfDescribing, Value};

/// Matches values the wrapped matcher rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Not<M>(M);

/// Invert `matcher`.
pub fn not<M: Matcher>(matcher: M) -> Not<M> {
    Not(matcher)
}

impl<M: Matcher> SelfDescribing for Not<M> {
    fn describe_to(&self, description: &mut Description) {
        description.append_text("not ").append_description_of(&self.0);
    }
}

impl<M: Matcher> Matcher for Not<M> {
    fn matches(&self, actual: &dyn Value) -> bool {
        !self.0.matches(actual)
    }
}

/// Reads `is <matcher>`; matches exactly like the wrapped matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Is<M>(M);

/// Decorate `matcher` to read `is <matcher>`.
pub fn is<M: Matcher>(matcher: M) -> Is<M> {
    Is(matcher)
}

/// Reads `are <matcher>`; matches exactly like the wrapped matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Are<M>(M);

/// Decorate `matcher` to read `are <matcher>`.
pub fn are<M: Matcher>(matcher: M) -> Are<M> {
    Are(matcher)
}

macro_rules! prefixed {
    ($($decorator:ident => $prefix:literal),*) => {
        $(
            impl<M: Matcher> SelfDescribing for $decorator<M> {
                fn describe_to(&self, description: &mut Description) {
                    description.append_text($prefix).append_description_of(&self.0);
                }
            }

            impl<M: Matcher> Matcher for $decorator<M> {
                delegate! {
                    to self.0 {
                        fn matches(&self, actual: &dyn Value) -> bool;
                        fn describe_mismatch(&self, actual: &dyn Value, mismatch: &mut Description);
                    }
                }
            }
        )*
    };
}

prefixed!(Is => "is ", Are => "are ");

/// Replaces the description of the wrapped matcher with a fixed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribedAs<M> {
    text: String,
    matcher: M,
}

/// Describe `matcher` as `text` instead of its own description.
pub fn described_as<M: Matcher>(text: impl Into<String>, matcher: M) -> DescribedAs<M> {
    DescribedAs {
        text: text.into(),
        matcher,
    }
}

impl<M: Matcher> SelfDescribing for DescribedAs<M> {
    fn describe_to(&self, description: &mut Description) {
        description.append_text(&self.text);
    }
}

impl<M: Matcher> Matcher for DescribedAs<M> {
    delegate! {
        to self.matcher {
            fn matches(&self, actual: &dyn Value) -> bool;
            fn describe_mismatch(&self, actual: &dyn Value, mismatch: &mut Description);
        }
    }
}
