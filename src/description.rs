//! Human-readable descriptions of matchers and mismatches.
//!
//! A [`Description`] is an append-only text sink. Matchers describe
//! themselves into one (see [`SelfDescribing`]) and explain mismatches into
//! one; the assertion entrypoint renders the result as the failure message.
//!
//! A description either accumulates text, or discards it. The discarding
//! variant, [`Description::none`], lets diagnosing matchers run their
//! matching logic as a pure check without building text nobody reads.

use std::fmt;

use crate::{Matcher, Value};

/// A value that can describe itself.
pub trait SelfDescribing {
    /// Append a description of `self` to `description`.
    fn describe_to(&self, description: &mut Description);
}

/// An append-only text sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    sink: Sink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Sink {
    Buffer(String),
    Discard,
}

impl Default for Description {
    fn default() -> Self {
        Self::new()
    }
}

impl Description {
    /// An empty description that accumulates text.
    pub fn new() -> Self {
        Self {
            sink: Sink::Buffer(String::new()),
        }
    }

    /// A description that discards everything appended to it.
    pub const fn none() -> Self {
        Self { sink: Sink::Discard }
    }

    /// Whether appended text is discarded.
    pub fn is_discarding(&self) -> bool {
        matches!(self.sink, Sink::Discard)
    }

    /// Render the self-description of `item` as a string.
    pub fn of(item: &(impl SelfDescribing + ?Sized)) -> String {
        let mut description = Self::new();
        description.append_description_of(item);
        description.into_string()
    }

    /// Render the mismatch description of `matcher` on `actual` as a string.
    pub fn mismatch_of(matcher: &(impl Matcher + ?Sized), actual: &dyn Value) -> String {
        let mut description = Self::new();
        matcher.describe_mismatch(actual, &mut description);
        description.into_string()
    }

    /// Append some plain text.
    pub fn append_text(&mut self, text: &str) -> &mut Self {
        if let Sink::Buffer(buffer) = &mut self.sink {
            buffer.push_str(text);
        }
        self
    }

    /// Append the self-description of `item`.
    pub fn append_description_of(&mut self, item: &(impl SelfDescribing + ?Sized)) -> &mut Self {
        item.describe_to(self);
        self
    }

    /// Append a rendering of `value`.
    ///
    /// See [`crate::value`] for the rendering rules.
    pub fn append_value(&mut self, value: &dyn Value) -> &mut Self {
        if !self.is_discarding() {
            value.describe_value(self);
        }
        self
    }

    /// Append a list of values, rendered with [`Self::append_value`].
    pub fn append_value_list<'v>(
        &mut self,
        start: &str,
        separator: &str,
        end: &str,
        values: impl IntoIterator<Item = &'v dyn Value>,
    ) -> &mut Self {
        self.append_joined(start, separator, end, values, |description, value| {
            description.append_value(value);
        })
    }

    /// Append a list of self-describing items.
    pub fn append_list<'i, S>(
        &mut self,
        start: &str,
        separator: &str,
        end: &str,
        items: impl IntoIterator<Item = &'i S>,
    ) -> &mut Self
    where
        S: SelfDescribing + ?Sized + 'i,
    {
        self.append_joined(start, separator, end, items, |description, item| {
            description.append_description_of(item);
        })
    }

    fn append_joined<T>(
        &mut self,
        start: &str,
        separator: &str,
        end: &str,
        items: impl IntoIterator<Item = T>,
        mut append: impl FnMut(&mut Self, T),
    ) -> &mut Self {
        if self.is_discarding() {
            return self;
        }
        self.append_text(start);
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.append_text(separator);
            }
            append(self, item);
        }
        self.append_text(end)
    }

    /// The accumulated text. Empty for a discarding description.
    pub fn as_str(&self) -> &str {
        match &self.sink {
            Sink::Buffer(buffer) => buffer,
            Sink::Discard => "",
        }
    }

    /// Consume the description, returning the accumulated text.
    pub fn into_string(self) -> String {
        match self.sink {
            Sink::Buffer(buffer) => buffer,
            Sink::Discard => String::new(),
        }
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SelfDescribing for str {
    fn describe_to(&self, description: &mut Description) {
        description.append_text(self);
    }
}

impl SelfDescribing for String {
    fn describe_to(&self, description: &mut Description) {
        description.append_text(self);
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn appends_text_and_values() {
        let mut description = Description::new();
        description
            .append_text("got ")
            .append_value(&3)
            .append_text(" and ")
            .append_value(&"three");
        assert_snapshot!(description.as_str(), @r###"got <3> and "three""###);
    }

    #[test]
    fn joins_lists() {
        let mut description = Description::new();
        description
            .append_value_list("{", "; ", "}", [&1 as &dyn Value, &2, &3])
            .append_text(" ")
            .append_list("(", " | ", ")", ["a", "b"].iter().copied());
        assert_eq!(description.as_str(), "{<1>; <2>; <3>} (a | b)");
    }

    #[test]
    fn empty_lists_keep_delimiters() {
        let mut description = Description::new();
        description.append_value_list("[", ", ", "]", []);
        assert_eq!(description.into_string(), "[]");
    }

    #[test]
    fn discarding_description_stays_empty() {
        let mut description = Description::none();
        description
            .append_text("ignored")
            .append_value(&vec![1, 2])
            .append_list("[", ", ", "]", ["x"].iter().copied());
        assert!(description.is_discarding());
        assert_eq!(description.as_str(), "");
        assert_eq!(description.into_string(), "");
    }

    #[test]
    fn describes_self_describing_items() {
        assert_eq!(Description::of("plain"), "plain");
        assert_eq!(Description::of(&String::from("owned")), "owned");
    }
}
