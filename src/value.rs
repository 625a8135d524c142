//! Values under test.
//!
//! Matchers receive the value under test as a `&dyn Value`. This keeps a
//! matcher graph heterogeneous (an [`crate::all_of`] can mix a matcher over
//! strings with one over sequences) while still letting every matcher check
//! the runtime type of its input before looking at it.
//!
//! A [`Value`] knows three things about itself:
//!  - how it is rendered inside a [`Description`] (the `append_value` rules),
//!  - whether it is present at all ([`Null`] and `Option::None` are not),
//!  - whether it can be viewed as a sequence of items.
//!
//! Implementations are provided for the standard scalar types, strings and
//! the standard collections. Other types opt in by implementing [`Value`]
//! directly, or with the [`display_value!`](crate::display_value) macro when
//! their `Display` output is a good rendering.

use std::any::Any;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt::Display;
use std::rc::Rc;
use std::sync::Arc;

use crate::Description;

/// Conversions available on every [`Value`].
///
/// Blanket-implemented for all sized values, so implementors of [`Value`]
/// never write it by hand. It exists so that the conversions dispatch to the
/// concrete type through a `&dyn Value`.
pub trait Upcast {
    /// The value as a `&dyn Any`, for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// The value as a `&dyn Value`.
    fn as_value(&self) -> &dyn Value;

    /// The name of the concrete runtime type.
    fn type_name(&self) -> &'static str;
}

impl<T: Value> Upcast for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_value(&self) -> &dyn Value {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A value that can be matched and rendered in a description.
pub trait Value: Upcast + 'static {
    /// Render the value, as `Description::append_value` does.
    fn describe_value(&self, description: &mut Description);

    /// The value itself, or `None` if the value is null.
    ///
    /// Wrappers such as `Option<T>` and `Box<T>` return their inner value, so
    /// type checks look through them.
    fn present(&self) -> Option<&dyn Value> {
        Some(self.as_value())
    }

    /// View the value as a sequence of items, if it is a collection.
    fn items(&self) -> Option<Vec<&dyn Value>> {
        None
    }
}

/// The null value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Null;

impl Value for Null {
    fn describe_value(&self, description: &mut Description) {
        description.append_text("null");
    }

    fn present(&self) -> Option<&dyn Value> {
        None
    }
}

impl<T: Value> Value for Option<T> {
    fn describe_value(&self, description: &mut Description) {
        match self {
            Some(value) => value.describe_value(description),
            None => {
                description.append_text("null");
            }
        }
    }

    fn present(&self) -> Option<&dyn Value> {
        self.as_ref().and_then(|value| value.present())
    }

    fn items(&self) -> Option<Vec<&dyn Value>> {
        self.as_ref().and_then(|value| value.items())
    }
}

macro_rules! forward_value {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Value> Value for $wrapper<T> {
                fn describe_value(&self, description: &mut Description) {
                    (**self).describe_value(description)
                }

                fn present(&self) -> Option<&dyn Value> {
                    (**self).present()
                }

                fn items(&self) -> Option<Vec<&dyn Value>> {
                    (**self).items()
                }
            }
        )*
    };
}

forward_value!(Box, Rc, Arc);

/// Render `value` as `<value>` using its `Display` implementation.
pub fn describe_with_display(value: &impl Display, description: &mut Description) {
    description.append_text(&format!("<{value}>"));
}

/// Implement [`Value`] for types whose `Display` output renders them.
///
/// The value is rendered in angle brackets, e.g. `<42>`.
///
/// ```
/// use std::fmt;
///
/// #[derive(PartialEq)]
/// struct Port(u16);
///
/// impl fmt::Display for Port {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "port {}", self.0)
///     }
/// }
///
/// seqmatch::display_value!(Port);
///
/// let matcher = seqmatch::equal_to(Port(80));
/// assert_eq!(seqmatch::Description::of(&matcher), "<port 80>");
/// ```
#[macro_export]
macro_rules! display_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::Value for $ty {
                fn describe_value(&self, description: &mut $crate::Description) {
                    $crate::value::describe_with_display(self, description)
                }
            }
        )*
    };
}

display_value!(i8, i32, i128, isize, u8, u16, u32, u64, u128, usize, bool);

macro_rules! suffixed_value {
    ($($ty:ty => $suffix:literal),*) => {
        $(
            impl Value for $ty {
                fn describe_value(&self, description: &mut Description) {
                    description.append_text(&format!("<{:?}{}>", self, $suffix));
                }
            }
        )*
    };
}

suffixed_value!(i16 => "s", i64 => "L", f32 => "F", f64 => "");

impl Value for String {
    fn describe_value(&self, description: &mut Description) {
        description.append_text(&quoted(self.chars()));
    }
}

impl Value for &'static str {
    fn describe_value(&self, description: &mut Description) {
        description.append_text(&quoted(self.chars()));
    }
}

impl Value for char {
    fn describe_value(&self, description: &mut Description) {
        description.append_text(&quoted([*self]));
    }
}

/// Double-quote a string, escaping only `"`, `\n`, `\r` and `\t`.
fn quoted(chars: impl IntoIterator<Item = char>) -> String {
    let mut out = String::from('"');
    for c in chars {
        match c {
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

macro_rules! sequence_value {
    ($($collection:ident),*) => {
        $(
            impl<T: Value> Value for $collection<T> {
                fn describe_value(&self, description: &mut Description) {
                    description.append_value_list("[", ", ", "]", self.iter().map(Upcast::as_value));
                }

                fn items(&self) -> Option<Vec<&dyn Value>> {
                    Some(self.iter().map(Upcast::as_value).collect())
                }
            }
        )*
    };
}

sequence_value!(Vec, VecDeque, BTreeSet, HashSet);

impl<T: Value, const N: usize> Value for [T; N] {
    fn describe_value(&self, description: &mut Description) {
        description.append_value_list("[", ", ", "]", self.iter().map(Upcast::as_value));
    }

    fn items(&self) -> Option<Vec<&dyn Value>> {
        Some(self.iter().map(Upcast::as_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn render(value: &dyn Value) -> String {
        let mut description = Description::new();
        description.append_value(value);
        description.into_string()
    }

    #[rstest]
    #[case(&Null, "null")]
    #[case(&None::<i32>, "null")]
    #[case(&Some(3), "<3>")]
    #[case(&"tab\there", "\"tab\\there\"")]
    #[case(&String::from("say \"hi\"\r\n"), "\"say \\\"hi\\\"\\r\\n\"")]
    #[case(&'x', "\"x\"")]
    #[case(&'"', "\"\\\"\"")]
    #[case(&5i16, "<5s>")]
    #[case(&5i64, "<5L>")]
    #[case(&1.5f32, "<1.5F>")]
    #[case(&1.0f64, "<1.0>")]
    #[case(&42u8, "<42>")]
    #[case(&true, "<true>")]
    #[case(&vec![1, 2], "[<1>, <2>]")]
    #[case(&vec![vec!["a"], vec![]], "[[\"a\"], []]")]
    #[case(&[Some(1), None], "[<1>, null]")]
    #[case(&Box::new(7), "<7>")]
    fn renders_values(#[case] value: &dyn Value, #[case] expected: &str) {
        assert_eq!(render(value), expected);
    }

    #[test]
    fn backslash_is_not_escaped() {
        assert_eq!(render(&"a\\b"), "\"a\\b\"");
    }

    #[test]
    fn present_looks_through_wrappers() {
        let boxed = Box::new(Some(3));
        let inner = boxed.present().unwrap();
        assert_eq!(inner.as_any().downcast_ref::<i32>(), Some(&3));
        assert!(Box::new(None::<i32>).present().is_none());
        assert!(Null.present().is_none());
    }

    #[test]
    fn only_collections_have_items() {
        assert_eq!(vec![1, 2, 3].items().map(|items| items.len()), Some(3));
        assert_eq!(VecDeque::from([1]).items().map(|items| items.len()), Some(1));
        assert!(5i32.items().is_none());
        assert!("abc".items().is_none());
        assert!(Null.items().is_none());
    }

    #[test]
    fn type_names_are_concrete() {
        let value: &dyn Value = &String::from("x");
        assert_eq!(value.type_name(), "alloc::string::String");
        assert_eq!((&5 as &dyn Value).type_name(), "i32");
    }
}
