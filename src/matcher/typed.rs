//! Null and type-safe dispatch.
//!
//! Matchers that only make sense for one kind of value implement
//! [`TypeSafeMatcher`] (a boolean predicate) or [`DiagnosingMatcher`] (a
//! predicate that writes its own mismatch description while matching), and
//! are wrapped in [`TypeSafe`] or [`TypeSafeDiagnosing`] respectively. The
//! wrappers check, in order:
//!  1. that the value is not null, otherwise the mismatch is `was null`;
//!  2. that the value has the kind declared by the matcher's [`TypeTag`],
//!     otherwise the mismatch is `was a <type> (<value>)`;
//!  3. only then call the typed predicate on the tag's [`View`] of the value.
//!
//! The expected kind is named explicitly by the matcher author through an
//! associated type. Two tags are provided: [`Of<T>`] for a concrete type and
//! [`Items`] for any collection.

use std::marker::PhantomData;

use delegate::delegate;
use derive_where::derive_where;

use crate::{Description, Matcher, SelfDescribing, Value};

/// The kind of value a typed matcher accepts.
pub trait TypeTag: 'static {
    /// The typed view of an accepted value.
    type View<'a>;

    /// View `actual` through the tag, or `None` if it has the wrong kind.
    ///
    /// `actual` is never null: the dispatch has already looked through it.
    fn view(actual: &dyn Value) -> Option<Self::View<'_>>;
}

/// The typed view of a value accepted by tag `T`.
pub type View<'a, T> = <T as TypeTag>::View<'a>;

/// Values of the concrete type `T`.
#[derive_where(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Of<T>(PhantomData<fn() -> T>);

impl<T: Value> TypeTag for Of<T> {
    type View<'a> = &'a T;

    fn view(actual: &dyn Value) -> Option<Self::View<'_>> {
        actual.as_any().downcast_ref()
    }
}

/// Collections, viewed as the sequence of their items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Items;

impl TypeTag for Items {
    type View<'a> = Vec<&'a dyn Value>;

    fn view(actual: &dyn Value) -> Option<Self::View<'_>> {
        actual.items()
    }
}

/// A matcher over values of one kind, with a boolean predicate.
pub trait TypeSafeMatcher: SelfDescribing + Send + Sync {
    /// The kind of value accepted.
    type Tag: TypeTag;

    /// Whether the non-null, correctly typed `item` matches.
    fn matches_safely(&self, item: View<'_, Self::Tag>) -> bool;

    /// Explain why `item` does not match.
    ///
    /// `actual` is the untyped value `item` was viewed from.
    fn describe_mismatch_safely(
        &self,
        item: View<'_, Self::Tag>,
        actual: &dyn Value,
        mismatch: &mut Description,
    ) {
        let _ = item;
        mismatch.append_text("was ").append_value(actual);
    }
}

/// A matcher over values of one kind, describing the mismatch as it matches.
///
/// Prefer this over [`TypeSafeMatcher`] when the explanation depends on
/// state computed while matching, e.g. how far a scan got.
pub trait DiagnosingMatcher: SelfDescribing + Send + Sync {
    /// The kind of value accepted.
    type Tag: TypeTag;

    /// Whether `item` matches. When it does not, the reason is written to
    /// `mismatch`, which may be discarding.
    fn matches_diagnosing(&self, item: View<'_, Self::Tag>, mismatch: &mut Description) -> bool;
}

/// Step 1 and 2 of the dispatch: null check, then type check.
///
/// On success returns the typed view; on failure writes the standard
/// mismatch to `mismatch` and returns `None`.
fn dispatch<'a, T: TypeTag>(
    actual: &'a dyn Value,
    mismatch: &mut Description,
) -> Option<(View<'a, T>, &'a dyn Value)> {
    let Some(present) = actual.present() else {
        mismatch.append_text("was null");
        return None;
    };
    let Some(item) = T::view(present) else {
        mismatch
            .append_text("was a ")
            .append_text(present.type_name())
            .append_text(" (")
            .append_value(present)
            .append_text(")");
        return None;
    };
    Some((item, present))
}

/// Check null and type before matching the typed view.
fn typed_view<T: TypeTag>(actual: &dyn Value) -> Option<View<'_, T>> {
    actual.present().and_then(|present| T::view(present))
}

/// Wraps a [`TypeSafeMatcher`] into a [`Matcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypeSafe<M>(pub M);

impl<M: TypeSafeMatcher> SelfDescribing for TypeSafe<M> {
    delegate! {
        to self.0 {
            fn describe_to(&self, description: &mut Description);
        }
    }
}

impl<M: TypeSafeMatcher> Matcher for TypeSafe<M> {
    fn matches(&self, actual: &dyn Value) -> bool {
        typed_view::<M::Tag>(actual).is_some_and(|item| self.0.matches_safely(item))
    }

    fn describe_mismatch(&self, actual: &dyn Value, mismatch: &mut Description) {
        if let Some((item, present)) = dispatch::<M::Tag>(actual, mismatch) {
            self.0.describe_mismatch_safely(item, present, mismatch);
        }
    }
}

/// Wraps a [`DiagnosingMatcher`] into a [`Matcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypeSafeDiagnosing<M>(pub M);

impl<M: DiagnosingMatcher> SelfDescribing for TypeSafeDiagnosing<M> {
    delegate! {
        to self.0 {
            fn describe_to(&self, description: &mut Description);
        }
    }
}

impl<M: DiagnosingMatcher> Matcher for TypeSafeDiagnosing<M> {
    fn matches(&self, actual: &dyn Value) -> bool {
        typed_view::<M::Tag>(actual)
            .is_some_and(|item| self.0.matches_diagnosing(item, &mut Description::none()))
    }

    fn describe_mismatch(&self, actual: &dyn Value, mismatch: &mut Description) {
        if let Some((item, _)) = dispatch::<M::Tag>(actual, mismatch) {
            self.0.matches_diagnosing(item, mismatch);
        }
    }
}
