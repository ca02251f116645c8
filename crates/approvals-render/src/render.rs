//! The [`Render`] capability and its built-in implementations.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt::{self, Write as _};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use crate::number::format_general;

/// Conversion of a value into canonical text.
///
/// Scalars render as their plain text. Sequences and sets render one
/// `"<index> = <element>\n"` line per element; mappings render one
/// `"<key> = <value>\n"` line per entry.
///
/// User types either implement this directly or opt in through their
/// `Display` impl with [`render_via_display!`](crate::render_via_display).
pub trait Render {
    /// Append the canonical text of `self` to `out`.
    fn render_into(&self, out: &mut String);

    /// The canonical text of `self`.
    fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }
}

/// Implement [`Render`] for types through their `Display` impl.
///
/// ```
/// use approvals_render::{render_via_display, Render};
///
/// struct Point { x: f32, y: f32 }
///
/// impl std::fmt::Display for Point {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "Point(x={:.3}, y={:.3})", self.x, self.y)
///     }
/// }
///
/// render_via_display!(Point);
///
/// assert_eq!(Point { x: 1.0, y: 2.0 }.render(), "Point(x=1.000, y=2.000)");
/// ```
#[macro_export]
macro_rules! render_via_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Render for $ty {
                fn render_into(&self, out: &mut ::std::string::String) {
                    use ::std::fmt::Write as _;
                    let _ = ::std::write!(out, "{}", self);
                }
            }
        )+
    };
}

render_via_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, str, String,
);

impl Render for f64 {
    fn render_into(&self, out: &mut String) {
        out.push_str(&format_general(*self));
    }
}

impl Render for f32 {
    fn render_into(&self, out: &mut String) {
        out.push_str(&format_general(f64::from(*self)));
    }
}

/// Renders any `Display` value without a [`Render`] impl.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Displayed<T>(pub T);

impl<T: fmt::Display> Render for Displayed<T> {
    fn render_into(&self, out: &mut String) {
        let _ = write!(out, "{}", self.0);
    }
}

// ---------------------------------------------------------------------------
// Pointers
// ---------------------------------------------------------------------------

impl<T: Render + ?Sized> Render for &T {
    fn render_into(&self, out: &mut String) {
        (**self).render_into(out);
    }
}

impl<T: Render + ?Sized> Render for &mut T {
    fn render_into(&self, out: &mut String) {
        (**self).render_into(out);
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    fn render_into(&self, out: &mut String) {
        (**self).render_into(out);
    }
}

impl<T: Render + ?Sized> Render for Rc<T> {
    fn render_into(&self, out: &mut String) {
        (**self).render_into(out);
    }
}

impl<T: Render + ?Sized> Render for Arc<T> {
    fn render_into(&self, out: &mut String) {
        (**self).render_into(out);
    }
}

impl<T: Render + ToOwned + ?Sized> Render for Cow<'_, T> {
    fn render_into(&self, out: &mut String) {
        (**self).render_into(out);
    }
}

// ---------------------------------------------------------------------------
// Sequences and sets
// ---------------------------------------------------------------------------

/// Render elements as `"<index> = <element>\n"` lines, indexed from 0.
pub fn render_sequence<I>(elements: I) -> String
where
    I: IntoIterator,
    I::Item: Render,
{
    let mut out = String::new();
    write_sequence(&mut out, elements);
    out
}

fn write_sequence<I>(out: &mut String, elements: I)
where
    I: IntoIterator,
    I::Item: Render,
{
    for (index, element) in elements.into_iter().enumerate() {
        let _ = write!(out, "{index} = ");
        element.render_into(out);
        out.push('\n');
    }
}

macro_rules! render_as_sequence {
    ($(impl<$($gen:ident $(: $bound:path)?),*> for $ty:ty;)+) => {
        $(
            impl<$($gen $(: $bound)?),*> Render for $ty
            where
                T: Render,
            {
                fn render_into(&self, out: &mut String) {
                    write_sequence(out, self.iter());
                }
            }
        )+
    };
}

render_as_sequence! {
    impl<T> for [T];
    impl<T> for Vec<T>;
    impl<T> for VecDeque<T>;
    impl<T> for LinkedList<T>;
    impl<T> for BTreeSet<T>;
    impl<T, S: BuildHasher> for HashSet<T, S>;
}

impl<T: Render, const N: usize> Render for [T; N] {
    fn render_into(&self, out: &mut String) {
        write_sequence(out, self.iter());
    }
}

// ---------------------------------------------------------------------------
// Mappings
// ---------------------------------------------------------------------------

/// Render entries as `"<key> = <value>\n"` lines in iteration order.
pub fn render_mapping<I, K, V>(entries: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Render,
    V: Render,
{
    let mut out = String::new();
    write_mapping(&mut out, entries);
    out
}

fn write_mapping<I, K, V>(out: &mut String, entries: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: Render,
    V: Render,
{
    for (key, value) in entries {
        key.render_into(out);
        out.push_str(" = ");
        value.render_into(out);
        out.push('\n');
    }
}

impl<K: Render, V: Render> Render for BTreeMap<K, V> {
    fn render_into(&self, out: &mut String) {
        write_mapping(out, self.iter());
    }
}

impl<K: Render, V: Render, S: BuildHasher> Render for HashMap<K, V, S> {
    fn render_into(&self, out: &mut String) {
        write_mapping(out, self.iter());
    }
}
