use std::{fmt, rc::Rc};

use crate::interpreter::value::core::Value;

struct Node {
    value: Value,
    next:  Option<Rc<Node>>,
}

/// An immutable cons list.
///
/// Cells are shared between lists through `Rc`, so `cons` and `rest` are O(1)
/// and never affect any other list built from the same cells.
///
/// # Example
/// ```
/// use pierogi::interpreter::value::{core::Value, list::List};
///
/// let tail: List = vec![Value::Number(2.0), Value::Number(3.0)].into_iter().collect();
/// let list = tail.cons(Value::Number(1.0));
///
/// assert_eq!(list.len(), 3);
/// assert_eq!(tail.len(), 2);
/// assert_eq!(list.to_string(), "[1, 2, 3]");
/// ```
#[derive(Clone, Default)]
pub struct List {
    head: Option<Rc<Node>>,
    len:  usize,
}

impl List {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None,
               len:  0, }
    }

    /// Returns a new list with `value` in front of the items of `self`.
    #[must_use]
    pub fn cons(&self, value: Value) -> Self {
        Self { head: Some(Rc::new(Node { value,
                                         next: self.head.clone() })),
               len:  self.len + 1, }
    }

    /// Returns the first item, or `None` if the list is empty.
    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.head.as_ref().map(|node| &node.value)
    }

    /// Returns the list without its first item, or `None` if the list is
    /// empty.
    #[must_use]
    pub fn rest(&self) -> Option<Self> {
        self.head.as_ref().map(|node| Self { head: node.next.clone(),
                                             len:  self.len - 1, })
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over the items from first to last.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter { next: self.head.as_deref() }
    }
}

/// Borrowing iterator over the items of a [`List`].
pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
                     self.next = node.next.as_deref();
                     &node.value
                 })
    }
}

impl<'a> IntoIterator for &'a List {
    type IntoIter = Iter<'a>;
    type Item = &'a Value;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Value> for List {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let items: Vec<Value> = iter.into_iter().collect();
        items.into_iter()
             .rev()
             .fold(Self::new(), |list, item| list.cons(item))
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        for (index, value) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{value}")?;
        }

        write!(f, "]")
    }
}

// Unlink uniquely owned cells one at a time; the default drop would recurse
// once per cell.
impl Drop for List {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Rc::try_unwrap(node) {
                Ok(mut node) => next = node.next.take(),
                Err(_) => break,
            }
        }
    }
}
