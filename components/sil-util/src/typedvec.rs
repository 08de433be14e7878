use std::{
    marker::PhantomData,
    ops::Deref,
};

/// A vector addressed by a typed index `I` rather than a bare `usize`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypedVec<I: TypedVecIndex, T> {
    data: Vec<T>,
    phantom: PhantomData<I>,
}

pub trait TypedVecIndex: Copy {
    fn into_usize(self) -> usize;
    fn from_usize(v: usize) -> Self;
}

/// Declares a `u32` newtype usable as a [`TypedVec`] index.
#[macro_export]
macro_rules! typed_index {
    ($(#[$attr:meta])* $v:vis struct $n:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        $v struct $n(u32);

        impl $crate::typedvec::TypedVecIndex for $n {
            fn into_usize(self) -> usize {
                self.0 as usize
            }

            fn from_usize(v: usize) -> Self {
                assert!(v < u32::MAX as usize);
                $n(v as u32)
            }
        }

        impl From<usize> for $n {
            fn from(v: usize) -> Self {
                <$n as $crate::typedvec::TypedVecIndex>::from_usize(v)
            }
        }

        impl $n {
            pub fn as_usize(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $n {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

impl<I: TypedVecIndex, T> Default for TypedVec<I, T> {
    fn default() -> Self {
        TypedVec {
            data: Vec::new(),
            phantom: PhantomData,
        }
    }
}

impl<I: TypedVecIndex, T> From<Vec<T>> for TypedVec<I, T> {
    fn from(data: Vec<T>) -> Self {
        TypedVec {
            data,
            phantom: PhantomData,
        }
    }
}

impl<I: TypedVecIndex, T> TypedVec<I, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value`, returning the index it can be found at.
    pub fn push(&mut self, value: T) -> I {
        let index = I::from_usize(self.data.len());
        self.data.push(value);
        index
    }

    pub fn get(&self, index: I) -> Option<&T> {
        self.data.get(index.into_usize())
    }

    /// True if `index` addresses an element.
    pub fn contains_index(&self, index: I) -> bool {
        index.into_usize() < self.data.len()
    }

    /// Iterate over `(index, element)` pairs in index order.
    pub fn iter_enumerated(&self) -> impl Iterator<Item = (I, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, value)| (I::from_usize(i), value))
    }
}

impl<I: TypedVecIndex, T> std::ops::Index<I> for TypedVec<I, T> {
    type Output = T;

    fn index(&self, index: I) -> &Self::Output {
        &self.data[index.into_usize()]
    }
}

impl<I: TypedVecIndex, T> std::ops::IndexMut<I> for TypedVec<I, T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.data[index.into_usize()]
    }
}

impl<I: TypedVecIndex, T> Deref for TypedVec<I, T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    crate::typed_index!(struct Slot);

    #[test]
    fn push_returns_position() {
        let mut v: TypedVec<Slot, &str> = TypedVec::new();
        let a = v.push("a");
        let b = v.push("b");
        assert_eq!(a.as_usize(), 0);
        assert_eq!(b.as_usize(), 1);
        assert_eq!(v[b], "b");
        assert!(v.contains_index(b));
        assert!(!v.contains_index(Slot::from(2usize)));
    }

    #[test]
    fn enumerated_in_index_order() {
        let v: TypedVec<Slot, char> = vec!['x', 'y', 'z'].into();
        let pairs: Vec<(usize, char)> = v
            .iter_enumerated()
            .map(|(i, c)| (i.as_usize(), *c))
            .collect();
        assert_eq!(pairs, vec![(0, 'x'), (1, 'y'), (2, 'z')]);
    }
}
