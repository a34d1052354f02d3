//
// Copyright (c) The pandev Contributors
//
// SPDX-License-Identifier: MIT
//

use generational_arena::Index;

pub type NodeIndex = Index;

#[derive(Debug)]
pub struct Arena<T>(generational_arena::Arena<T>);

// ===== impl Arena =====

impl<T> Arena<T> {
    pub(crate) fn insert(&mut self, value: T) -> Index {
        self.0.insert(value)
    }

    pub(crate) fn remove(&mut self, index: Index) -> Option<T> {
        self.0.remove(index)
    }

    pub(crate) fn get(&self, index: Index) -> Option<&T> {
        self.0.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: Index) -> Option<&mut T> {
        self.0.get_mut(index)
    }

    pub(crate) fn contains(&self, index: Index) -> bool {
        self.0.contains(index)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Index, &T)> {
        self.0.iter()
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Arena<T> {
        Arena(Default::default())
    }
}

impl<T> std::ops::Index<Index> for Arena<T> {
    type Output = T;

    fn index(&self, index: Index) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> std::ops::IndexMut<Index> for Arena<T> {
    fn index_mut(&mut self, index: Index) -> &mut Self::Output {
        &mut self.0[index]
    }
}
