//! Transforms over `Vec` values.

use crate::pipeline::Pipeline;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

impl<A: Send + 'static> Pipeline<Vec<A>> {
    /// Applies `f` to every element.
    #[must_use]
    pub fn map<B, F>(self, f: F) -> Pipeline<Vec<B>>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        self.pipe(move |items| items.into_iter().map(&f).collect())
    }

    /// Keeps the elements matching the predicate.
    #[must_use]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&A) -> bool + Send + Sync + 'static,
    {
        self.pipe(move |mut items| {
            items.retain(|item| predicate(item));
            items
        })
    }

    /// Folds the elements into an accumulator, starting from a clone of
    /// `init` on every execution.
    #[must_use]
    pub fn reduce<B, F>(self, init: B, f: F) -> Pipeline<B>
    where
        B: Clone + Send + Sync + 'static,
        F: Fn(B, A) -> B + Send + Sync + 'static,
    {
        self.pipe(move |items| items.into_iter().fold(init.clone(), &f))
    }

    /// Takes the first element, if any.
    #[must_use]
    pub fn first(self) -> Pipeline<Option<A>> {
        self.pipe(|items| items.into_iter().next())
    }

    /// Takes the last element, if any.
    #[must_use]
    pub fn last(self) -> Pipeline<Option<A>> {
        self.pipe(|items| items.into_iter().last())
    }

    /// Keeps the first `n` elements.
    #[must_use]
    pub fn take(self, n: usize) -> Self {
        self.pipe(move |mut items| {
            items.truncate(n);
            items
        })
    }

    /// Drops the first `n` elements.
    #[must_use]
    pub fn skip(self, n: usize) -> Self {
        self.pipe(move |items| items.into_iter().skip(n).collect())
    }

    /// Reverses the element order.
    #[must_use]
    pub fn reverse(self) -> Self {
        self.pipe(|mut items| {
            items.reverse();
            items
        })
    }

    /// Sorts the elements.
    #[must_use]
    pub fn sorted(self) -> Self
    where
        A: Ord,
    {
        self.pipe(|mut items| {
            items.sort();
            items
        })
    }

    /// Sorts the elements with a comparator.
    #[must_use]
    pub fn sorted_by<F>(self, compare: F) -> Self
    where
        F: Fn(&A, &A) -> Ordering + Send + Sync + 'static,
    {
        self.pipe(move |mut items| {
            items.sort_by(&compare);
            items
        })
    }

    /// Drops duplicate elements, keeping first occurrences in order.
    #[must_use]
    pub fn unique(self) -> Self
    where
        A: Clone + Eq + Hash,
    {
        self.pipe(|items| {
            let mut seen = HashSet::new();
            items
                .into_iter()
                .filter(|item| seen.insert(item.clone()))
                .collect()
        })
    }

    /// Replaces the elements with their count.
    #[must_use]
    pub fn count(self) -> Pipeline<usize> {
        self.pipe(|items| items.len())
    }
}

impl<A: Send + 'static> Pipeline<Vec<Vec<A>>> {
    /// Flattens one level of nesting.
    #[must_use]
    pub fn flatten(self) -> Pipeline<Vec<A>> {
        self.pipe(|nested| nested.into_iter().flatten().collect())
    }
}

impl Pipeline<Vec<String>> {
    /// Joins the elements with a separator.
    #[must_use]
    pub fn join(self, separator: impl Into<String>) -> Pipeline<String> {
        let separator = separator.into();
        self.pipe(move |items| items.join(&separator))
    }
}

#[cfg(test)]
mod tests {
    use crate::pipeline::gluify;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_map_filter_reduce_chain() {
        let result = gluify(|| vec![1_i32, 2, 3, 4])
            .map(|x| x * 10)
            .filter(|x| *x > 10)
            .reduce(0, |acc, x| acc + x)
            .run();
        assert_eq!(result.unwrap(), 90);
    }

    #[test]
    fn test_first_and_last() {
        assert_eq!(gluify(|| vec![1_i32, 2, 3]).first().run().unwrap(), Some(1));
        assert_eq!(gluify(|| vec![1_i32, 2, 3]).last().run().unwrap(), Some(3));
        assert_eq!(gluify(Vec::<i32>::new).first().run().unwrap(), None);
    }

    #[test]
    fn test_take_skip_reverse() {
        let result = gluify(|| vec![1_i32, 2, 3, 4, 5])
            .skip(1)
            .take(3)
            .reverse()
            .run();
        assert_eq!(result.unwrap(), vec![4, 3, 2]);
    }

    #[test]
    fn test_sorted_and_unique() {
        let result = gluify(|| vec![3_i32, 1, 3, 2, 1]).unique().sorted().run();
        assert_eq!(result.unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_sorted_by_comparator() {
        let result = gluify(|| vec![1_i32, 3, 2])
            .sorted_by(|a, b| b.cmp(a))
            .run();
        assert_eq!(result.unwrap(), vec![3, 2, 1]);
    }

    #[test]
    fn test_flatten_and_count() {
        let result = gluify(|| vec![vec![1_i32, 2], vec![3]]).flatten().count().run();
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn test_join_strings() {
        let result = gluify(|| vec!["a".to_string(), "b".to_string()])
            .join("-")
            .run();
        assert_eq!(result.unwrap(), "a-b");
    }
}
