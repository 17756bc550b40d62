//! Combinators composing transform strategies into pipelines

use crate::transform::strategy::TransformStrategy;
use std::marker::PhantomData;

/// Two strategies run back to back: the output of `first` feeds `second`.
///
/// Chaining is associative: `a.then(b).then(c)` and `a.then(b.then(c))`
/// produce the same output for every input.
pub struct ChainTransform<A, B, Mid> {
    first: A,
    second: B,
    _mid: PhantomData<fn(Mid) -> Mid>,
}

impl<A, B, Mid> ChainTransform<A, B, Mid> {
    /// Compose two strategies in order
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            _mid: PhantomData,
        }
    }
}

impl<In, Mid, Out, A, B> TransformStrategy<In, Out> for ChainTransform<A, B, Mid>
where
    A: TransformStrategy<In, Mid>,
    B: TransformStrategy<Mid, Out>,
    Mid: Send + Sync,
{
    fn transform(&self, input: In) -> Out {
        self.second.transform(self.first.transform(input))
    }

    // Only the first stage can be consulted without running the pipeline;
    // the second stage's input does not exist yet.
    fn validate(&self, input: &In) -> bool {
        self.first.validate(input)
    }
}

/// Extension methods for building pipelines fluently
pub trait TransformStrategyExt<In, Out>: TransformStrategy<In, Out> + Sized {
    /// Feed this strategy's output into `next`
    fn then<Next, Final>(self, next: Next) -> ChainTransform<Self, Next, Out>
    where
        Next: TransformStrategy<Out, Final>,
    {
        ChainTransform::new(self, next)
    }
}

impl<In, Out, S> TransformStrategyExt<In, Out> for S where S: TransformStrategy<In, Out> {}

/// An ordered pipeline of same-type stages threaded in array order.
///
/// `validate` is the logical AND of every stage's `validate`, applied to
/// the original input.
pub struct ComposedTransform<T> {
    stages: Vec<Box<dyn TransformStrategy<T, T>>>,
}

impl<T> ComposedTransform<T> {
    /// Build a pipeline from boxed stages, applied in order
    pub fn new(stages: Vec<Box<dyn TransformStrategy<T, T>>>) -> Self {
        Self { stages }
    }

    /// Append a stage to the end of the pipeline
    pub fn push(mut self, stage: Box<dyn TransformStrategy<T, T>>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl<T: Send + Sync> TransformStrategy<T, T> for ComposedTransform<T> {
    fn transform(&self, input: T) -> T {
        self.stages
            .iter()
            .fold(input, |acc, stage| stage.transform(acc))
    }

    fn validate(&self, input: &T) -> bool {
        self.stages.iter().all(|stage| stage.validate(input))
    }
}

/// Lifts an item-level strategy over a collection, element-wise.
///
/// Order and length are preserved; `validate` requires every element to
/// individually validate.
pub struct ArrayTransform<S> {
    item: S,
}

impl<S> ArrayTransform<S> {
    /// Lift `item` to operate over `Vec`s
    pub fn new(item: S) -> Self {
        Self { item }
    }
}

impl<In, Out, S> TransformStrategy<Vec<In>, Vec<Out>> for ArrayTransform<S>
where
    S: TransformStrategy<In, Out>,
    In: Send + Sync,
    Out: Send + Sync,
{
    fn transform(&self, input: Vec<In>) -> Vec<Out> {
        input
            .into_iter()
            .map(|item| self.item.transform(item))
            .collect()
    }

    fn validate(&self, input: &Vec<In>) -> bool {
        input.iter().all(|item| self.item.validate(item))
    }
}

/// Filters a collection before transforming the survivors.
///
/// Items failing the predicate are dropped, not transformed, and never
/// appear in the output; the relative order of survivors is preserved.
pub struct FilteringTransform<S, P> {
    predicate: P,
    item: S,
}

impl<S, P> FilteringTransform<S, P> {
    /// Keep items matching `predicate`, then transform each with `item`
    pub fn new(predicate: P, item: S) -> Self {
        Self { predicate, item }
    }
}

impl<In, Out, S, P> TransformStrategy<Vec<In>, Vec<Out>> for FilteringTransform<S, P>
where
    S: TransformStrategy<In, Out>,
    P: Fn(&In) -> bool + Send + Sync,
    In: Send + Sync,
    Out: Send + Sync,
{
    fn transform(&self, input: Vec<In>) -> Vec<Out> {
        input
            .into_iter()
            .filter(|item| (self.predicate)(item))
            .map(|item| self.item.transform(item))
            .collect()
    }

    // Dropped items are never transformed, so only survivors are validated.
    fn validate(&self, input: &Vec<In>) -> bool {
        input
            .iter()
            .filter(|item| (self.predicate)(item))
            .all(|item| self.item.validate(item))
    }
}

/// Dispatches the entire input to one of two strategies.
///
/// The predicate is evaluated once per call; there is no partial or
/// per-field branching.
pub struct ConditionalTransform<A, B, P> {
    predicate: P,
    when_true: A,
    when_false: B,
}

impl<A, B, P> ConditionalTransform<A, B, P> {
    /// Route to `when_true` if the predicate holds, else `when_false`
    pub fn new(predicate: P, when_true: A, when_false: B) -> Self {
        Self {
            predicate,
            when_true,
            when_false,
        }
    }
}

impl<In, Out, A, B, P> TransformStrategy<In, Out> for ConditionalTransform<A, B, P>
where
    A: TransformStrategy<In, Out>,
    B: TransformStrategy<In, Out>,
    P: Fn(&In) -> bool + Send + Sync,
{
    fn transform(&self, input: In) -> Out {
        if (self.predicate)(&input) {
            self.when_true.transform(input)
        } else {
            self.when_false.transform(input)
        }
    }

    fn validate(&self, input: &In) -> bool {
        if (self.predicate)(input) {
            self.when_true.validate(input)
        } else {
            self.when_false.validate(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::strategy::FnTransform;

    #[test]
    fn test_chain_equivalence() {
        let double = FnTransform::new(|n: i64| n * 2);
        let stringify = FnTransform::new(|n: i64| n.to_string());
        let chained = double.then(stringify);

        for x in [-3_i64, 0, 7, 1000] {
            assert_eq!(chained.transform(x), (x * 2).to_string());
        }
    }

    #[test]
    fn test_chain_associativity() {
        let left = FnTransform::new(|n: i64| n + 1)
            .then(FnTransform::new(|n: i64| n * 3))
            .then(FnTransform::new(|n: i64| n - 4));
        let right = FnTransform::new(|n: i64| n + 1)
            .then(FnTransform::new(|n: i64| n * 3).then(FnTransform::new(|n: i64| n - 4)));

        for x in [-10_i64, 0, 5, 42] {
            assert_eq!(left.transform(x), right.transform(x));
        }
    }

    #[test]
    fn test_composed_threads_in_order() {
        let pipeline = ComposedTransform::new(vec![
            Box::new(FnTransform::new(|s: String| format!("{}-a", s))),
            Box::new(FnTransform::new(|s: String| format!("{}-b", s))),
        ]);

        assert_eq!(pipeline.transform("x".to_string()), "x-a-b");
        assert_eq!(pipeline.len(), 2);
    }

    #[test]
    fn test_empty_composed_is_identity() {
        let pipeline: ComposedTransform<u32> = ComposedTransform::new(Vec::new());
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.transform(9), 9);
        assert!(pipeline.validate(&9));
    }

    #[test]
    fn test_composed_validate_is_and() {
        struct EvenOnly;
        impl TransformStrategy<u32, u32> for EvenOnly {
            fn transform(&self, input: u32) -> u32 {
                input
            }
            fn validate(&self, input: &u32) -> bool {
                input % 2 == 0
            }
        }

        let pipeline = ComposedTransform::new(vec![
            Box::new(FnTransform::new(|n: u32| n)),
            Box::new(EvenOnly),
        ]);

        assert!(pipeline.validate(&4));
        assert!(!pipeline.validate(&3));
    }

    #[test]
    fn test_array_preserves_order_and_length() {
        let lifted = ArrayTransform::new(FnTransform::new(|n: u32| n + 1));
        assert_eq!(lifted.transform(vec![1, 2, 3]), vec![2, 3, 4]);
        assert_eq!(lifted.transform(Vec::new()), Vec::<u32>::new());
    }

    #[test]
    fn test_filtering_drops_before_transforming() {
        let evens_doubled =
            FilteringTransform::new(|n: &u32| n % 2 == 0, FnTransform::new(|n: u32| n * 2));

        assert_eq!(evens_doubled.transform(vec![1, 2, 3, 4]), vec![4, 8]);
    }

    #[test]
    fn test_filtering_preserves_survivor_order() {
        let keep_short = FilteringTransform::new(
            |s: &String| s.len() <= 3,
            FnTransform::new(|s: String| s.to_uppercase()),
        );

        let input = vec!["one".to_string(), "seventeen".to_string(), "two".to_string()];
        assert_eq!(
            keep_short.transform(input),
            vec!["ONE".to_string(), "TWO".to_string()]
        );
    }

    #[test]
    fn test_conditional_dispatches_whole_input() {
        let branch = ConditionalTransform::new(
            |n: &i32| *n >= 0,
            FnTransform::new(|n: i32| format!("+{}", n)),
            FnTransform::new(|n: i32| format!("{}", n)),
        );

        assert_eq!(branch.transform(5), "+5");
        assert_eq!(branch.transform(-5), "-5");
    }
}
