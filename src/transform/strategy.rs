//! The `TransformStrategy` contract and its leaf implementations

/// A pure data-shaping step: raw fetched payloads in, view-models out.
///
/// `validate` is advisory: it reports whether the input looks acceptable
/// for this strategy, and callers that care must check it before trusting
/// `transform` output. A validation failure is never an error condition
/// inside the pipeline itself.
pub trait TransformStrategy<In, Out>: Send + Sync {
    /// Shape `input` into the output form
    fn transform(&self, input: In) -> Out;

    /// Whether `input` is acceptable; strategies without an opinion accept
    /// everything
    fn validate(&self, _input: &In) -> bool {
        true
    }
}

/// Pass-through strategy: output is the input, unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTransform;

impl IdentityTransform {
    /// Create a new identity transform
    pub fn new() -> Self {
        Self
    }
}

impl<T: Send + Sync> TransformStrategy<T, T> for IdentityTransform {
    fn transform(&self, input: T) -> T {
        input
    }
}

/// Adapter turning a plain function or closure into a strategy.
///
/// The leaves of most pipelines are small field-mapping functions; this
/// lets them participate without a named type each.
pub struct FnTransform<F> {
    f: F,
}

impl<F> FnTransform<F> {
    /// Wrap a function as a transform strategy
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<In, Out, F> TransformStrategy<In, Out> for FnTransform<F>
where
    F: Fn(In) -> Out + Send + Sync,
{
    fn transform(&self, input: In) -> Out {
        (self.f)(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let identity = IdentityTransform::new();
        assert_eq!(identity.transform(42), 42);
        assert_eq!(identity.transform("s".to_string()), "s".to_string());
        assert!(identity.validate(&42));
    }

    #[test]
    fn test_fn_transform() {
        let double = FnTransform::new(|n: u32| n * 2);
        assert_eq!(double.transform(21), 42);
        assert!(double.validate(&21));
    }
}
