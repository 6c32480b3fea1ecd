use crate::error::{BuildError, Target};

/// Anything that can be handed to a [`Receiver`].
pub trait ElementKind {
    /// Short lowercase name used in diagnostics, e.g. `"datum"`.
    fn kind(&self) -> &'static str;
}

/// A builder that elements are folded into, left to right.
///
/// Every builder also has typed methods for the elements it accepts; `receive`
/// is the runtime path used when elements arrive as a heterogeneous list.
pub trait Receiver<E: ElementKind> {
    const TARGET: Target;

    /// Applies one element, failing with [`BuildError::UnsupportedTarget`] if this
    /// receiver has no use for it.
    fn receive(&mut self, element: E) -> Result<(), BuildError>;

    /// Applies every element in order. The first error aborts.
    fn receive_all<I>(&mut self, elements: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = E>,
    {
        for element in elements {
            self.receive(element)?;
        }
        Ok(())
    }

    fn unsupported(element: &E) -> BuildError {
        log::debug!("rejected {} element on {}", element.kind(), Self::TARGET);
        BuildError::UnsupportedTarget {
            element: element.kind(),
            target: Self::TARGET,
        }
    }
}
