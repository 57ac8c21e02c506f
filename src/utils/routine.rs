//! Candidate call-shape normalization.
//!
//! Benchmarked functions can be written in four shapes. Each one is wrapped
//! at registration time into a [`Routine`], and the sample collector only
//! ever calls [`Routine::invoke`]: "run `count` iterations, tell me how many
//! you actually ran".

/// Which normalization a [`Routine`] applies
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// `FnMut(u64) -> u64`: the candidate batches itself and reports its count
    Batched,
    /// `FnMut(u64)`: the candidate honors the requested count exactly
    Exact,
    /// `FnMut() -> u64`: one call is a unit of work worth the returned iterations
    Counted,
    /// `FnMut()`: one call is one iteration
    Single,
}

/// A candidate function normalized to `count -> count`
pub enum Routine<'a> {
    Batched(Box<dyn FnMut(u64) -> u64 + 'a>),
    Exact(Box<dyn FnMut(u64) + 'a>),
    Counted(Box<dyn FnMut() -> u64 + 'a>),
    Single(Box<dyn FnMut() + 'a>),
}

impl<'a> Routine<'a> {
    pub fn batched<F: FnMut(u64) -> u64 + 'a>(f: F) -> Self {
        Routine::Batched(Box::new(f))
    }

    pub fn exact<F: FnMut(u64) + 'a>(f: F) -> Self {
        Routine::Exact(Box::new(f))
    }

    pub fn counted<F: FnMut() -> u64 + 'a>(f: F) -> Self {
        Routine::Counted(Box::new(f))
    }

    pub fn single<F: FnMut() + 'a>(f: F) -> Self {
        Routine::Single(Box::new(f))
    }

    pub fn shape(&self) -> Shape {
        match self {
            Routine::Batched(_) => Shape::Batched,
            Routine::Exact(_) => Shape::Exact,
            Routine::Counted(_) => Shape::Counted,
            Routine::Single(_) => Shape::Single,
        }
    }

    /// Run the candidate for `count` requested iterations.
    ///
    /// Returns the number of iterations actually performed, which for
    /// self-batching candidates may differ from the request.
    #[inline]
    pub fn invoke(&mut self, count: u64) -> u64 {
        match self {
            Routine::Batched(f) => f(count),
            Routine::Exact(f) => {
                f(count);
                count
            }
            Routine::Counted(f) => {
                let mut done = 0u64;
                for _ in 0..count {
                    done = done.saturating_add(f());
                }
                done
            }
            Routine::Single(f) => {
                for _ in 0..count {
                    f();
                }
                count
            }
        }
    }
}

impl std::fmt::Debug for Routine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Routine").field(&self.shape()).finish()
    }
}

// Markers that keep the four closure impls of `IntoRoutine` apart.
#[doc(hidden)]
pub struct BatchedMarker;
#[doc(hidden)]
pub struct ExactMarker;
#[doc(hidden)]
pub struct CountedMarker;
#[doc(hidden)]
pub struct SingleMarker;
#[doc(hidden)]
pub struct RoutineMarker;

/// Conversion from any supported candidate shape into a [`Routine`].
///
/// Closures need their argument annotated (`|n: u64| ...`) so the right
/// shape is picked.
pub trait IntoRoutine<'a, Marker> {
    fn into_routine(self) -> Routine<'a>;
}

impl<'a> IntoRoutine<'a, RoutineMarker> for Routine<'a> {
    fn into_routine(self) -> Routine<'a> {
        self
    }
}

impl<'a, F: FnMut(u64) -> u64 + 'a> IntoRoutine<'a, BatchedMarker> for F {
    fn into_routine(self) -> Routine<'a> {
        Routine::batched(self)
    }
}

impl<'a, F: FnMut(u64) + 'a> IntoRoutine<'a, ExactMarker> for F {
    fn into_routine(self) -> Routine<'a> {
        Routine::exact(self)
    }
}

impl<'a, F: FnMut() -> u64 + 'a> IntoRoutine<'a, CountedMarker> for F {
    fn into_routine(self) -> Routine<'a> {
        Routine::counted(self)
    }
}

impl<'a, F: FnMut() + 'a> IntoRoutine<'a, SingleMarker> for F {
    fn into_routine(self) -> Routine<'a> {
        Routine::single(self)
    }
}
