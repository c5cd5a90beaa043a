/// Step counter for a fixed-length dispatch horizon.
///
/// Steps are yielded in order from `0` to `total - 1`. `run` threads an
/// owned run state through every step, so the caller never has to keep a
/// mutable state outside the loop.
///
/// # Examples
///
/// ```
/// use microgrid_sim::sim::clock::Clock;
///
/// let mut clock = Clock::new(4);
/// let visited = clock.run(Vec::new(), |mut seen, step| {
///     seen.push(step);
///     seen
/// });
/// assert_eq!(visited, vec![0, 1, 2, 3]);
/// assert!(clock.is_finished());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    next: usize,
    total: usize,
}

impl Clock {
    /// Creates a clock that will yield `total` steps.
    pub fn new(total: usize) -> Self {
        Self { next: 0, total }
    }

    /// Returns the next step index, or `None` once the horizon is spent.
    pub fn tick(&mut self) -> Option<usize> {
        (self.next < self.total).then(|| {
            self.next += 1;
            self.next - 1
        })
    }

    /// Steps not yet yielded.
    pub fn remaining(&self) -> usize {
        self.total - self.next
    }

    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }

    /// Feeds `state` through `f` once per remaining step and returns the
    /// final state.
    pub fn run<S>(&mut self, mut state: S, mut f: impl FnMut(S, usize) -> S) -> S {
        while let Some(step) = self.tick() {
            state = f(state, step);
        }
        state
    }
}
