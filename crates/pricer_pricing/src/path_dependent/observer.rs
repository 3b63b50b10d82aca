//! PathObserver: streaming statistics for path-dependent payoffs.
//!
//! Statistics are accumulated incrementally as prices are observed, so the
//! simulation never stores a full path.
//!
//! - **Arithmetic average**: running sum / count
//! - **Geometric average**: exp(running log sum / count)
//! - **Maximum** / **Minimum**: running extremes (barrier monitoring)

use num_traits::Float;

/// Streaming path observation statistics.
///
/// # Example
///
/// ```
/// use pricer_pricing::path_dependent::PathObserver;
///
/// let mut observer: PathObserver<f64> = PathObserver::new();
/// observer.observe(100.0);
/// observer.observe(110.0);
/// observer.observe(95.0);
/// observer.set_terminal(95.0);
///
/// assert!((observer.arithmetic_average() - 101.6666).abs() < 1e-3);
/// assert_eq!(observer.maximum(), 110.0);
/// assert_eq!(observer.minimum(), 95.0);
/// ```
#[derive(Clone, Debug)]
pub struct PathObserver<T: Float> {
    running_sum: T,
    running_log_sum: T,
    running_max: T,
    running_min: T,
    count: usize,
    terminal: T,
}

impl<T: Float> PathObserver<T> {
    /// Creates a new empty path observer.
    #[inline]
    pub fn new() -> Self {
        Self {
            running_sum: T::zero(),
            running_log_sum: T::zero(),
            running_max: T::neg_infinity(),
            running_min: T::infinity(),
            count: 0,
            terminal: T::zero(),
        }
    }

    /// Observes a price. The price must be positive for the geometric average.
    #[inline]
    pub fn observe(&mut self, price: T) {
        self.observe_weighted(price, 1);
    }

    /// Observes a price `weight` times, as when several fixings share one
    /// grid step. A zero weight is ignored.
    #[inline]
    pub fn observe_weighted(&mut self, price: T, weight: u32) {
        if weight == 0 {
            return;
        }
        let w = T::from(weight).unwrap_or_else(T::one);
        self.running_sum = self.running_sum + price * w;
        self.running_log_sum = self.running_log_sum + price.ln() * w;
        self.running_max = self.running_max.max(price);
        self.running_min = self.running_min.min(price);
        self.count += weight as usize;
    }

    /// Sets the terminal price.
    #[inline]
    pub fn set_terminal(&mut self, price: T) {
        self.terminal = price;
    }

    /// Resets all statistics. Call before each new path.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// `Σ S_i / n`, or zero with no observations.
    #[inline]
    pub fn arithmetic_average(&self) -> T {
        match T::from(self.count) {
            Some(n) if self.count > 0 => self.running_sum / n,
            _ => T::zero(),
        }
    }

    /// `exp(Σ ln S_i / n)`, or zero with no observations.
    #[inline]
    pub fn geometric_average(&self) -> T {
        match T::from(self.count) {
            Some(n) if self.count > 0 => (self.running_log_sum / n).exp(),
            _ => T::zero(),
        }
    }

    /// Maximum observed price, `-inf` if none.
    #[inline]
    pub fn maximum(&self) -> T {
        self.running_max
    }

    /// Minimum observed price, `+inf` if none.
    #[inline]
    pub fn minimum(&self) -> T {
        self.running_min
    }

    /// Terminal price.
    #[inline]
    pub fn terminal(&self) -> T {
        self.terminal
    }

    /// Number of observations, counting weights.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl<T: Float> Default for PathObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}
