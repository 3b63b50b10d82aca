//! Option exercise style definitions.

/// When the holder may exercise.
///
/// # Examples
/// ```
/// use pricer_models::instruments::ExerciseStyle;
///
/// assert!(ExerciseStyle::American.allows_early_exercise());
/// assert!(!ExerciseStyle::default().allows_early_exercise());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// Exercise only at expiry.
    #[default]
    European,
    /// Exercise at any time up to expiry.
    American,
}

impl ExerciseStyle {
    /// Returns `true` for American exercise.
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }
}
