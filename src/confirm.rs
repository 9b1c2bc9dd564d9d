//! Yes/no confirmation prompts.
//!
//! Destructive actions such as deleting a plan ask a [`Confirm`]
//! implementation before doing anything. A terminal front end prompts the
//! user; tests use [`AutoConfirm`] or a closure.

/// A blocking yes/no confirmation capability.
pub trait Confirm {
    /// Ask the user to confirm `prompt`. Returns `true` to proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt with a fixed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

impl AutoConfirm {
    /// Always proceed.
    pub const YES: Self = Self(true);
    /// Never proceed.
    pub const NO: Self = Self(false);
}

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
