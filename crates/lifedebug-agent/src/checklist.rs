// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion state for the report's step-by-step fix list.

use lifedebug_core::LifeDebugError;

/// One flag per step of `step_by_step_fix`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    done: Vec<bool>,
}

impl Checklist {
    /// A checklist of `len` unchecked steps.
    pub fn new(len: usize) -> Self {
        Self {
            done: vec![false; len],
        }
    }

    pub fn len(&self) -> usize {
        self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.done.is_empty()
    }

    pub fn is_done(&self, index: usize) -> bool {
        self.done.get(index).copied().unwrap_or(false)
    }

    pub fn completed(&self) -> usize {
        self.done.iter().filter(|d| **d).count()
    }

    /// Flips step `index` and returns its new state.
    pub fn toggle(&mut self, index: usize) -> Result<bool, LifeDebugError> {
        let len = self.done.len();
        let slot = self.done.get_mut(index).ok_or_else(|| {
            LifeDebugError::invalid_input(format!(
                "step {} does not exist (report has {len} steps)",
                index + 1
            ))
        })?;
        *slot = !*slot;
        Ok(*slot)
    }

    /// Completed share as a whole percentage, rounded half up. 0 when empty.
    pub fn progress_percent(&self) -> u8 {
        let total = self.done.len();
        if total == 0 {
            return 0;
        }
        // Integer form of round(completed / total * 100).
        ((self.completed() * 200 + total) / (total * 2)) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_checklist_is_zero_percent() {
        assert_eq!(Checklist::new(0).progress_percent(), 0);
        assert_eq!(Checklist::default().progress_percent(), 0);
    }

    #[test]
    fn toggle_flips_and_reports_state() {
        let mut list = Checklist::new(3);
        assert!(list.toggle(1).unwrap());
        assert!(list.is_done(1));
        assert!(!list.toggle(1).unwrap());
        assert_eq!(list.completed(), 0);
    }

    #[test]
    fn progress_rounds_like_math_round() {
        let mut list = Checklist::new(3);
        list.toggle(0).unwrap();
        assert_eq!(list.progress_percent(), 33);
        list.toggle(1).unwrap();
        assert_eq!(list.progress_percent(), 67);
        list.toggle(2).unwrap();
        assert_eq!(list.progress_percent(), 100);

        let mut eight = Checklist::new(8);
        eight.toggle(0).unwrap();
        // 12.5 rounds up.
        assert_eq!(eight.progress_percent(), 13);
    }

    #[test]
    fn out_of_range_toggle_is_input_error() {
        let mut list = Checklist::new(2);
        let err = list.toggle(2).unwrap_err();
        assert!(err.is_input_rejection());
        assert!(err.to_string().contains("step 3 does not exist"));
    }

    proptest::proptest! {
        #[test]
        fn progress_is_bounded(len in 0usize..50, toggles in proptest::collection::vec(0usize..60, 0..100)) {
            let mut list = Checklist::new(len);
            for t in toggles {
                let _ = list.toggle(t);
            }
            let pct = list.progress_percent();
            proptest::prop_assert!(pct <= 100);
            proptest::prop_assert_eq!(pct == 100, len > 0 && list.completed() == len);
        }
    }
}
