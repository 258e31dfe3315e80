//! Checklist completion.

use serde::Serialize;

use super::checklist::{Checklist, ChecklistItem};

const CHECKLIST_LEN: usize = ChecklistItem::ALL.len();
const _: () = assert!(CHECKLIST_LEN > 0);

/// How far an application is through its checklist.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// `round(100 * completed / total)`, halves rounded up. Always in `0..=100`.
    pub percent: u8,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

/// Progress over an arbitrary flag set. `None` when the set is empty.
pub fn progress_of(flags: &[bool]) -> Option<Progress> {
    if flags.is_empty() {
        return None;
    }
    let completed = flags.iter().filter(|done| **done).count();
    Some(Progress {
        completed,
        total: flags.len(),
        percent: rounded_percent(completed, flags.len()),
    })
}

// total must be non-zero and completed <= total.
fn rounded_percent(completed: usize, total: usize) -> u8 {
    ((200 * completed + total) / (2 * total)) as u8
}

impl Checklist {
    pub fn progress(&self) -> Progress {
        let completed = self.values().iter().filter(|done| **done).count();
        Progress {
            completed,
            total: CHECKLIST_LEN,
            percent: rounded_percent(completed, CHECKLIST_LEN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_of_eleven_is_fifty_five_percent() {
        let mut checklist = Checklist::default();
        for item in ChecklistItem::ALL.into_iter().take(6) {
            checklist.set(item, true);
        }
        let progress = checklist.progress();
        assert_eq!(progress.completed, 6);
        assert_eq!(progress.total, 11);
        assert_eq!(progress.percent, 55);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_bounds() {
        assert_eq!(Checklist::default().progress().percent, 0);
        let full = Checklist::complete().progress();
        assert_eq!(full.percent, 100);
        assert!(full.is_complete());
    }

    #[test]
    fn test_rounds_half_up() {
        // 1 of 8 = 12.5%
        let mut flags = [false; 8];
        flags[0] = true;
        assert_eq!(progress_of(&flags).unwrap().percent, 13);
        // 1 of 3 = 33.3%
        assert_eq!(progress_of(&[true, false, false]).unwrap().percent, 33);
        // 2 of 3 = 66.7%
        assert_eq!(progress_of(&[true, true, false]).unwrap().percent, 67);
    }

    #[test]
    fn test_empty_flag_set_has_no_progress() {
        assert_eq!(progress_of(&[]), None);
    }
}
