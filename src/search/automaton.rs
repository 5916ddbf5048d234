//! Deterministic automaton accepting runs of valid symbols that may be broken
//! by at most `max_interrupts` consecutive interrupting symbols.
//!
//! State layout: 0 is the root, 1 the valid state, and `1 + k` the state after
//! `k` consecutive interruptions. Missing transitions reject.

const DEAD: u8 = u8::MAX;

#[derive(Debug, Clone)]
pub struct Automaton {
    transitions: Vec<[u8; 256]>,
}

impl Automaton {
    pub const ROOT: u8 = 0;
    pub const VALID: u8 = 1;

    pub fn new(valid: &[u8], invalid: &[u8], max_interrupts: usize) -> Self {
        assert!(
            max_interrupts + 2 < DEAD as usize,
            "Too many consecutive interruptions: {}",
            max_interrupts
        );
        let num_states = 2 + max_interrupts;
        let mut transitions = vec![[DEAD; 256]; num_states];

        for state in Self::VALID as usize..num_states {
            let next_interrupt = state + 1;
            if next_interrupt < num_states {
                for &symbol in invalid {
                    transitions[state][symbol as usize] = next_interrupt as u8;
                }
            }
        }
        // Valid symbols win over a symbol listed in both sets
        for row in transitions.iter_mut() {
            for &symbol in valid {
                row[symbol as usize] = Self::VALID;
            }
        }

        Automaton { transitions }
    }

    /// The automaton used by every search: purines are valid, `Y` interrupts.
    pub fn triplex(max_interrupts: usize) -> Self {
        use super::alphabet::{INTERRUPT_SYMBOLS, VALID_SYMBOLS};
        Self::new(VALID_SYMBOLS, INTERRUPT_SYMBOLS, max_interrupts)
    }

    #[inline]
    pub fn next(&self, state: u8, symbol: u8) -> Option<u8> {
        match self.transitions[state as usize][symbol as usize] {
            DEAD => None,
            next => Some(next),
        }
    }

    #[inline]
    pub fn is_interrupt_state(&self, state: u8) -> bool {
        state > Self::VALID
    }

    /// Runs the automaton over `text` from the root.
    #[cfg(test)]
    pub(crate) fn accepts(&self, text: &[u8]) -> bool {
        let mut state = Self::ROOT;
        for &symbol in text {
            match self.next(state, symbol) {
                Some(next) => state = next,
                None => return false,
            }
        }
        state == Self::VALID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_only_leaves_on_valid_symbols() {
        let automaton = Automaton::triplex(2);
        assert_eq!(automaton.next(Automaton::ROOT, b'G'), Some(Automaton::VALID));
        assert_eq!(automaton.next(Automaton::ROOT, b'Y'), None);
        assert_eq!(automaton.next(Automaton::ROOT, b'N'), None);
    }

    #[test]
    fn interruption_chain_is_bounded() {
        let automaton = Automaton::triplex(2);
        let first = automaton.next(Automaton::VALID, b'Y').unwrap();
        let second = automaton.next(first, b'Y').unwrap();
        assert!(automaton.is_interrupt_state(first));
        assert!(automaton.is_interrupt_state(second));
        assert_eq!(automaton.next(second, b'Y'), None);
        assert_eq!(automaton.next(second, b'A'), Some(Automaton::VALID));
    }

    #[test]
    fn accepts_interrupted_runs() {
        let automaton = Automaton::triplex(1);
        assert!(automaton.accepts(b"GGAYGA"));
        assert!(automaton.accepts(b"GYAYG"));
        assert!(!automaton.accepts(b"GGYYA"));
        assert!(!automaton.accepts(b"YGA"));
        assert!(!automaton.accepts(b"GAY"));
        assert!(!automaton.accepts(b"GANGA"));
    }

    #[test]
    fn zero_interrupts_rejects_any_interruption() {
        let automaton = Automaton::triplex(0);
        assert!(automaton.accepts(b"GAGA"));
        assert!(!automaton.accepts(b"GAYGA"));
    }

    #[test]
    fn empty_alphabets_never_leave_root() {
        let automaton = Automaton::new(b"", b"", 3);
        for symbol in [b'G', b'A', b'Y', b'N'] {
            assert_eq!(automaton.next(Automaton::ROOT, symbol), None);
        }
        assert!(!automaton.accepts(b"GA"));
    }
}
