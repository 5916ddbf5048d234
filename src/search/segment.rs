use super::automaton::Automaton;

/// Half-open range `[begin, end)` of a host sequence accepted by the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub seq_no: usize,
    pub begin: usize,
    pub end: usize,
    pub is_parallel: bool,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn with_orientation(self, is_parallel: bool) -> Self {
        Segment {
            is_parallel,
            ..self
        }
    }
}

/// Splits `text` into maximal segments of at least `min_length` symbols. Segments
/// never start or end on an interruption. `segments` is cleared and refilled so
/// its allocation can be reused between calls; returns the number of segments.
pub fn find_segments(
    automaton: &Automaton,
    text: &[u8],
    seq_no: usize,
    min_length: usize,
    segments: &mut Vec<Segment>,
) -> usize {
    segments.clear();
    let min_length = min_length.max(1);
    let mut cursor = 0;
    while cursor < text.len() {
        let start = cursor;
        let mut state = Automaton::ROOT;
        let mut trailing_interrupts = 0;
        while cursor < text.len() {
            match automaton.next(state, text[cursor]) {
                Some(next) => {
                    trailing_interrupts = if automaton.is_interrupt_state(next) {
                        trailing_interrupts + 1
                    } else {
                        0
                    };
                    state = next;
                    cursor += 1;
                }
                None => break,
            }
        }

        let end = cursor - trailing_interrupts;
        if end - start >= min_length {
            segments.push(Segment {
                seq_no,
                begin: start,
                end,
                is_parallel: true,
            });
        }
        cursor = end + 1;
    }
    segments.len()
}
