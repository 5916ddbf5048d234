//! Motif classes and the duplex-purine alphabet they are searched in.
//!
//! Every class translates host bases into `G`/`A` (the purine each base pairs
//! with on the target strand), `Y` for a base that cannot take part in the
//! class, and `N` for anything else. Views of antiparallel TFOs and of
//! reverse-strand TTSs are reversed so that all views read 5'->3' along the
//! purine strand of the target duplex and can be compared position by position.

use std::fmt;

pub const GUANINE: u8 = b'G';
pub const ADENINE: u8 = b'A';
pub const INTERRUPT: u8 = b'Y';
pub const UNKNOWN: u8 = b'N';

pub const VALID_SYMBOLS: &[u8] = &[GUANINE, ADENINE];
pub const INTERRUPT_SYMBOLS: &[u8] = &[INTERRUPT];

#[inline]
pub fn is_purine(symbol: u8) -> bool {
    symbol == GUANINE || symbol == ADENINE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn symbol(self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MotifClass {
    /// GA-rich oligo, binds antiparallel.
    Purine,
    /// CT-rich oligo, binds parallel.
    Pyrimidine,
    /// GT-rich oligo, orientation decided by guanine content.
    Mixed,
    /// Target whose purine strand is the forward strand.
    TtsForward,
    /// Target whose purine strand is the reverse strand.
    TtsReverse,
}

impl MotifClass {
    pub const COUNT: usize = 5;
    pub const ALL: [MotifClass; MotifClass::COUNT] = [
        MotifClass::Purine,
        MotifClass::Pyrimidine,
        MotifClass::Mixed,
        MotifClass::TtsForward,
        MotifClass::TtsReverse,
    ];
    pub const TFO: [MotifClass; 3] = [MotifClass::Purine, MotifClass::Pyrimidine, MotifClass::Mixed];
    pub const TTS: [MotifClass; 2] = [MotifClass::TtsForward, MotifClass::TtsReverse];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> char {
        match self {
            MotifClass::Purine => 'R',
            MotifClass::Pyrimidine => 'Y',
            MotifClass::Mixed => 'M',
            MotifClass::TtsForward => '+',
            MotifClass::TtsReverse => '-',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        MotifClass::ALL
            .into_iter()
            .find(|class| class.symbol() == symbol.to_ascii_uppercase())
    }

    pub fn is_tfo(self) -> bool {
        matches!(
            self,
            MotifClass::Purine | MotifClass::Pyrimidine | MotifClass::Mixed
        )
    }

    /// Oligos are single stranded and always reported on the forward strand.
    pub fn strand(self) -> Strand {
        match self {
            MotifClass::TtsReverse => Strand::Reverse,
            _ => Strand::Forward,
        }
    }

    /// Binding orientations searched for this class (`true` = parallel).
    pub fn orientations(self) -> &'static [bool] {
        match self {
            MotifClass::Purine => &[false],
            MotifClass::Pyrimidine => &[true],
            MotifClass::Mixed => &[true, false],
            MotifClass::TtsForward | MotifClass::TtsReverse => &[true],
        }
    }

    /// Whether the view of a motif of this class runs against the host sequence.
    pub fn is_reversed(self, is_parallel: bool) -> bool {
        match self {
            MotifClass::Purine | MotifClass::Pyrimidine | MotifClass::Mixed => !is_parallel,
            MotifClass::TtsForward => false,
            MotifClass::TtsReverse => true,
        }
    }

    #[inline]
    pub fn encode(self, base: u8) -> u8 {
        let base = match base.to_ascii_uppercase() {
            b'U' => b'T',
            other => other,
        };
        match (self, base) {
            (MotifClass::Purine | MotifClass::TtsForward, b'G') => GUANINE,
            (MotifClass::Purine | MotifClass::TtsForward, b'A') => ADENINE,
            (MotifClass::Purine | MotifClass::TtsForward, b'C' | b'T') => INTERRUPT,
            (MotifClass::Pyrimidine | MotifClass::TtsReverse, b'C') => GUANINE,
            (MotifClass::Pyrimidine | MotifClass::TtsReverse, b'T') => ADENINE,
            (MotifClass::Pyrimidine | MotifClass::TtsReverse, b'G' | b'A') => INTERRUPT,
            (MotifClass::Mixed, b'G') => GUANINE,
            (MotifClass::Mixed, b'T') => ADENINE,
            (MotifClass::Mixed, b'A' | b'C') => INTERRUPT,
            _ => UNKNOWN,
        }
    }

    /// Translates `bases` in host order into `out`, replacing its contents.
    pub fn encode_into(self, bases: &[u8], out: &mut Vec<u8>) {
        out.clear();
        out.extend(bases.iter().map(|&base| self.encode(base)));
    }

    /// Translates `bases` into `out` in view order for the given orientation.
    pub fn view_into(self, bases: &[u8], is_parallel: bool, out: &mut Vec<u8>) {
        self.encode_into(bases, out);
        if self.is_reversed(is_parallel) {
            out.reverse();
        }
    }
}

impl fmt::Display for MotifClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
