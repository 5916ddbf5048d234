/// A named nucleotide sequence with its ordinal position in the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub id: usize,
    pub name: String,
    pub bases: Vec<u8>,
}

impl Sequence {
    /// Bases are stored uppercase; everything else is left to the motif alphabets.
    pub fn new(id: usize, name: impl Into<String>, bases: &[u8]) -> Self {
        Self {
            id,
            name: name.into(),
            bases: bases.to_ascii_uppercase(),
        }
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}
