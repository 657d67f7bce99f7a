use super::index::GeneIndex;
use super::span::GeneSpan;
use crate::error::{GeneticsError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Bytes needed to hold base pairs `[0, end)`
pub(crate) fn byte_length_for(end: GeneIndex) -> usize {
    if !end.is_valid() {
        return 0;
    }
    ((end.0 + 3) / 4) as usize
}

/// One physical copy of a chromosome: a packed buffer of 2-bit base pairs.
///
/// `end` marks the logical end of the genetic data so a trailing partial byte
/// can be told apart from real base pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromosomeCopy {
    data: Vec<u8>,
    end: GeneIndex,
}

impl ChromosomeCopy {
    pub fn new(data: Vec<u8>, end: GeneIndex) -> Self {
        Self { data, end }
    }

    pub fn zeroed(end: GeneIndex) -> Self {
        Self::new(vec![0; byte_length_for(end)], end)
    }

    pub fn random<R: Rng>(end: GeneIndex, rng: &mut R) -> Self {
        let mut data = vec![0u8; byte_length_for(end)];
        rng.fill(&mut data[..]);
        Self::new(data, end)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn end_index(&self) -> GeneIndex {
        self.end
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    fn check_bounds(&self, span: &GeneSpan) -> Result<()> {
        let capacity = self.data.len();
        if !span.is_valid() || span.start > span.end || span.end.0 as usize > capacity * 4 {
            return Err(GeneticsError::SpanOutOfBounds {
                span: span.to_string(),
                capacity,
            });
        }
        Ok(())
    }

    /// Read one base pair. Panics if `index` lies outside the buffer.
    pub fn sample_index(&self, index: GeneIndex) -> u8 {
        (self.data[index.byte_index()] >> index.shift_in_byte()) & 0b11
    }

    /// Read one base pair, or `None` if `index` lies outside the buffer
    pub fn checked_sample_index(&self, index: GeneIndex) -> Option<u8> {
        if !index.is_valid() {
            return None;
        }
        let byte = self.data.get(index.byte_index())?;
        Some((byte >> index.shift_in_byte()) & 0b11)
    }

    /// Overwrite one base pair. Only the low two bits of `base_pair` are used.
    pub fn set_base_pair(&mut self, index: GeneIndex, base_pair: u8) {
        let shift = index.shift_in_byte();
        let mask = 0b11u8 << shift;
        let byte = &mut self.data[index.byte_index()];
        *byte = (*byte & !mask) | ((base_pair << shift) & mask);
    }

    /// Overwrite one base pair, or return `None` if `index` lies outside the buffer
    pub fn checked_set_base_pair(&mut self, index: GeneIndex, base_pair: u8) -> Option<()> {
        if !index.is_valid() || index.byte_index() >= self.data.len() {
            return None;
        }
        self.set_base_pair(index, base_pair);
        Some(())
    }

    /// Pack up to 32 base pairs into an integer, first base pair most significant
    pub fn sample_base_pairs(&self, span: GeneSpan) -> Result<u64> {
        if span.len() > 32 {
            return Err(GeneticsError::SpanTooLarge { length: span.len() });
        }
        self.check_bounds(&span)?;

        Ok(span
            .indices()
            .fold(0u64, |acc, index| (acc << 2) | self.sample_index(index) as u64))
    }

    /// Copy the bits covered by `span` out of `buffer`.
    ///
    /// `buffer[0]` lines up with the byte holding `span.start`; bits of the
    /// boundary bytes that fall outside the span are left untouched.
    pub fn write_into_gene_span(&mut self, span: GeneSpan, buffer: &[u8]) -> Result<()> {
        if span.is_empty() {
            return Ok(());
        }
        self.check_bounds(&span)?;
        let byte_length = span.byte_length();
        if buffer.len() < byte_length {
            return Err(GeneticsError::ShapeMismatch(format!(
                "write into {} needs {} bytes, buffer holds {}",
                span,
                byte_length,
                buffer.len()
            )));
        }

        let first_byte = span.start.byte_index();
        let last_byte = (span.end - 1).byte_index();
        let first_mask = 0xFFu8 >> (span.start.index_inside_byte() * 2);
        let last_mask = 0xFFu8 << ((span.end - 1).shift_in_byte());

        if first_byte == last_byte {
            let mask = first_mask & last_mask;
            self.data[first_byte] = (self.data[first_byte] & !mask) | (buffer[0] & mask);
            return Ok(());
        }

        self.data[first_byte] = (self.data[first_byte] & !first_mask) | (buffer[0] & first_mask);
        self.data[first_byte + 1..last_byte]
            .copy_from_slice(&buffer[1..last_byte - first_byte]);
        let tail = buffer[last_byte - first_byte];
        self.data[last_byte] = (self.data[last_byte] & !last_mask) | (tail & last_mask);

        Ok(())
    }
}

/// Every homologous copy of one chromosome. All copies share a length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chromosome {
    copies: Vec<ChromosomeCopy>,
}

impl Chromosome {
    pub fn new(copies: Vec<ChromosomeCopy>) -> Result<Self> {
        if let Some(first) = copies.first() {
            let mismatched = copies
                .iter()
                .any(|c| c.end_index() != first.end_index() || c.byte_len() != first.byte_len());
            if mismatched {
                return Err(GeneticsError::ShapeMismatch(
                    "all homologous copies must be equal in size".to_string(),
                ));
            }
        }
        Ok(Self { copies })
    }

    /// Fill every copy with random base pairs
    pub fn generate_base<R: Rng>(copy_count: usize, genetic_size: GeneIndex, rng: &mut R) -> Self {
        Self {
            copies: (0..copy_count)
                .map(|_| ChromosomeCopy::random(genetic_size, rng))
                .collect(),
        }
    }

    /// Simulate meiosis across `parents`.
    ///
    /// Each output copy is assembled byte by byte: a parent is drawn for the
    /// byte, then every base pair in it is drawn from a random copy of that parent.
    pub fn recombine<R: Rng>(parents: &[&Chromosome], rng: &mut R) -> Result<Chromosome> {
        let reference = parents.first().ok_or_else(|| {
            GeneticsError::ShapeMismatch("recombination needs at least one parent".to_string())
        })?;
        let copy_count = reference.copy_count();
        let end = reference.end_index();
        let byte_len = reference.byte_len();

        if parents.iter().any(|p| {
            p.copy_count() != copy_count || p.end_index() != end || p.byte_len() != byte_len
        }) {
            return Err(GeneticsError::ShapeMismatch(
                "all parent chromosomes must be equal in size".to_string(),
            ));
        }

        let mut copies = Vec::with_capacity(copy_count);
        for _ in 0..copy_count {
            let mut data = vec![0u8; byte_len];
            for (byte_index, byte) in data.iter_mut().enumerate() {
                let parent = parents[rng.gen_range(0..parents.len())];
                for slot in 0..4 {
                    let window = 0b1100_0000u8 >> (slot * 2);
                    let source = &parent.copies[rng.gen_range(0..copy_count)];
                    *byte |= source.data[byte_index] & window;
                }
            }
            copies.push(ChromosomeCopy::new(data, end));
        }

        Ok(Chromosome { copies })
    }

    pub fn copies(&self) -> &[ChromosomeCopy] {
        &self.copies
    }

    pub fn copies_mut(&mut self) -> &mut [ChromosomeCopy] {
        &mut self.copies
    }

    pub fn copy_count(&self) -> usize {
        self.copies.len()
    }

    pub fn end_index(&self) -> GeneIndex {
        self.copies
            .first()
            .map(|c| c.end_index())
            .unwrap_or(GeneIndex::new(0))
    }

    pub fn byte_len(&self) -> usize {
        self.copies.first().map(|c| c.byte_len()).unwrap_or(0)
    }

    /// Copy the first copy's bytes over every other copy
    pub fn enforce_invariance_over_homologous_copies(&mut self) {
        if let Some((first, rest)) = self.copies.split_first_mut() {
            for copy in rest {
                copy.data.copy_from_slice(&first.data);
            }
        }
    }
}
