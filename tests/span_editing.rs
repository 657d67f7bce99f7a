use mendelgen::{ChromosomeCopy, GeneIndex, GeneSpan, GeneticsError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn five_byte_copy(second: u8) -> ChromosomeCopy {
    ChromosomeCopy::new(
        vec![0b00011011, second, 0b11010110, 0b11000000, 0b00110100],
        GeneIndex::new(20),
    )
}

fn assert_bytes(copy: &ChromosomeCopy, expected: &[u8]) {
    for (i, (actual, expected)) in copy.data().iter().zip(expected).enumerate() {
        assert_eq!(actual, expected, "expected {:08b} to be {:08b} at index {}", actual, expected, i);
    }
}

#[test]
fn test_write_span_with_unaligned_ends() {
    let mut copy = ChromosomeCopy::new(
        vec![0b00011011, 0b10011111, 0b11010110, 0b11000000, 0b00110100],
        GeneIndex::new(20),
    );
    copy.write_into_gene_span(GeneSpan::new(6, 13), &[0b11001100, 0b01010101, 0b10101010])
        .unwrap();
    assert_bytes(
        &copy,
        &[0b00011011, 0b10011100, 0b01010101, 0b10000000, 0b00110100],
    );
}

#[test]
fn test_write_span_on_byte_borders() {
    let mut copy = five_byte_copy(0b10011111);
    copy.write_into_gene_span(GeneSpan::new(4, 12), &[0b11001100, 0b01010101])
        .unwrap();
    assert_bytes(
        &copy,
        &[0b00011011, 0b11001100, 0b01010101, 0b11000000, 0b00110100],
    );
}

#[test]
fn test_write_four_base_pairs_across_border() {
    let mut copy = five_byte_copy(0b10010001);
    copy.write_into_gene_span(GeneSpan::new(6, 10), &[0xFF, 0xFF]).unwrap();
    assert_bytes(
        &copy,
        &[0b00011011, 0b10011111, 0b11110110, 0b11000000, 0b00110100],
    );
}

#[test]
fn test_write_single_base_pair() {
    let mut copy = five_byte_copy(0);
    copy.write_into_gene_span(GeneSpan::new(5, 6), &[0xFF]).unwrap();
    assert_bytes(
        &copy,
        &[0b00011011, 0b00110000, 0b11010110, 0b11000000, 0b00110100],
    );
}

#[test]
fn test_write_two_base_pairs_inside_one_byte() {
    let mut copy = five_byte_copy(0);
    copy.write_into_gene_span(GeneSpan::new(5, 7), &[0xFF]).unwrap();
    assert_bytes(
        &copy,
        &[0b00011011, 0b00111100, 0b11010110, 0b11000000, 0b00110100],
    );
}

#[test]
fn test_samples_ranges_most_significant_first() {
    let copy = ChromosomeCopy::new(vec![0b11000111, 0b10011111, 0b01010110], GeneIndex::new(12));
    assert_eq!(copy.sample_base_pairs(GeneSpan::new(0, 4)).unwrap(), 0b11000111);
    assert_eq!(copy.sample_base_pairs(GeneSpan::new(2, 6)).unwrap(), 0b01111001);
    assert_eq!(copy.sample_base_pairs(GeneSpan::new(5, 10)).unwrap(), 0b0111110101);
}

#[test]
fn test_short_buffer_is_rejected() {
    let mut copy = five_byte_copy(0);
    let result = copy.write_into_gene_span(GeneSpan::new(2, 10), &[0xFF]);
    assert!(matches!(result, Err(GeneticsError::ShapeMismatch(_))));
}

/// Writing back what was sampled from another copy reproduces exactly that
/// span and leaves everything else alone
#[test]
fn test_random_span_writes_only_touch_the_span() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..300 {
        let original = ChromosomeCopy::random(GeneIndex::new(40), &mut rng);
        let start = rng.gen_range(0..40);
        let end = rng.gen_range(start + 1..=40);
        let span = GeneSpan::new(start, end);

        let mut buffer = vec![0u8; span.byte_length()];
        rng.fill(&mut buffer[..]);
        let source = {
            let mut padded = vec![0u8; original.byte_len()];
            padded[span.start.byte_index()..span.start.byte_index() + buffer.len()]
                .copy_from_slice(&buffer);
            ChromosomeCopy::new(padded, GeneIndex::new(40))
        };

        let mut written = original.clone();
        written.write_into_gene_span(span, &buffer).unwrap();

        for index in (0..40).map(GeneIndex::new) {
            let expected = if index >= span.start && index < span.end {
                source.sample_index(index)
            } else {
                original.sample_index(index)
            };
            assert_eq!(written.sample_index(index), expected, "mismatch at {} writing {}", index, span);
        }
    }
}

#[test]
fn test_stored_spec_is_validated_on_load() {
    let path = std::env::temp_dir().join(format!("mendelgen-spec-{}.json", std::process::id()));
    let spec = mendelgen::GenomeSpec::new(vec![mendelgen::ChromosomeSpec::new(
        vec![mendelgen::genes::BooleanSwitchGene::new(mendelgen::GeneticDriver::boolean(0, "spots"), 0).into()],
        0,
    )]);
    spec.save_json(&path).unwrap();

    let result = mendelgen::GenomeSpec::load_json(&path);
    let _ = std::fs::remove_file(&path);
    assert!(matches!(result, Err(GeneticsError::Configuration(_))));
}
