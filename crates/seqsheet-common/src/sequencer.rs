/// Sequencer models whose workflow reads the i5 index in reverse complement.
pub const REVCOMP_SEQUENCERS: &[&str] = &["HiSeq4000", "HiSeq3000", "iSeq", "MiniSeq", "NextSeq"];

pub fn is_revcomp_sequencer(sequencer: &str) -> bool {
    REVCOMP_SEQUENCERS.contains(&sequencer)
}

pub fn reverse_complement(sequence: &str) -> String {
    sequence
        .chars()
        .rev()
        .map(|base| match base {
            'A' => 'T',
            'T' => 'A',
            'G' => 'C',
            'C' => 'G',
            'a' => 't',
            't' => 'a',
            'g' => 'c',
            'c' => 'g',
            other => other,
        })
        .collect()
}

/// Orient an i5 index for the given sequencer.
pub fn i5_index_for(sequencer: &str, index: &str) -> String {
    if is_revcomp_sequencer(sequencer) {
        reverse_complement(index)
    } else {
        index.to_string()
    }
}
