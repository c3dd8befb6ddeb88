pub mod plate;
pub mod scrub;
pub mod sequencer;

pub use plate::{PlateError, well_to_quadrant};
pub use scrub::scrub_name;
pub use sequencer::{REVCOMP_SEQUENCERS, i5_index_for, is_revcomp_sequencer, reverse_complement};
