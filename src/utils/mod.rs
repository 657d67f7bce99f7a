pub mod hamming;
pub mod json;

pub use hamming::{hamming_weight, has_even_hamming_weight};
pub use json::{read_json, write_json};
