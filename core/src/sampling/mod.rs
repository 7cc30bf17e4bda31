pub mod random;

pub use random::{DefaultSampler, RandomSampler, RngSampler};
