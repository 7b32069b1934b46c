pub mod block_extractor;
pub mod output_writer;

pub use block_extractor::{Block, BlockExtractor, Blocks};
pub use output_writer::{DocumentOutcome, OutputWriter};
