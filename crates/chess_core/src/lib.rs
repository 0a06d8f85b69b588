pub mod board;
pub mod movegen;
pub mod moves;
pub mod perft;
pub mod types;

// Re-export the core game model
pub use board::*;
pub use movegen::*;
pub use moves::*;
pub use perft::perft;
pub use types::*;
