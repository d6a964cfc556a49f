pub mod assemble;
pub mod languages;
pub mod select;

pub use assemble::{AssembledCode, assemble_code};
pub use languages::LanguageSpec;
pub use select::{SelectedFile, SelectionLimits, SourceRank, select_files};
