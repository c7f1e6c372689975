pub mod history;
pub mod options;
pub mod quote;

pub use history::*;
pub use options::*;
pub use quote::*;
