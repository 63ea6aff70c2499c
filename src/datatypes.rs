mod sections;
pub use sections::*;
