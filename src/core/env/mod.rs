mod index;

pub use index::ExecutableIndex;
