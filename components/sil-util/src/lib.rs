pub use fxhash::FxHashMap as Map;
pub use fxhash::FxHashSet as Set;
pub use imstr::ImString as Text;
pub type IndexSet<T> = indexmap::IndexSet<T, fxhash::FxBuildHasher>;

pub type Fallible<T> = anyhow::Result<T>;

pub use anyhow::Context;
pub use anyhow::Error;
pub use anyhow::anyhow;
pub use anyhow::bail;

pub mod log;

pub mod typedvec;
