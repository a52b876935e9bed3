mod scan_requires;
pub use scan_requires::*;
