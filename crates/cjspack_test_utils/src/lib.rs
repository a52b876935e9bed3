pub mod test_config;
pub use test_config::TestConfig;
mod recording_fs;
pub use recording_fs::*;

#[macro_export]
macro_rules! impl_serde_default {
  ($name:ident) => {
    impl Default for $name {
      fn default() -> Self {
        serde_json::from_str("{}").expect("all fields of a test config have defaults")
      }
    }
  };
}
