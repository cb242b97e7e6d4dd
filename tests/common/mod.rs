#![allow(dead_code, unused_imports)]

pub use query_test_utils::builders;
pub use query_test_utils::fake_launcher;
pub use query_test_utils::{init_tracing, with_timeout};
