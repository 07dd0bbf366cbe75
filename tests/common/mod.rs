#![allow(unused_imports)]

pub use autobuild_test_utils::init_tracing;
pub use autobuild_test_utils::with_timeout;
pub use autobuild_test_utils::builders;
pub use autobuild_test_utils::fake_executor;
pub use autobuild_test_utils::recording_backend;
