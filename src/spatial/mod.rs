
pub use hit_test::{find_nearest, HitTestResult, HitTester};
