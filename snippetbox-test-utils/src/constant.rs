//! Values shared by tests across the workspace.

/// bcrypt cost for hashes created in tests. The minimum bcrypt accepts, so suites stay fast.
pub const TEST_PASSWORD_COST: u32 = 4;

/// Password used by fixture users unless a test supplies its own.
pub static TEST_PASSWORD: &str = "correct horse battery";
