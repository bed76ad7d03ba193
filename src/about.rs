pub const CUTSITE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CUTSITE_BUILD_N: &str = env!("CUTSITE_BUILD_N");

pub fn version_cli_text() -> String {
    format!(
        "cutsite {}\nBuild {}\nRestriction site mapping for linear and circular DNA",
        CUTSITE_VERSION, CUTSITE_BUILD_N
    )
}
