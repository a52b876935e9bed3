pub const UNRESOLVED_IMPORT: &str = "UNRESOLVED_IMPORT";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const MALFORMED_PACKAGE_JSON: &str = "MALFORMED_PACKAGE_JSON";
pub const AMBIGUOUS_REQUIRE: &str = "AMBIGUOUS_REQUIRE";
pub const WRITER_STATE: &str = "WRITER_STATE";
pub const IO_ERROR: &str = "IO_ERROR";
pub const PANIC: &str = "PANIC";
