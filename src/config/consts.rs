/// Separator used when rendering a namespace path
pub const PATH_SEPARATOR: &str = ".";
/// Alternate separator accepted when parsing (`Todo::Application`)
pub const SCOPE_SEPARATOR: &str = "::";
/// Method every constructible module runs on instantiation
pub const INITIALIZE: &str = "initialize";
/// Log filter used when neither `RUST_LOG` nor the manifest sets one
pub const DEFAULT_LOG_FILTER: &str = "info";
