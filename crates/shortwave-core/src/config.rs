use jiff::SignedDuration;
use typed_builder::TypedBuilder;

/// Explicit configuration for the shortener services.
///
/// Every knob the original system kept as module-level globals lives
/// here and is passed into the components that need it; there is no
/// ambient state.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ServiceConfig {
    /// Host prefix baked into stored short values.
    #[builder(default = String::from("localhost:8000"), setter(into))]
    pub base_url: String,

    /// How long a new link resolves before it is retired.
    #[builder(default = SignedDuration::from_hours(24))]
    pub link_ttl: SignedDuration,

    /// How long an issued access token stays valid.
    #[builder(default = SignedDuration::from_mins(30))]
    pub token_ttl: SignedDuration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
