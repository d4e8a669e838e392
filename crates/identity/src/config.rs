/// Endpoint and public key of the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Base URL, e.g. `https://project.supabase.co`. No trailing slash.
    pub url: String,
    /// Public (anon) API key sent as the `apikey` header.
    pub api_key: String,
}

impl ProviderConfig {
    /// Load the provider configuration from the environment.
    ///
    /// | Env Var                  | Fallback            |
    /// |--------------------------|---------------------|
    /// | `IDENTITY_PROVIDER_URL`  | `SUPABASE_URL`      |
    /// | `IDENTITY_PROVIDER_KEY`  | `SUPABASE_ANON_KEY` |
    ///
    /// Returns `None` unless both values are present and non-empty; the
    /// caller then runs in demo mode.
    pub fn from_env() -> Option<Self> {
        let read = |primary: &str, fallback: &str| {
            std::env::var(primary)
                .or_else(|_| std::env::var(fallback))
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let url = read("IDENTITY_PROVIDER_URL", "SUPABASE_URL")?;
        let api_key = read("IDENTITY_PROVIDER_KEY", "SUPABASE_ANON_KEY")?;
        Some(Self::new(url, api_key))
    }

    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_removed() {
        let config = ProviderConfig::new("https://example.supabase.co/", "key");
        assert_eq!(config.url, "https://example.supabase.co");
    }
}
