use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_api_url: String,
    pub spotify_access_token: String,
    /// Market used for top tracks, new releases and track details
    pub market: String,
    /// Size of the new-release window sampled in genre mode
    pub new_release_limit: usize,
    pub gateway_timeout_secs: u64,
    /// Fixed seed for reproducible sampling. Unset means entropy-seeded.
    pub rng_seed: Option<u64>,
    pub server_host: String,
    pub server_port: u16,
    /// Allowed CORS origins (comma-separated). Use "*" for any origin (development only).
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        // The token is issued out of band; this service never runs an OAuth flow
        let spotify_access_token = env::var("SPOTIFY_ACCESS_TOKEN").map_err(|_| {
            anyhow::anyhow!(
                "SPOTIFY_ACCESS_TOKEN environment variable must be set \
                (scopes: user-read-recently-played playlist-modify-public)"
            )
        })?;

        let rng_seed = match env::var("CURATOR_RNG_SEED") {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                anyhow::anyhow!("CURATOR_RNG_SEED must be an unsigned integer: {}", e)
            })?),
            Err(_) => None,
        };

        Ok(Config {
            spotify_api_url: env::var("SPOTIFY_API_URL")
                .unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            spotify_access_token,
            market: env::var("CATALOG_MARKET").unwrap_or_else(|_| "US".to_string()),
            new_release_limit: env::var("NEW_RELEASE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(5),
            gateway_timeout_secs: env::var("GATEWAY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            rng_seed,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            cors_origins: parse_origins(
                &env::var("CORS_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000,http://localhost:8000".to_string()),
            ),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_skips_blanks() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }
}
