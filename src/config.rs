use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// USDA FoodData Central — the primary search provider.
#[derive(Debug, Clone, Deserialize)]
pub struct FdcConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Open Food Facts — the secondary search provider and the only barcode
/// upstream. No credential required.
#[derive(Debug, Clone, Deserialize)]
pub struct OffConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub fdc: FdcConfig,
    pub off: OffConfig,
    pub gemini: GeminiConfig,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_u64_or(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: env_or("JWT_ISSUER", "nutriscan"),
            audience: env_or("JWT_AUDIENCE", "nutriscan-users"),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let fdc = FdcConfig {
            api_key: std::env::var("FDC_API_KEY").ok(),
            base_url: env_or("FDC_BASE_URL", "https://api.nal.usda.gov/fdc"),
            timeout_secs: env_u64_or("FDC_TIMEOUT_SECS", 15),
        };
        let off = OffConfig {
            base_url: env_or("OFF_BASE_URL", "https://world.openfoodfacts.org"),
            user_agent: env_or("OFF_USER_AGENT", "NutriScan/1.0"),
            timeout_secs: env_u64_or("OFF_TIMEOUT_SECS", 20),
        };
        let gemini = GeminiConfig {
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            base_url: env_or(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com/v1beta",
            ),
            model: env_or("GEMINI_MODEL", "gemini-2.5-flash"),
        };
        Ok(Self {
            database_url,
            jwt,
            fdc,
            off,
            gemini,
        })
    }
}
