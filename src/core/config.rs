use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenAi,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: LlmProvider,
    pub llm_api_key: String,
    pub llm_model: String,
    pub llm_base_url: Option<String>,
    pub llm_timeout: Duration,
    pub openai_org_id: Option<String>,
    pub bind_addr: SocketAddr,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub ocr_language: String,
    pub tesseract_bin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let provider = match env::var("LLM_PROVIDER")
            .unwrap_or_else(|_| "gemini".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "gemini" => LlmProvider::Gemini,
            "openai" => LlmProvider::OpenAi,
            other => return Err(format!("LLM_PROVIDER: unknown provider '{}'", other)),
        };

        let (llm_api_key, llm_model) = match provider {
            LlmProvider::Gemini => (
                env::var("GEMINI_API_KEY").map_err(|e| format!("GEMINI_API_KEY: {}", e))?,
                env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            ),
            LlmProvider::OpenAi => (
                env::var("OPENAI_API_KEY").map_err(|e| format!("OPENAI_API_KEY: {}", e))?,
                env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            ),
        };

        let bind_ip = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_or("PORT", 5000u16)?;
        let bind_addr = format!("{}:{}", bind_ip, port)
            .parse()
            .map_err(|e| format!("BIND_ADDR: {}", e))?;

        Ok(Self {
            provider,
            llm_api_key,
            llm_model,
            llm_base_url: env::var("LLM_BASE_URL").ok(),
            llm_timeout: Duration::from_secs(parse_or("LLM_TIMEOUT_SECS", 120u64)?),
            openai_org_id: env::var("OPENAI_ORG_ID").ok(),
            bind_addr,
            upload_dir: env::var("UPLOAD_DIR")
                .map_or_else(|_| PathBuf::from("uploads"), PathBuf::from),
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            ocr_language: env::var("OCR_LANGUAGE").unwrap_or_else(|_| "eng".to_string()),
            tesseract_bin: env::var("TESSERACT_BIN").unwrap_or_else(|_| "tesseract".to_string()),
        })
    }
}

fn parse_or<T>(name: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("{}: {}", name, e)),
        Err(_) => Ok(default),
    }
}
