use axum::Json;
use serde_json::{json, Value};

pub const SERVER_NAME: &str = "Link Extractor API";
pub const API_VERSION: &str = "1.0";

/// General information about the server.
pub async fn info_handler() -> Json<Value> {
    Json(json!({
        "server_name": SERVER_NAME,
        "version": API_VERSION,
        "features": [
            "YouTube video data extraction",
            "Webpage content extraction",
            "Token and word counting",
            "Rate-limited API access",
            "API key validation"
        ],
        "developers": [
            {
                "name": "Belto Developers Team",
                "organization": "Belto Inc.",
                "contact_email": "info@beltoss.com"
            }
        ],
        "about": "Belto's Link Extractor API processes YouTube links and general webpages for structured data. Licensed and maintained by Belto Inc.",
        "license": "Belto Inc. All Rights Reserved.",
        "api_key_info": "API keys are required to access this service. To request an API key, contact us at info@beltoss.com.",
        "repository": "https://github.com/BeltoAI/Belto-LinkExtractor.git"
    }))
}
