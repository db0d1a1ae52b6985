use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Endpoint {
    pub path: &'static str,
    pub method: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CapabilitiesResponse {
    pub endpoints: Vec<Endpoint>,
}

pub const ENDPOINTS: &[(&str, &str, &str)] = &[
    (
        "/read_link",
        "POST",
        "Reads and processes a link (YouTube or webpage).",
    ),
    ("/health", "GET", "Checks the health of the API."),
    ("/capabilities", "GET", "Lists all capabilities of the API."),
    ("/info", "GET", "General information about the server."),
];

pub async fn capabilities_handler() -> Json<CapabilitiesResponse> {
    let endpoints = ENDPOINTS
        .iter()
        .map(|&(path, method, description)| Endpoint {
            path,
            method,
            description,
        })
        .collect();

    Json(CapabilitiesResponse { endpoints })
}
