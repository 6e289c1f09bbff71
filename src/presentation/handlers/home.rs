use axum::Json;
use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct PortalSection {
    pub title: &'static str,
    pub endpoint: &'static str,
}

#[derive(Serialize)]
pub struct PortalResponse {
    pub title: &'static str,
    pub sections: Vec<PortalSection>,
}

pub async fn home_handler() -> impl IntoResponse {
    Json(PortalResponse {
        title: "Horse Racing Portal",
        sections: vec![
            PortalSection {
                title: "Race card analysis",
                endpoint: "/api/races/analyze",
            },
            PortalSection {
                title: "Pools analysis",
                endpoint: "/api/pools/analyze",
            },
            PortalSection {
                title: "Site summary analysis",
                endpoint: "/api/site/analyze",
            },
            PortalSection {
                title: "Upload & split PDF",
                endpoint: "/api/splits",
            },
            PortalSection {
                title: "Manage files",
                endpoint: "/api/manage",
            },
        ],
    })
}
