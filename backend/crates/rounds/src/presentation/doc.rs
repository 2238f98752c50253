//! OpenAPI documentation for the rounds endpoints.
//!
//! Served by the binary under `/docs` in development only.

use utoipa::OpenApi;

use crate::presentation::dto::{
    CoordenadaAdminResponse, CoordenadaUsuarioRequest, CoordenadaUsuarioResponse, LoginRequest,
    LoginResponse, PingResponse, ProblemDetails, RondaAsignadaResponse, RondaAsignadaResumen,
    RondaCoordenadaResponse, RondaEjecutadaResponse, RondasAsignadasResponse, SubirRondaRequest,
    SubirRondaResponse, TipoRondaResponse, TipoUsuarioResponse, UsuarioResponse,
};

/// OpenAPI document for the rounds API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "API Sistema de Rondas",
        description = "Login sync, assigned rounds and completed round uploads for the security rounds mobile app."
    ),
    paths(
        crate::presentation::handlers::login,
        crate::presentation::handlers::ping,
        crate::presentation::handlers::submit_round,
        crate::presentation::handlers::assigned_rounds,
        crate::presentation::handlers::completed_round,
    ),
    components(schemas(
        LoginRequest,
        LoginResponse,
        UsuarioResponse,
        TipoUsuarioResponse,
        TipoRondaResponse,
        CoordenadaAdminResponse,
        RondaAsignadaResponse,
        RondaCoordenadaResponse,
        PingResponse,
        SubirRondaRequest,
        CoordenadaUsuarioRequest,
        SubirRondaResponse,
        RondasAsignadasResponse,
        RondaAsignadaResumen,
        RondaEjecutadaResponse,
        CoordenadaUsuarioResponse,
        ProblemDetails,
    )),
    tags(
        (name = "auth", description = "Login and liveness"),
        (name = "rondas", description = "Round schedule and uploads")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/login",
            "/api/ping",
            "/api/rondas/subir",
            "/api/rondas/asignadas/{id_usuario}",
            "/api/rondas/ejecutadas/{id_ronda_usuario}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_problem_details_schema_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.schemas.contains_key("ProblemDetails"));
        assert!(components.schemas.contains_key("LoginResponse"));
    }
}
