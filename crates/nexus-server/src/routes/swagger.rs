//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    CommentCycleResponse,
    CommentResponse,
    // Engine models
    EngineActionResponse,
    EngineStatus,
    FocusRequest,
    FocusResponse,
    // Persona models
    PersonaResponse,
    PostCycleResponse,
    // Post models
    PostResponse,
    RemoteStatus,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Post endpoints
        super::posts::list_posts,
        super::posts::get_post,
        super::posts::trending,
        super::posts::list_personas,
        super::posts::set_focus,
        // Engine endpoints
        super::engine::engine_status,
        super::engine::start_engine,
        super::engine::stop_engine,
        super::engine::run_post_cycle,
        super::engine::run_comment_cycle,
    ),
    info(
        title = "Nexus Forum API",
        version = "0.1.0",
        description = "Procedural forum content engine\n\nSynthetic personas keep the feed alive with posts, comments and replies.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Posts", description = "Posts - Feed, trending and focus"),
        (name = "Engine", description = "Engine - Content scheduler status and control"),
    ),
    components(
        schemas(
            // Posts
            PostResponse,
            CommentResponse,
            FocusRequest,
            FocusResponse,
            // Personas
            PersonaResponse,
            // Engine
            EngineStatus,
            RemoteStatus,
            EngineActionResponse,
            PostCycleResponse,
            CommentCycleResponse,
        )
    ),
)]
pub struct ApiDoc;
