//! Persona - The synthetic cast as served over HTTP

use serde::Serialize;
use utoipa::ToSchema;

use nexus::Persona;

#[derive(Debug, Serialize, ToSchema)]
pub struct PersonaResponse {
    pub name: String,
    pub personality: String,
    pub topics: Vec<String>,
    pub tone: String,
    pub tier: String,
}

impl From<&Persona> for PersonaResponse {
    fn from(persona: &Persona) -> Self {
        Self {
            name: persona.name.clone(),
            personality: persona.personality.clone(),
            topics: persona.topics.clone(),
            tone: persona.tone.to_string(),
            tier: persona.tier.to_string(),
        }
    }
}
