//! Services module
//!
//! Lógica de negocio: distancia y ranking, búsqueda de POIs, generación de
//! narración y voz, ensamblado de rutas y entrega de audio.

pub mod audio_service;
pub mod content_service;
pub mod geo;
pub mod poi_service;
pub mod route_service;
pub mod tts_service;

pub use content_service::{ContentError, ContentService, PassageSearch, TextGenerator};
pub use poi_service::PoiService;
pub use route_service::{RouteAudio, RouteService, StopContentGenerator};
pub use tts_service::{SpeechBackend, SpeechError, TtsService};
