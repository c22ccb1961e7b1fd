//! Clients - HTTP clients for external APIs
//!
//! Adaptadores de Yandex Cloud detrás de los traits de los servicios.

pub mod speechkit;
pub mod yandex_gpt;
pub mod yandex_search;

pub use speechkit::SpeechKitClient;
pub use yandex_gpt::YandexGptClient;
pub use yandex_search::YandexSearchClient;
