pub mod audio_dto;
pub mod poi_dto;
pub mod route_dto;
