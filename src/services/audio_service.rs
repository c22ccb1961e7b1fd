//! Entrega de audio por ruta
//!
//! Clasifica la disponibilidad del audio de una ruta (nada / parcial /
//! completo) en cada petición y, cuando hay varias paradas listas, las
//! concatena byte a byte en un único MP3.
//!
//! La concatenación es ingenua: no re-codifica ni respeta fronteras de
//! frame, se apoya en la tolerancia de MP3 a streams pegados.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::models::RouteStop;

/// Estado del audio de una ruta en el momento de la consulta
#[derive(Debug, Clone, PartialEq)]
pub enum AudioReadiness {
    /// Ninguna parada tiene audio
    NoneReady { pending: Vec<String> },
    /// Algunas paradas tienen audio
    Partial {
        ready: usize,
        total: usize,
        pending: Vec<String>,
    },
    /// Todas las paradas tienen audio, en orden de visita
    Ready { files: Vec<PathBuf> },
}

/// Clasifica las paradas (ya ordenadas por `order`)
pub fn classify(stops: &[RouteStop]) -> AudioReadiness {
    let mut files = Vec::new();
    let mut pending = Vec::new();

    for stop in stops {
        match &stop.content {
            Some(content) if stop.audio_ready() => files.push(PathBuf::from(&content.audio_path)),
            _ => pending.push(stop.poi.name.clone()),
        }
    }

    if files.is_empty() {
        AudioReadiness::NoneReady { pending }
    } else if !pending.is_empty() {
        AudioReadiness::Partial {
            ready: files.len(),
            total: stops.len(),
            pending,
        }
    } else {
        AudioReadiness::Ready { files }
    }
}

/// Ruta del MP3 combinado de una ruta
pub fn merged_audio_path(audio_dir: &Path, route_id: Uuid) -> PathBuf {
    audio_dir.join(format!("route_{}_full.mp3", route_id))
}

/// Fallos al combinar los MP3 de una ruta
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to create output file {}: {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },

    #[error("failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to copy {}: {source}", .path.display())]
    Copy { path: PathBuf, source: io::Error },

    #[error("failed to flush output file: {0}")]
    Flush(io::Error),

    #[error("failed to move merged file into {}: {source}", .path.display())]
    Persist { path: PathBuf, source: io::Error },
}

/// Concatena `files` en `output`, en el orden dado.
///
/// Se escribe en un temporal propio de la petición y se renombra al final,
/// así un lector nunca ve `output` a medio escribir. Un fallo deja el
/// temporal en disco.
pub async fn merge_audio_files(files: &[PathBuf], output: &Path) -> Result<PathBuf, MergeError> {
    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| MergeError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let partial = partial_path(output);
    let mut out_file = File::create(&partial).await.map_err(|source| MergeError::Create {
        path: partial.clone(),
        source,
    })?;

    for path in files {
        let mut in_file = File::open(path).await.map_err(|source| MergeError::Open {
            path: path.clone(),
            source,
        })?;

        tokio::io::copy(&mut in_file, &mut out_file)
            .await
            .map_err(|source| MergeError::Copy {
                path: path.clone(),
                source,
            })?;
    }

    out_file.flush().await.map_err(MergeError::Flush)?;
    drop(out_file);

    tokio::fs::rename(&partial, output)
        .await
        .map_err(|source| MergeError::Persist {
            path: output.to_path_buf(),
            source,
        })?;

    Ok(output.to_path_buf())
}

/// `<output>.<uuid>.part`, en el mismo directorio para que el rename sea atómico
fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}.part", Uuid::new_v4()));
    output.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewContent, NewPoi, Waypoint};
    use chrono::Utc;

    fn stop(name: &str, order: i32, audio_path: Option<&str>) -> RouteStop {
        let poi = NewPoi {
            name: name.to_string(),
            description: String::new(),
            latitude: 55.75,
            longitude: 37.62,
            epoch: "soviet".into(),
            category: "art".into(),
            importance: 5,
            year_built: None,
            architect: None,
            style: None,
            photos: vec![],
            wikipedia_url: None,
            metadata: None,
        }
        .into_poi();

        let waypoint = Waypoint {
            id: Uuid::new_v4(),
            route_id: Uuid::new_v4(),
            poi_id: poi.id,
            order,
            created_at: Utc::now(),
        };

        let content = audio_path.map(|path| {
            NewContent {
                waypoint_id: waypoint.id,
                text: "Текст".into(),
                audio_url: String::new(),
                audio_path: path.to_string(),
                duration: 1,
                photos: vec![],
            }
            .into_content()
        });

        RouteStop { waypoint, poi, content }
    }

    #[test]
    fn test_none_ready() {
        let stops = vec![stop("A", 1, None), stop("B", 2, None), stop("C", 3, None)];
        assert_eq!(
            classify(&stops),
            AudioReadiness::NoneReady {
                pending: vec!["A".into(), "B".into(), "C".into()]
            }
        );
    }

    #[test]
    fn test_empty_audio_path_is_not_ready() {
        let stops = vec![stop("A", 1, Some("")), stop("B", 2, None)];
        assert!(matches!(classify(&stops), AudioReadiness::NoneReady { .. }));
    }

    #[test]
    fn test_partial() {
        let stops = vec![stop("A", 1, Some("a.mp3")), stop("B", 2, None), stop("C", 3, Some("c.mp3"))];
        assert_eq!(
            classify(&stops),
            AudioReadiness::Partial {
                ready: 2,
                total: 3,
                pending: vec!["B".into()]
            }
        );
    }

    #[test]
    fn test_ready_keeps_visit_order() {
        let stops = vec![stop("A", 1, Some("a.mp3")), stop("B", 2, Some("b.mp3"))];
        assert_eq!(
            classify(&stops),
            AudioReadiness::Ready {
                files: vec![PathBuf::from("a.mp3"), PathBuf::from("b.mp3")]
            }
        );
    }

    #[tokio::test]
    async fn test_merge_concatenates_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.mp3");
        let b = tmp.path().join("b.mp3");
        std::fs::write(&a, b"AAAA").unwrap();
        std::fs::write(&b, b"BB").unwrap();

        let route_id = Uuid::new_v4();
        let output = merged_audio_path(tmp.path(), route_id);
        let merged = merge_audio_files(&[b.clone(), a.clone()], &output).await.unwrap();

        assert_eq!(merged, tmp.path().join(format!("route_{}_full.mp3", route_id)));
        assert_eq!(std::fs::read(&merged).unwrap(), b"BBAAAA".to_vec());
    }

    #[tokio::test]
    async fn test_merge_missing_input_names_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.mp3");

        let err = merge_audio_files(&[missing.clone()], &tmp.path().join("out.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, MergeError::Open { ref path, .. } if *path == missing));
        assert!(err.to_string().contains("missing.mp3"), "{}", err);
    }

    #[tokio::test]
    async fn test_failed_merge_keeps_previous_output_intact() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.mp3");
        std::fs::write(&a, b"AAAA").unwrap();

        let output = merged_audio_path(tmp.path(), Uuid::new_v4());
        std::fs::write(&output, b"previous").unwrap();

        let missing = tmp.path().join("missing.mp3");
        assert!(merge_audio_files(&[a, missing], &output).await.is_err());

        assert_eq!(std::fs::read(&output).unwrap(), b"previous".to_vec());
    }

    #[tokio::test]
    async fn test_concurrent_merges_publish_complete_files() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.mp3");
        let b = tmp.path().join("b.mp3");
        std::fs::write(&a, vec![b'A'; 64 * 1024]).unwrap();
        std::fs::write(&b, vec![b'B'; 64 * 1024]).unwrap();

        let output = merged_audio_path(tmp.path(), Uuid::new_v4());
        let files = vec![a, b];

        let (first, second) = tokio::join!(
            merge_audio_files(&files, &output),
            merge_audio_files(&files, &output)
        );
        first.unwrap();
        second.unwrap();

        let merged = std::fs::read(&output).unwrap();
        assert_eq!(merged.len(), 128 * 1024);
        assert!(merged[..64 * 1024].iter().all(|&byte| byte == b'A'));
        assert!(merged[64 * 1024..].iter().all(|&byte| byte == b'B'));

        let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".part"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
