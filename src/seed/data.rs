//! Literal baseline rows for a freshly created catalog.
//!
//! Ids are reused across steps exactly as the catalog has always shipped them: content
//! rows point at director "1" before the directors step runs, and several steps share
//! genre, subtitle and dub "1".

use chrono::NaiveDate;

use crate::entities::{
    actor, cast_member,
    content::{self, ContentType},
    director, dub, episode, genre, season, subtitle,
};

const UNKNOWN_RELEASE_DATE: &str = "0000-00-00";
const BASE_GENRE: &str = "1";
const BASE_SUBTITLE: &str = "1";
const BASE_DUB: &str = "1";
const BASE_DIRECTOR: &str = "1";

const LANGUAGES: [(&str, &str); 4] = [
    ("1", "Inglés"),
    ("2", "Español"),
    ("3", "Italiano"),
    ("4", "Portugués"),
];

pub fn subtitles() -> Vec<subtitle::Model> {
    LANGUAGES
        .iter()
        .map(|(id, language)| subtitle::Model {
            id: id.to_string(),
            language: language.to_string(),
        })
        .collect()
}

pub fn dubs() -> Vec<dub::Model> {
    LANGUAGES
        .iter()
        .map(|(id, language)| dub::Model {
            id: id.to_string(),
            language: language.to_string(),
        })
        .collect()
}

pub fn genres() -> Vec<genre::Model> {
    vec![genre::Model {
        id: BASE_GENRE.to_string(),
        name: "Drama".to_string(),
        description: Some("Descripcion de drama: llorar".to_string()),
    }]
}

fn movie(id: &str, title: &str, description: &str, director_id: &str) -> content::Model {
    content::Model {
        id: id.to_string(),
        content_type: ContentType::Movie,
        title: title.to_string(),
        description: Some(description.to_string()),
        release_date: Some(UNKNOWN_RELEASE_DATE.to_string()),
        genre_id: BASE_GENRE.to_string(),
        rating_average: 0.0,
        subtitle_id: Some(BASE_SUBTITLE.to_string()),
        dub_id: Some(BASE_DUB.to_string()),
        duration: Some(120),
        director_id: Some(director_id.to_string()),
    }
}

pub fn contents() -> Vec<content::Model> {
    vec![
        movie(
            "ContenidoPrueba1",
            "ContenidoPrueba",
            "Descripcion de prueba",
            BASE_DIRECTOR,
        ),
        content::Model {
            id: "1".to_string(),
            content_type: ContentType::Series,
            title: "Los Soprano".to_string(),
            description: Some("Descripcion de los soprano".to_string()),
            release_date: Some(UNKNOWN_RELEASE_DATE.to_string()),
            genre_id: BASE_GENRE.to_string(),
            rating_average: 0.0,
            subtitle_id: Some(BASE_SUBTITLE.to_string()),
            dub_id: Some(BASE_DUB.to_string()),
            duration: None,
            director_id: None,
        },
    ]
}

/// Season ids "2" and "3" both carry season number 3.
pub fn seasons() -> Vec<season::Model> {
    [("1", 1), ("2", 3), ("3", 3)]
        .into_iter()
        .map(|(id, season_number)| season::Model {
            id: id.to_string(),
            content_id: "1".to_string(),
            season_number,
        })
        .collect()
}

pub fn episodes() -> Vec<episode::Model> {
    [
        ("1", "1", 1, 15),
        ("2", "1", 2, 16),
        ("3", "2", 1, 17),
        ("4", "2", 2, 11),
        ("5", "3", 1, 20),
        ("6", "3", 2, 21),
    ]
    .into_iter()
    .map(|(id, season_id, episode_number, duration)| episode::Model {
        id: id.to_string(),
        content_id: "1".to_string(),
        season_id: season_id.to_string(),
        director_id: Some(BASE_DIRECTOR.to_string()),
        episode_number,
        duration: Some(duration),
    })
    .collect()
}

pub fn actors() -> Vec<actor::Model> {
    [
        ("1", "Robert Deniro", "EstadoUnidense", (1943, 8, 17)),
        ("2", "Tom Cruise", "EstadoUnidense", (1962, 7, 3)),
        ("3", "Tom Hardy", "Britanico", (1977, 9, 15)),
        ("4", "George Clooney", "EstadoUnidense", (1961, 5, 6)),
    ]
    .into_iter()
    .map(|(id, name, nationality, (y, m, d))| actor::Model {
        id: id.to_string(),
        name: name.to_string(),
        nationality: Some(nationality.to_string()),
        birth_date: NaiveDate::from_ymd_opt(y, m, d),
    })
    .collect()
}

pub const CAST_CONTENT_ID: &str = "ContenidoActores1";

/// The movie every seeded actor is cast in.
pub fn cast_content() -> content::Model {
    movie(CAST_CONTENT_ID, "PeliculaActores", "prueba", BASE_DIRECTOR)
}

pub fn cast() -> Vec<cast_member::Model> {
    actors()
        .into_iter()
        .map(|actor| cast_member::Model {
            content_id: CAST_CONTENT_ID.to_string(),
            actor_id: actor.id,
        })
        .collect()
}

pub fn directors() -> Vec<director::Model> {
    [
        ("1", "Francis Ford Coppola", "EstadoUnidense", (1939, 4, 7)),
        ("2", "Stanley Kubrik", "Estadounidense", (1928, 7, 26)),
        ("3", "Jean Luc Godard", "Frances", (1930, 12, 3)),
        ("4", "David Lynch", "EstadoUnidense", (1946, 1, 20)),
    ]
    .into_iter()
    .map(|(id, name, nationality, (y, m, d))| director::Model {
        id: id.to_string(),
        name: name.to_string(),
        nationality: Some(nationality.to_string()),
        birth_date: NaiveDate::from_ymd_opt(y, m, d),
    })
    .collect()
}

/// One movie per seeded director, named after the director's position.
pub fn director_contents() -> Vec<content::Model> {
    (1..=4)
        .map(|i| {
            movie(
                &format!("ContenidoDirectores{i}"),
                &format!("PeliculaDirectores{i}"),
                "prueba",
                &i.to_string(),
            )
        })
        .collect()
}
