//! Plain-text rendering of characters for the terminal.

use mortydex_core::types::Character;

const LIKED: &str = "♥";
const NOT_LIKED: &str = "♡";

/// One list row: like marker, id, name, species.
pub fn row(character: &Character) -> String {
    let heart = if character.liked { LIKED } else { NOT_LIKED };
    format!(
        "{heart} {:>4}  {} ({})",
        character.id, character.name, character.species
    )
}

/// Rows for every character, one per line.
pub fn list(characters: &[&Character]) -> String {
    characters
        .iter()
        .copied()
        .map(row)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The detail card of one character.
pub fn detail(character: &Character) -> String {
    let heart = if character.liked { LIKED } else { NOT_LIKED };
    let fields = [
        ("Gender", character.gender.as_str()),
        ("Status", character.status.as_str()),
        ("Specie", character.species.as_str()),
        ("Type", character.kind.as_str()),
        ("Origin", character.origin.name.as_str()),
        ("Localization", character.location.name.as_str()),
    ];

    let mut out = format!("{heart} {}\n{}\nInformations\n", character.name, character.image);
    for (label, value) in fields {
        out.push_str(&format!("  {:<13} {value}\n", format!("{label}:")));
    }
    out
}

#[cfg(test)]
mod tests {
    use mortydex_core::types::{Place, UNKNOWN_KIND};

    use super::*;

    fn morty(liked: bool) -> Character {
        Character {
            id: 2,
            name: "Morty Smith".into(),
            species: "Human".into(),
            kind: UNKNOWN_KIND.into(),
            image: "https://rickandmortyapi.com/api/character/avatar/2.jpeg".into(),
            gender: "Male".into(),
            status: "Alive".into(),
            origin: Place::new("unknown"),
            location: Place::new("Citadel of Ricks"),
            liked,
        }
    }

    #[test]
    fn row_marks_liked_state() {
        assert_eq!(row(&morty(true)), "♥    2  Morty Smith (Human)");
        assert_eq!(row(&morty(false)), "♡    2  Morty Smith (Human)");
    }

    #[test]
    fn detail_lists_every_field() {
        let card = detail(&morty(false));
        assert!(card.starts_with("♡ Morty Smith\n"));
        assert!(card.contains("Gender:       Male"));
        assert!(card.contains("Type:         Unknown"));
        assert!(card.contains("Localization: Citadel of Ricks"));
    }

    #[test]
    fn list_joins_rows() {
        let a = morty(false);
        let b = morty(true);
        assert_eq!(list(&[&a, &b]).lines().count(), 2);
        assert_eq!(list(&[]), "");
    }
}
