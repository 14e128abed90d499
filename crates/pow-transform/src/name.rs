//! Person name splitting.
//!
//! Names arrive as `FAMILY [ent. FORMER] [VON] GIVEN NAMES` in any case, for
//! example `Huurre ent. Hildén Aapo Antero`. The family name segment keeps
//! a former family name as `(ent. Former)`.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static NAME_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([A-ZÅÄÖÜÉÓÁ/\-]+(?:\s+\(?E(?:NT)?[.\s]+[A-ZÅÄÖÜÉÓÁ/\-]+)?\)?)\s*(VON)?,?\s*([A-ZÅÄÖÜÉÓÁ/\- ()0-9,.]*)",
    )
    .expect("Invalid name split regex")
});

static PREVIOUS_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-ZÅÄÖÜÉÓÁ/\-]{2}) +\(?(E(?:NT)?[.\s]+)([A-ZÅÄÖÜÉÓÁ/\-]+)\)?")
        .expect("Invalid previous name regex")
});

/// A split person name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    pub given: String,
    pub family: String,
    /// `Family, Given`, or just the family name.
    pub full: String,
}

impl PersonName {
    /// The name rendered back in source order, `Family Given`.
    pub fn source_order(&self) -> String {
        if self.given.is_empty() {
            self.family.clone()
        } else {
            format!("{} {}", self.family, self.given)
        }
    }
}

/// Uppercase the first letter of every word and lowercase the rest.
///
/// A word starts at any letter that follows a non-letter, so
/// `NIKOLAI (NIILO)` becomes `Nikolai (Niilo)` and `ENT.` becomes `Ent.`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }
    out
}

/// Split a raw name cell into given names, family name and display name.
pub fn convert_person_name(raw: &str) -> PersonName {
    let upper = raw.trim().to_uppercase();

    let (family, particle, given) = match NAME_SPLIT.captures(&upper) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()).to_string(),
            caps.get(2).map(|m| m.as_str().to_lowercase()),
            caps.get(3).map_or("", |m| m.as_str()).trim().to_string(),
        ),
        None => (upper.clone(), None, String::new()),
    };

    let family = PREVIOUS_NAME.replace_all(&family, "$1 (ent. $3)");
    let mut family = title_case(&family).replace("(Ent. ", "(ent. ");
    if let Some(particle) = particle {
        family = format!("{particle} {family}");
    }
    let given = title_case(&given);

    let full = if given.is_empty() {
        family.clone()
    } else {
        format!("{family}, {given}")
    };
    debug!(full = %full, "unified person name");

    PersonName {
        given,
        family,
        full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(raw: &str) -> (String, String, String) {
        let name = convert_person_name(raw);
        (name.given, name.family, name.full)
    }

    #[test]
    fn plain_name() {
        assert_eq!(
            split("Virtanen Matti Akseli"),
            (
                "Matti Akseli".into(),
                "Virtanen".into(),
                "Virtanen, Matti Akseli".into()
            )
        );
    }

    #[test]
    fn former_family_name() {
        assert_eq!(
            split("Huurre ent. Hildén Aapo Antero"),
            (
                "Aapo Antero".into(),
                "Huurre (ent. Hildén)".into(),
                "Huurre (ent. Hildén), Aapo Antero".into()
            )
        );
        assert_eq!(
            split("Kulento ent. Kulakov Nikolai (Niilo)"),
            (
                "Nikolai (Niilo)".into(),
                "Kulento (ent. Kulakov)".into(),
                "Kulento (ent. Kulakov), Nikolai (Niilo)".into()
            )
        );
    }

    #[test]
    fn former_given_name_is_left_alone() {
        assert_eq!(
            split("Ahjo ent. Germanoff Juho ent. Ivan"),
            (
                "Juho Ent. Ivan".into(),
                "Ahjo (ent. Germanoff)".into(),
                "Ahjo (ent. Germanoff), Juho Ent. Ivan".into()
            )
        );
    }

    #[test]
    fn nobiliary_particle_is_prepended() {
        let name = convert_person_name("FIEANDT VON, Otto");
        assert_eq!(name.family, "von Fieandt");
        assert_eq!(name.given, "Otto");
    }

    #[test]
    fn family_name_only() {
        let name = convert_person_name("Mäkinen");
        assert_eq!(name.full, "Mäkinen");
        assert_eq!(name.source_order(), "Mäkinen");
    }

    #[test]
    fn title_case_follows_letters() {
        assert_eq!(title_case("JUHO ENT. IVAN"), "Juho Ent. Ivan");
        assert_eq!(title_case("ANNA-LIISA"), "Anna-Liisa");
        assert_eq!(title_case("ÅKE"), "Åke");
    }
}
