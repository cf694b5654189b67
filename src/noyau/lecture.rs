// src/noyau/lecture.rs
//
// Lecture d’un nombre au début de l’affichage (touche M+).
// On lit le plus long préfixe numérique, comme un parseFloat :
//   "5+3" -> 5 ; "  -.5e2x" -> -50 ; "Infinity" -> ∞ ; "abc" -> NaN

/// Lit le préfixe numérique de `texte`. NaN si aucun préfixe n’est un nombre.
pub fn lecture_flottante(texte: &str) -> f64 {
    let s = texte.trim_start();

    let (signe, reste) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };

    if reste.starts_with("Infinity") {
        return signe * f64::INFINITY;
    }

    let long = prefixe_decimal(reste.as_bytes());
    if long == 0 {
        return f64::NAN;
    }

    reste[..long]
        .parse::<f64>()
        .map(|v| signe * v)
        .unwrap_or(f64::NAN)
}

/// Longueur du plus long préfixe `chiffres [. chiffres] [e [+-] chiffres]`
/// contenant au moins un chiffre avant l’exposant ; 0 sinon.
fn prefixe_decimal(b: &[u8]) -> usize {
    let chiffres = |mut j: usize| {
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        j
    };

    let mut fin = chiffres(0);
    let mut vu_chiffre = fin > 0;

    if fin < b.len() && b[fin] == b'.' {
        let fin_frac = chiffres(fin + 1);
        vu_chiffre |= fin_frac > fin + 1;
        if vu_chiffre {
            fin = fin_frac;
        }
    }

    if !vu_chiffre {
        return 0;
    }

    // exposant seulement s’il est complet
    if fin < b.len() && (b[fin] == b'e' || b[fin] == b'E') {
        let mut j = fin + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let fin_exp = chiffres(j);
        if fin_exp > j {
            fin = fin_exp;
        }
    }

    fin
}
