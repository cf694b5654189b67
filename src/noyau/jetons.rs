// src/noyau/jetons.rs

use super::erreur::ErreurCalcul;
use super::format::format_nombre;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,
    Euler,

    // Noms de fonctions natives (le parse vérifie qu’ils existent et sont appelés)
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    StarStar, // **

    Virgule,
    LPar,
    RPar,
}

/// Tokenize une chaîne réécrite en jetons.
/// Supporte:
/// - littéraux décimaux (12, 1.5, .5, 5., 1e3, 2.5e-4)
/// - entiers octaux hérités (010 = 8 ; 08 reste décimal)
/// - opérateurs + - * / ** et la virgule
/// - parenthèses ( )
/// - π et ℯ
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (sensibles à la casse)
///
/// `++` et `--` sont refusés : il n’y a jamais rien à incrémenter.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];
        let suivant = chars.get(i + 1).copied();

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            ',' => {
                out.push(Tok::Virgule);
                i += 1;
                continue;
            }
            '+' => {
                if suivant == Some('+') {
                    return Err(ErreurCalcul::OperateurInvalide("++"));
                }
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                if suivant == Some('-') {
                    return Err(ErreurCalcul::OperateurInvalide("--"));
                }
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                if suivant == Some('*') {
                    out.push(Tok::StarStar);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            'π' => {
                out.push(Tok::Pi);
                i += 1;
                continue;
            }
            'ℯ' => {
                out.push(Tok::Euler);
                i += 1;
                continue;
            }
            _ => {}
        }

        if c.is_ascii_digit() || (c == '.' && suivant.is_some_and(|d| d.is_ascii_digit())) {
            let v = lit_nombre(&chars, &mut i)?;
            out.push(Tok::Num(v));
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word));
            continue;
        }

        return Err(ErreurCalcul::CaractereInattendu(c));
    }

    Ok(out)
}

/// Lit un littéral numérique à partir de `chars[*i]` et avance `i` après lui.
fn lit_nombre(chars: &[char], i: &mut usize) -> Result<f64, ErreurCalcul> {
    let start = *i;
    let chiffres = |mut j: usize| {
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        j
    };

    let fin_entier = chiffres(start);
    let entier = &chars[start..fin_entier];

    // 0 suivi de chiffres : octal hérité si tous les chiffres sont < 8
    let octal = entier.len() > 1 && entier[0] == '0' && entier.iter().all(|d| d < &'8');

    let fin = if octal {
        fin_entier
    } else {
        let mut j = fin_entier;
        if j < chars.len() && chars[j] == '.' {
            j = chiffres(j + 1);
        }
        if j < chars.len() && (chars[j] == 'e' || chars[j] == 'E') {
            let mut k = j + 1;
            if k < chars.len() && (chars[k] == '+' || chars[k] == '-') {
                k += 1;
            }
            let fin_exp = chiffres(k);
            if fin_exp == k {
                let texte: String = chars[start..fin_exp].iter().collect();
                return Err(ErreurCalcul::NombreInvalide(texte));
            }
            j = fin_exp;
        }
        j
    };

    let texte: String = chars[start..fin].iter().collect();

    // Un littéral ne peut pas être collé à un identifiant (ex: "3in", "1e5x")
    if let Some(&c) = chars.get(fin) {
        if c.is_ascii_alphanumeric() || c == '_' {
            return Err(ErreurCalcul::NombreInvalide(format!("{texte}{c}")));
        }
    }

    *i = fin;

    if octal {
        let v = entier[1..]
            .iter()
            .filter_map(|d| d.to_digit(8))
            .fold(0.0_f64, |acc, d| acc * 8.0 + f64::from(d));
        return Ok(v);
    }

    texte
        .parse::<f64>()
        .map_err(|_| ErreurCalcul::NombreInvalide(texte))
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format_nombre(*v),
            Tok::Pi => "π".to_string(),
            Tok::Euler => "ℯ".to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::StarStar => "**".to_string(),

            Tok::Virgule => ",".to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
