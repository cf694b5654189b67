// src/noyau/reecriture.rs
//
// Réécritures textuelles, dans l’ordre du pipeline :
// 0) contrôle de la saisie brute : seuls les noms du clavier (sqr … abs, Pi, E)
//    y sont admis ; les formes natives (racine, rad, π, …) ne viennent que de 3) et 4)
// 1) fermeture des parenthèses manquantes
// 2) ^ -> **
// 3) appels de fonctions : nom(ARG) -> forme native
// 4) constantes : Pi -> π, E -> ℯ
//
// Limites connues (reproduites telles quelles) :
// - ARG s’arrête au premier ')' : un argument qui contient lui-même des
//   parenthèses est mal découpé (ex: sqr((2)) -> puissance((2, 2)).
// - Les constantes sont remplacées comme de simples sous-chaînes :
//   "5E" devient "5ℯ" (juxtaposition, donc erreur au calcul).

use std::sync::OnceLock;

use regex::Regex;

use super::erreur::ErreurCalcul;

/// Fonctions reconnues au clavier et leur forme native, dans l’ordre d’application.
///
/// Aucune forme native ne contient un motif d’une étape suivante, ni "Pi", ni "E".
pub const FONCTIONS: [(&str, &str); 8] = [
    ("sqr", "puissance(${1}, 2)"),
    ("sin", "sinus(rad(${1}))"),
    ("cos", "cosinus(rad(${1}))"),
    ("tan", "tangente(rad(${1}))"),
    ("log", "log10(${1})"),
    ("ln", "log_nat(${1})"),
    ("sqrt", "racine(${1})"),
    ("abs", "absolue(${1})"),
];

fn mots() -> &'static Regex {
    static MOTS: OnceLock<Regex> = OnceLock::new();

    // un mot qui commence par un chiffre ou un point est un nombre (1e5, 5E, 2Pi) :
    // le tokenizer s’en occupe
    MOTS.get_or_init(|| {
        Regex::new(r"[0-9.][0-9A-Za-z_.]*|[A-Za-z_][0-9A-Za-z_]*").expect("motif des mots")
    })
}

fn nom_du_clavier(nom: &str) -> bool {
    nom == "Pi" || nom == "E" || FONCTIONS.iter().any(|(f, _)| *f == nom)
}

/// Étape 0 : refuse π, ℯ et tout identifiant qui n’est pas une touche.
pub fn verifie_saisie(entree: &str) -> Result<(), ErreurCalcul> {
    if let Some(c) = entree.chars().find(|c| matches!(c, 'π' | 'ℯ')) {
        return Err(ErreurCalcul::CaractereInattendu(c));
    }

    for m in mots().find_iter(entree) {
        let mot = m.as_str();
        let est_nombre = mot.starts_with(|c: char| c.is_ascii_digit() || c == '.');
        if !est_nombre && !nom_du_clavier(mot) {
            return Err(ErreurCalcul::IdentInconnu(mot.to_string()));
        }
    }
    Ok(())
}

/// Pipeline complet des réécritures (étapes 1 à 4).
pub fn reecrit(entree: &str) -> String {
    let s = ferme_parentheses(entree);
    let s = reecrit_puissance(&s);
    let s = reecrit_fonctions(&s);
    reecrit_constantes(&s)
}

/// Ajoute autant de ')' qu’il manque. Un excès de ')' n’est jamais corrigé.
pub fn ferme_parentheses(s: &str) -> String {
    let ouvertes = s.matches('(').count();
    let fermees = s.matches(')').count();

    let mut out = s.to_string();
    if ouvertes > fermees {
        out.push_str(&")".repeat(ouvertes - fermees));
    }
    out
}

pub fn reecrit_puissance(s: &str) -> String {
    s.replace('^', "**")
}

fn motifs() -> &'static [(Regex, &'static str)] {
    static MOTIFS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

    MOTIFS.get_or_init(|| {
        FONCTIONS
            .iter()
            .map(|(nom, gabarit)| {
                let re = Regex::new(&format!(r"{nom}\(([^)]*)\)")).expect("motif de fonction");
                (re, *gabarit)
            })
            .collect()
    })
}

/// Remplace chaque `nom(ARG)` par sa forme native, une fonction après l’autre.
pub fn reecrit_fonctions(s: &str) -> String {
    motifs().iter().fold(s.to_string(), |acc, (re, gabarit)| {
        re.replace_all(&acc, *gabarit).into_owned()
    })
}

pub fn reecrit_constantes(s: &str) -> String {
    s.replace("Pi", "π").replace('E', "ℯ")
}
