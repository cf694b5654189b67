// src/noyau/erreur.rs
//
// Erreur de calcul (une seule famille).
// Les variantes servent au diagnostic (journal, tests) ; à la frontière
// `calculer_affichage`, toutes deviennent la sentinelle "Error".

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurCalcul {
    #[error("entrée vide")]
    Vide,

    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("littéral numérique invalide: {0}")]
    NombreInvalide(String),

    /// `++` / `--` : jamais valides (pas de variable à incrémenter).
    #[error("opérateur invalide: {0}")]
    OperateurInvalide(&'static str),

    #[error("identifiant inconnu: {0}")]
    IdentInconnu(String),

    #[error("syntaxe invalide: {0}")]
    Syntaxe(&'static str),

    /// Arbre de démarche seulement : la valeur, elle, se calcule sans limite.
    #[error("arbre trop profond (plus de {0} niveaux)")]
    TropProfond(usize),

    /// NaN ou ±∞ (ex: 1/0, sqrt(-1)).
    #[error("résultat non fini: {0}")]
    NonFini(f64),
}
