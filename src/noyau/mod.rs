//! Noyau de calcul
//!
//! Organisation interne :
//! - reecriture.rs : contrôle de la saisie + réécritures (parenthèses, ^, fonctions, constantes)
//! - jetons.rs     : tokenisation
//! - rpn.rs        : shunting-yard, évaluation sur pile, construction Expr
//! - expr.rs       : AST de démarche + fonctions natives
//! - trig.rs       : degrés -> radians, sin/cos/tan
//! - format.rs     : nombre -> texte d’affichage
//! - lecture.rs    : préfixe numérique de l’affichage (M+)
//! - erreur.rs     : ErreurCalcul
//! - eval.rs       : pipeline complet + sentinelle "Error"

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod reecriture;
pub mod rpn;
pub mod trig;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use eval::{
    calculer_affichage, eval_expression, eval_expression_detaillee, DemarcheNoyau,
    SENTINELLE_ERREUR,
};
pub use format::format_nombre;
pub use lecture::lecture_flottante;
pub use trig::deg_vers_rad;
