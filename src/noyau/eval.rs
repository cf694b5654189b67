//! Noyau — évaluation (pipeline réel)
//!
//! contrôle de la saisie -> réécritures (parenthèses, ^, fonctions, constantes)
//!        -> jetons -> RPN -> valeur f64 (pile) -> classement -> texte
//!
//! Tout échec (syntaxe, NaN, ±∞) devient la sentinelle "Error" dans
//! `calculer_affichage` ; rien ne remonte à l’appelant.
//! L’arbre (Expr) ne sert qu’à la démarche : il n’est construit que si on la demande.

use super::erreur::ErreurCalcul;
use super::format::format_nombre;
use super::jetons::{format_tokens, tokenize, Tok};
use super::reecriture::{reecrit, verifie_saisie};
use super::rpn::{evalue_rpn, format_rpn, from_rpn, to_rpn, Rpn};

/// Texte affiché à la place d’un résultat impossible.
pub const SENTINELLE_ERREUR: &str = "Error";

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub reecrite: String,
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

struct Analyse {
    reecrite: String,
    jetons: Vec<Tok>,
    rpn: Vec<Rpn>,
}

/// Étapes textuelles + syntaxe : saisie -> RPN.
fn analyse(entree: &str) -> Result<Analyse, ErreurCalcul> {
    // 0) Noms du clavier seulement
    verifie_saisie(entree)?;

    // 1) Réécritures textuelles
    let reecrite = reecrit(entree);

    // 2) Jetons
    let jetons = tokenize(&reecrite)?;

    // 3) RPN (entrée vide => ErreurCalcul::Vide)
    let rpn = to_rpn(&jetons)?;

    Ok(Analyse {
        reecrite,
        jetons,
        rpn,
    })
}

/// 4) Valeur, puis classement.
fn valeur(rpn: &[Rpn]) -> Result<f64, ErreurCalcul> {
    let v = evalue_rpn(rpn)?;
    if !v.is_finite() {
        return Err(ErreurCalcul::NonFini(v));
    }
    Ok(v)
}

/// Évalue l’affichage et retourne la valeur finie + la démarche.
pub fn eval_expression_detaillee(entree: &str) -> Result<(f64, DemarcheNoyau), ErreurCalcul> {
    let a = analyse(entree)?;
    let v = valeur(&a.rpn)?;

    // l’arbre n’est qu’un affichage : trop profond, on garde le diagnostic
    let arbre = match from_rpn(&a.rpn) {
        Ok(expr) => expr.to_string(),
        Err(e) => format!("<{e}>"),
    };

    let d = DemarcheNoyau {
        jetons: format_tokens(&a.jetons),
        rpn: format_rpn(&a.rpn),
        arbre,
        reecrite: a.reecrite,
    };

    Ok((v, d))
}

/// API publique : valeur finie de l’expression, ou l’erreur de calcul.
pub fn eval_expression(entree: &str) -> Result<f64, ErreurCalcul> {
    valeur(&analyse(entree)?.rpn)
}

/// Calcul tel que l’affichage le montre : le résultat formaté, ou "Error".
pub fn calculer_affichage(entree: &str) -> String {
    let resultat = if tracing::enabled!(tracing::Level::DEBUG) {
        eval_expression_detaillee(entree).map(|(v, d)| {
            tracing::debug!(
                entree,
                reecrite = %d.reecrite,
                rpn = %d.rpn,
                arbre = %d.arbre,
                valeur = v,
                "calcul"
            );
            v
        })
    } else {
        eval_expression(entree)
    };

    match resultat {
        Ok(v) => format_nombre(v),
        Err(e) => {
            tracing::warn!(entree, erreur = %e, "erreur de calcul");
            SENTINELLE_ERREUR.to_string()
        }
    }
}
