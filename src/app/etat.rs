//! src/app/etat.rs
//!
//! État de la calculatrice (sans vue).
//!
//! Rôle : contenir l’affichage (`entree`) et la mémoire (`memoire`), et offrir
//! les opérations des touches : saisie, effacement, mémoire, calcul.
//!
//! Contrats :
//! - Une touche = une opération complète, déterministe.
//! - Aucune validation à la saisie : c’est le calcul qui tranche ("Error").
//! - Pas d’état global : chaque session possède son AppCalc.

use crate::noyau::{calculer_affichage, format_nombre, lecture_flottante};

/// Opérateurs binaires : un nouvel opérateur remplace celui qui termine l’affichage.
pub const OPERATEURS: [char; 5] = ['+', '-', '*', '/', '^'];

fn est_operateur(c: char) -> bool {
    OPERATEURS.contains(&c)
}

/// Vrai si `valeur` est exactement un des cinq opérateurs.
fn est_operateur_seul(valeur: &str) -> bool {
    let mut it = valeur.chars();
    matches!((it.next(), it.next()), (Some(c), None) if est_operateur(c))
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppCalc {
    // --- affichage (expression en cours, ou dernier résultat) ---
    pub entree: String,

    // --- mémoire (M+, MR, MC) ---
    pub memoire: f64,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(), // au démarrage : affichage vide
            memoire: 0.0,
        }
    }
}

impl AppCalc {
    /* ------------------------ Saisie ------------------------ */

    /// Ajoute une valeur (chiffre, point, opérateur, parenthèse, constante).
    ///
    /// Opérateur après opérateur : le dernier gagne ("5+" puis "*" => "5*").
    pub fn append(&mut self, valeur: &str) {
        let remplace =
            est_operateur_seul(valeur) && self.entree.chars().last().is_some_and(est_operateur);

        if remplace {
            self.entree.pop();
        }
        self.entree.push_str(valeur);
    }

    /// Fonction scientifique : ajoute "nom(" ; l’argument et la ')' viennent ensuite
    /// (la ')' manquante est ajoutée au calcul).
    pub fn append_fonction(&mut self, nom: &str) {
        self.entree.push_str(nom);
        self.entree.push('(');
    }

    /// C : efface l’affichage.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
    }

    /// DEL : retire le dernier caractère (rien à faire si vide).
    pub fn delete_last(&mut self) {
        self.entree.pop();
    }

    /* ------------------------ Mémoire ------------------------ */

    /// M+ : ajoute le nombre lu en tête de l’affichage, puis efface l’affichage.
    ///
    /// Si l’affichage ne commence pas par un nombre, la mémoire ne change pas,
    /// mais l’affichage est tout de même effacé.
    pub fn memoire_plus(&mut self) {
        let courant = lecture_flottante(&self.entree);
        if !courant.is_nan() {
            self.memoire += courant;
        }
        self.entree.clear();
        tracing::debug!(memoire = self.memoire, "mémoire M+");
    }

    /// MR : ajoute la valeur mémoire au bout de l’affichage (sans l’effacer).
    pub fn memoire_rappel(&mut self) {
        self.entree.push_str(&format_nombre(self.memoire));
    }

    /// MC : remet la mémoire à zéro et efface l’affichage.
    pub fn memoire_clear(&mut self) {
        self.memoire = 0.0;
        self.entree.clear();
        tracing::debug!("mémoire effacée");
    }

    /* ------------------------ Calcul ------------------------ */

    /// "=" : remplace l’affichage par le résultat, ou par "Error".
    pub fn calculer(&mut self) {
        self.entree = calculer_affichage(&self.entree);
    }
}
