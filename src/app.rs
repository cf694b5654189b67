// src/app.rs
//
// Calculatrice scientifique — module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer le sous-module etat.rs
// - Ré-exporter AppCalc (pour lib.rs / le module web)
// - Fournir la répartition des actions : une action = une opération complète
//
// Important:
// - La capture clavier et le rendu restent côté hôte (page web, natif) ;
//   l’hôte traduit chaque événement en Action.

pub mod etat;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

/// Une touche de la calculatrice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// chiffre, point, opérateur, parenthèse ou constante (Pi, E)
    Valeur(String),
    /// sqr, sin, cos, tan, log, ln, sqrt, abs
    Fonction(String),
    ClearEntree,
    DeleteLast,
    MemoirePlus,
    MemoireRappel,
    MemoireClear,
    Calculer,
}

impl AppCalc {
    /// Exécute une action jusqu’au bout avant la suivante.
    pub fn appliquer(&mut self, action: Action) {
        match action {
            Action::Valeur(v) => self.append(&v),
            Action::Fonction(nom) => self.append_fonction(&nom),
            Action::ClearEntree => self.clear_entree(),
            Action::DeleteLast => self.delete_last(),
            Action::MemoirePlus => self.memoire_plus(),
            Action::MemoireRappel => self.memoire_rappel(),
            Action::MemoireClear => self.memoire_clear(),
            Action::Calculer => self.calculer(),
        }
    }
}
