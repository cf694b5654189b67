// src/lib.rs
//
// Calculatrice scientifique — racine de la crate NATIF + WEB (WASM)
// -----------------------------------------------------------------
// But:
// - NATIF : API Rust (AppCalc + noyau), utilisée par les tests ou un hôte
// - WEB (wasm32) : CalculatriceWeb exportée vers JS via wasm_bindgen
//
// Le rendu, la disposition des boutons et la capture clavier restent dans
// la page : elle appelle une méthode par touche, puis relit `display`.

pub mod app;
pub mod noyau;

pub use app::{Action, AppCalc};
pub use noyau::{calculer_affichage, eval_expression, ErreurCalcul, SENTINELLE_ERREUR};

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::wasm_bindgen;

    use super::AppCalc;

    /// Une calculatrice = une session (affichage + mémoire).
    #[wasm_bindgen]
    pub struct CalculatriceWeb {
        etat: AppCalc,
    }

    impl Default for CalculatriceWeb {
        fn default() -> Self {
            Self::new()
        }
    }

    #[wasm_bindgen]
    impl CalculatriceWeb {
        #[wasm_bindgen(constructor)]
        pub fn new() -> CalculatriceWeb {
            CalculatriceWeb {
                etat: AppCalc::default(),
            }
        }

        /// Texte courant de l’affichage.
        #[wasm_bindgen(getter)]
        pub fn display(&self) -> String {
            self.etat.entree.clone()
        }

        #[wasm_bindgen(getter)]
        pub fn memory(&self) -> f64 {
            self.etat.memoire
        }

        #[wasm_bindgen(js_name = appendValue)]
        pub fn append_value(&mut self, valeur: &str) {
            self.etat.append(valeur);
        }

        pub fn scientific(&mut self, fonction: &str) {
            self.etat.append_fonction(fonction);
        }

        #[wasm_bindgen(js_name = clearDisplay)]
        pub fn clear_display(&mut self) {
            self.etat.clear_entree();
        }

        #[wasm_bindgen(js_name = deleteLast)]
        pub fn delete_last(&mut self) {
            self.etat.delete_last();
        }

        #[wasm_bindgen(js_name = memoryPlus)]
        pub fn memory_plus(&mut self) {
            self.etat.memoire_plus();
        }

        #[wasm_bindgen(js_name = memoryRecall)]
        pub fn memory_recall(&mut self) {
            self.etat.memoire_rappel();
        }

        #[wasm_bindgen(js_name = memoryClear)]
        pub fn memory_clear(&mut self) {
            self.etat.memoire_clear();
        }

        /// "=" : retourne aussi le nouvel affichage (résultat ou "Error").
        pub fn calculate(&mut self) -> String {
            self.etat.calculer();
            self.etat.entree.clone()
        }
    }
}
