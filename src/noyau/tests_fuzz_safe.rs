//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions bien formées : seule erreur admise, un résultat non fini
//! - invariant clé : après "=", l’affichage est "Error" ou un nombre fini
//!   dont le texte se relit à l’identique

use std::time::{Duration, Instant};

use super::{
    calculer_affichage, eval_expression, format_nombre, lecture_flottante, ErreurCalcul,
    SENTINELLE_ERREUR,
};
use crate::app::{Action, AppCalc};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

/// Après "=" : "Error", ou un nombre fini qui se relit tel quel.
fn check_invariant_affichage(sequence: &[Action], entree: &str) {
    if entree == SENTINELLE_ERREUR {
        return;
    }
    let v = lecture_flottante(entree);
    assert!(v.is_finite(), "résultat non fini: {entree:?} après {sequence:?}");
    assert_eq!(
        format_nombre(v),
        entree,
        "résultat non canonique après {sequence:?}"
    );
}

/* ------------------------ Génération de touches ------------------------ */

const FONCTIONS: [&str; 8] = ["sqr", "sin", "cos", "tan", "log", "ln", "sqrt", "abs"];
const VALEURS: [&str; 10] = ["+", "-", "*", "/", "^", "(", ")", ".", "Pi", "E"];

fn gen_touche(rng: &mut Rng) -> Action {
    match rng.pick(20) {
        0..=7 => Action::Valeur(rng.pick(10).to_string()),
        8..=12 => Action::Valeur(VALEURS[rng.pick(VALEURS.len() as u32) as usize].to_string()),
        13 | 14 => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            Action::Fonction(f.to_string())
        }
        15 => Action::DeleteLast,
        16 => match rng.pick(4) {
            0 => Action::ClearEntree,
            1 => Action::MemoireClear,
            _ => Action::MemoirePlus,
        },
        17 => Action::MemoireRappel,
        _ => Action::Calculer,
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // un seul chiffre avant le point : jamais de littéral octal
    let a = rng.pick(10);
    if rng.coin() {
        format!("{a}")
    } else {
        format!("{a}.{}", rng.pick(10))
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => "Pi".to_string(),
        4 => "E".to_string(),
        // argument sans parenthèse : la réécriture le capture en entier
        _ => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            format!("{f}({})", gen_nombre(rng))
        }
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(7) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({})^{}", gen_expr(rng, depth - 1), gen_atom(rng)),
        _ => format!("(-{})", gen_expr(rng, depth - 1)),
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_clavier_invariant_affichage() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let mut a = AppCalc::default();
        let mut sequence = Vec::new();

        for _ in 0..(4 + rng.pick(20)) {
            let touche = gen_touche(&mut rng);
            let calcul = touche == Action::Calculer;
            sequence.push(touche.clone());
            a.appliquer(touche);

            if calcul {
                check_invariant_affichage(&sequence, &a.entree);
                if a.entree == SENTINELLE_ERREUR {
                    seen_err += 1;
                } else {
                    seen_ok += 1;
                }
            }
            assert!(!a.memoire.is_nan(), "mémoire NaN après {sequence:?}");
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    // (saisie aléatoire : "Error" domine, il reste collé jusqu’à un effacement)
    assert!(seen_ok > 3, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 3, "trop peu d’erreurs: {seen_err}");
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // Même seed => mêmes touches => mêmes états
    let session = |seed: u64| {
        let mut rng = Rng::new(seed);
        let mut a = AppCalc::default();
        for _ in 0..200 {
            a.appliquer(gen_touche(&mut rng));
        }
        a
    };

    let premier = session(0xBADC0DE_u64);
    budget(t0, max);
    let second = session(0xBADC0DE_u64);
    budget(t0, max);

    assert_eq!(premier, second);
}

#[test]
fn fuzz_safe_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0x5EED_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        match eval_expression(&expr) {
            Ok(v) => {
                assert!(v.is_finite(), "expr={expr:?} v={v}");
                assert_eq!(calculer_affichage(&expr), format_nombre(v), "expr={expr:?}");
                seen_ok += 1;
            }
            Err(e) => {
                // Syntaxe toujours valide : seule une valeur non finie est admise.
                assert!(
                    matches!(e, ErreurCalcul::NonFini(_)),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1", 800);
    budget(t0, max);

    assert_eq!(calculer_affichage(&expr), "800");
}
