// src/noyau/expr.rs
//
// AST flottant.
// - Num   : littéral
// - Pi / Euler : constantes
// - Sequence : a, b (évalue a, rend b)
// - Appel : fonction native + arguments
//
// Les valeurs non finies se propagent librement ; c’est eval.rs qui
// classe le résultat final (NaN / ±∞ => erreur).

use std::f64::consts;
use std::fmt;

use super::trig::{deg_vers_rad, TrigFn};

/// Fonctions natives produites par la réécriture (jamais saisies au clavier).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Puissance,
    Sinus,
    Cosinus,
    Tangente,
    Rad,
    Log10,
    LogNat,
    Racine,
    Absolue,
}

impl Fonction {
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        use Fonction::*;
        let f = match nom {
            "puissance" => Puissance,
            "sinus" => Sinus,
            "cosinus" => Cosinus,
            "tangente" => Tangente,
            "rad" => Rad,
            "log10" => Log10,
            "log_nat" => LogNat,
            "racine" => Racine,
            "absolue" => Absolue,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        use Fonction::*;
        match self {
            Puissance => "puissance",
            Sinus => "sinus",
            Cosinus => "cosinus",
            Tangente => "tangente",
            Rad => "rad",
            Log10 => "log10",
            LogNat => "log_nat",
            Racine => "racine",
            Absolue => "absolue",
        }
    }

    /// Applique la fonction. Argument manquant => NaN ; arguments en trop ignorés.
    pub fn applique(self, args: &[f64]) -> f64 {
        use Fonction::*;
        let arg = |i: usize| args.get(i).copied().unwrap_or(f64::NAN);
        match self {
            Puissance => puissance(arg(0), arg(1)),
            Sinus => TrigFn::Sin.applique(arg(0)),
            Cosinus => TrigFn::Cos.applique(arg(0)),
            Tangente => TrigFn::Tan.applique(arg(0)),
            Rad => deg_vers_rad(arg(0)),
            Log10 => arg(0).log10(),
            LogNat => arg(0).ln(),
            Racine => arg(0).sqrt(),
            Absolue => arg(0).abs(),
        }
    }
}

/// Puissance IEEE : exposant NaN => NaN, et (±1)^(±∞) => NaN.
pub fn puissance(base: f64, exposant: f64) -> f64 {
    if exposant.is_nan() || (base.abs() == 1.0 && exposant.is_infinite()) {
        return f64::NAN;
    }
    base.powf(exposant)
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Pi,
    Euler,

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Sequence(Box<Expr>, Box<Expr>),

    Appel(Fonction, Vec<Expr>),
}

impl Expr {
    /// Évaluation directe de l’arbre (aucun état, aucun effet de bord).
    pub fn evaluer(&self) -> f64 {
        use Expr::*;

        match self {
            Num(v) => *v,
            Pi => consts::PI,
            Euler => consts::E,

            Neg(x) => -x.evaluer(),

            Add(a, b) => a.evaluer() + b.evaluer(),
            Sub(a, b) => a.evaluer() - b.evaluer(),
            Mul(a, b) => a.evaluer() * b.evaluer(),
            Div(a, b) => a.evaluer() / b.evaluer(),
            Pow(a, b) => puissance(a.evaluer(), b.evaluer()),

            Sequence(_, b) => b.evaluer(),

            Appel(f, args) => {
                let valeurs: Vec<f64> = args.iter().map(Expr::evaluer).collect();
                f.applique(&valeurs)
            }
        }
    }
}

/// Affichage entièrement parenthésé (démarche / journal).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;

        match self {
            Num(v) => write!(f, "{}", super::format::format_nombre(*v)),
            Pi => write!(f, "π"),
            Euler => write!(f, "ℯ"),
            Neg(x) => write!(f, "-({x})"),
            Add(a, b) => write!(f, "({a} + {b})"),
            Sub(a, b) => write!(f, "({a} - {b})"),
            Mul(a, b) => write!(f, "({a} * {b})"),
            Div(a, b) => write!(f, "({a} / {b})"),
            Pow(a, b) => write!(f, "({a} ** {b})"),
            Sequence(a, b) => write!(f, "({a}, {b})"),
            Appel(func, args) => {
                write!(f, "{}(", func.nom())?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
        }
    }
}
