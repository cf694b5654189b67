// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur (et AST pour la démarche)
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Évaluer la RPN sur une pile de valeurs
// - Reconstruire Expr, à profondeur bornée
//
// Règles:
// - Ident(nom) doit être une fonction native ET être suivi de '(' (sinon erreur)
// - Dans les parenthèses d’un appel, ',' sépare les arguments ;
//   ailleurs c’est l’opérateur de séquence (priorité la plus basse)
// - '+' / '-' quand on attend une valeur => opérateur unaire
// - Une opérande préfixée par un unaire ne peut pas être la base de '**' :
//   "-2**2" est refusé, "(-2)**2" et "2**-2" sont acceptés
// - Deux valeurs qui se suivent (2(3), 2π, (1)(2)) => erreur

use std::f64::consts;

use super::erreur::ErreurCalcul;
use super::expr::{puissance, Expr, Fonction};
use super::jetons::Tok;

const INVALIDE: ErreurCalcul = ErreurCalcul::Syntaxe("expression invalide");

/// Profondeur maximale de l’arbre de démarche (Display et Drop de Expr sont récursifs).
pub const PROFONDEUR_ARBRE_MAX: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Sequence,
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    Plus,
    Pow,
}

/// Élément de la forme postfixée.
#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Pi,
    Euler,
    Op(Op),
    /// fonction + nombre d’arguments effectivement écrits
    Appel(Fonction, usize),
}

/// Élément de la pile d’opérateurs.
#[derive(Clone, Debug)]
enum Pile {
    Op(Op),
    Groupe,
    Appel { f: Fonction, virgules: usize },
}

fn precedence(op: Op) -> i32 {
    match op {
        Op::Sequence => 0,
        Op::Add | Op::Sub => 1,
        Op::Mul | Op::Div => 2,
        Op::Neg | Op::Plus => 3,
        Op::Pow => 4,
    }
}

fn is_right_associative(op: Op) -> bool {
    matches!(op, Op::Pow)
}

fn is_unaire(op: Op) -> bool {
    matches!(op, Op::Neg | Op::Plus)
}

/// Dépile vers la sortie tant que la précédence/associativité l’exige.
/// On ne traverse jamais une parenthèse (groupe ou appel).
fn depile_pour(op: Op, ops: &mut Vec<Pile>, out: &mut Vec<Rpn>) {
    while let Some(Pile::Op(top)) = ops.last() {
        let p_top = precedence(*top);
        let p_op = precedence(op);

        let doit_pop = if is_right_associative(op) {
            p_top > p_op
        } else {
            p_top >= p_op
        };

        if !doit_pop {
            break;
        }
        out.push(Rpn::Op(*top));
        ops.pop();
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("racine"), LPar, Num(2), Plus, Num(2), RPar]
///   rpn:    [Num(2), Num(2), Op(Add), Appel(Racine, 1)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurCalcul> {
    let mut out: Vec<Rpn> = Vec::new();
    let mut ops: Vec<Pile> = Vec::new();

    // vrai au début, après un opérateur, après '(' et après ','
    let mut attend_valeur = true;
    // vrai juste après la '(' d’un appel : autorise f()
    let mut appel_ouvert = false;

    let mut it = tokens.iter().peekable();

    while let Some(tok) = it.next() {
        let juste_ouvert = std::mem::replace(&mut appel_ouvert, false);

        match tok {
            Tok::Num(_) | Tok::Pi | Tok::Euler => {
                if !attend_valeur {
                    return Err(ErreurCalcul::Syntaxe("valeurs juxtaposées"));
                }
                out.push(match tok {
                    Tok::Num(v) => Rpn::Num(*v),
                    Tok::Pi => Rpn::Pi,
                    _ => Rpn::Euler,
                });
                attend_valeur = false;
            }

            Tok::Ident(nom) => {
                if !attend_valeur {
                    return Err(ErreurCalcul::Syntaxe("valeurs juxtaposées"));
                }
                let f = Fonction::depuis_nom(nom)
                    .ok_or_else(|| ErreurCalcul::IdentInconnu(nom.clone()))?;
                // une fonction native n’a de sens qu’appelée
                if it.next_if(|t| matches!(t, Tok::LPar)).is_none() {
                    return Err(ErreurCalcul::IdentInconnu(nom.clone()));
                }
                ops.push(Pile::Appel { f, virgules: 0 });
                appel_ouvert = true;
                attend_valeur = true;
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(ErreurCalcul::Syntaxe("appel d’une valeur"));
                }
                ops.push(Pile::Groupe);
                attend_valeur = true;
            }

            Tok::RPar => {
                if attend_valeur && !juste_ouvert {
                    return Err(ErreurCalcul::Syntaxe("expression attendue avant ')'"));
                }

                // dépile jusqu’à la parenthèse ouvrante
                loop {
                    match ops.pop() {
                        Some(Pile::Op(op)) => out.push(Rpn::Op(op)),
                        Some(Pile::Groupe) => break,
                        Some(Pile::Appel { f, virgules }) => {
                            let n = if juste_ouvert { 0 } else { virgules + 1 };
                            out.push(Rpn::Appel(f, n));
                            break;
                        }
                        None => return Err(ErreurCalcul::Syntaxe("parenthèse fermante orpheline")),
                    }
                }

                attend_valeur = false;
            }

            Tok::Virgule => {
                if attend_valeur {
                    return Err(ErreurCalcul::Syntaxe("expression attendue avant ','"));
                }

                // dépile jusqu’à la parenthèse englobante (sans la retirer)
                while let Some(Pile::Op(op)) = ops.last() {
                    out.push(Rpn::Op(*op));
                    ops.pop();
                }

                if let Some(Pile::Appel { virgules, .. }) = ops.last_mut() {
                    *virgules += 1;
                } else {
                    ops.push(Pile::Op(Op::Sequence));
                }
                attend_valeur = true;
            }

            Tok::Plus | Tok::Minus if attend_valeur => {
                let op = if matches!(tok, Tok::Minus) { Op::Neg } else { Op::Plus };
                // préfixe : rien à dépiler
                ops.push(Pile::Op(op));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::StarStar => {
                if attend_valeur {
                    return Err(ErreurCalcul::Syntaxe("opérande manquante"));
                }

                let op = match tok {
                    Tok::Plus => Op::Add,
                    Tok::Minus => Op::Sub,
                    Tok::Star => Op::Mul,
                    Tok::Slash => Op::Div,
                    _ => Op::Pow,
                };

                if op == Op::Pow {
                    if let Some(Pile::Op(top)) = ops.last() {
                        if is_unaire(*top) {
                            return Err(ErreurCalcul::Syntaxe("base unaire de '**'"));
                        }
                    }
                }

                depile_pour(op, &mut ops, &mut out);
                ops.push(Pile::Op(op));
                attend_valeur = true;
            }
        }
    }

    if tokens.is_empty() {
        return Err(ErreurCalcul::Vide);
    }
    if attend_valeur {
        return Err(ErreurCalcul::Syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(p) = ops.pop() {
        match p {
            Pile::Op(op) => out.push(Rpn::Op(op)),
            Pile::Groupe | Pile::Appel { .. } => {
                return Err(ErreurCalcul::Syntaxe("parenthèses non fermées"))
            }
        }
    }

    Ok(out)
}

fn un<T>(st: &mut Vec<T>) -> Result<T, ErreurCalcul> {
    st.pop().ok_or(INVALIDE)
}

fn deux<T>(st: &mut Vec<T>) -> Result<(T, T), ErreurCalcul> {
    let b = st.pop().ok_or(INVALIDE)?;
    let a = st.pop().ok_or(INVALIDE)?;
    Ok((a, b))
}

fn arguments<T>(st: &mut Vec<T>, n: usize) -> Result<Vec<T>, ErreurCalcul> {
    if st.len() < n {
        return Err(INVALIDE);
    }
    Ok(st.split_off(st.len() - n))
}

/// Évalue la RPN avec une pile de valeurs : pas de récursion, quelle que soit
/// la longueur de l’expression.
pub fn evalue_rpn(rpn: &[Rpn]) -> Result<f64, ErreurCalcul> {
    let mut st: Vec<f64> = Vec::new();

    for item in rpn {
        let v = match item {
            Rpn::Num(v) => *v,
            Rpn::Pi => consts::PI,
            Rpn::Euler => consts::E,

            Rpn::Op(Op::Neg) => -un(&mut st)?,
            Rpn::Op(Op::Plus) => un(&mut st)?,

            Rpn::Op(Op::Sequence) => deux(&mut st)?.1,
            Rpn::Op(Op::Add) => {
                let (a, b) = deux(&mut st)?;
                a + b
            }
            Rpn::Op(Op::Sub) => {
                let (a, b) = deux(&mut st)?;
                a - b
            }
            Rpn::Op(Op::Mul) => {
                let (a, b) = deux(&mut st)?;
                a * b
            }
            Rpn::Op(Op::Div) => {
                let (a, b) = deux(&mut st)?;
                a / b
            }
            Rpn::Op(Op::Pow) => {
                let (a, b) = deux(&mut st)?;
                puissance(a, b)
            }

            Rpn::Appel(f, n) => f.applique(&arguments(&mut st, *n)?),
        };
        st.push(v);
    }

    if st.len() != 1 {
        return Err(INVALIDE);
    }
    un(&mut st)
}

/// Sous-arbre + sa profondeur.
type Noeud = (Expr, usize);

fn noeud_binaire(
    st: &mut Vec<Noeud>,
    construit: fn(Box<Expr>, Box<Expr>) -> Expr,
) -> Result<Noeud, ErreurCalcul> {
    let ((a, pa), (b, pb)) = deux(st)?;
    Ok((construit(Box::new(a), Box::new(b)), pa.max(pb) + 1))
}

/// Construit une Expr à partir d’une RPN (démarche uniquement).
///
/// Au-delà de `PROFONDEUR_ARBRE_MAX` niveaux : `ErreurCalcul::TropProfond`.
pub fn from_rpn(rpn: &[Rpn]) -> Result<Expr, ErreurCalcul> {
    let mut st: Vec<Noeud> = Vec::new();

    for item in rpn {
        let noeud = match item {
            Rpn::Num(v) => (Expr::Num(*v), 1),
            Rpn::Pi => (Expr::Pi, 1),
            Rpn::Euler => (Expr::Euler, 1),

            // +x ne change pas la valeur
            Rpn::Op(Op::Plus) => un(&mut st)?,
            Rpn::Op(Op::Neg) => {
                let (x, p) = un(&mut st)?;
                (Expr::Neg(Box::new(x)), p + 1)
            }

            Rpn::Op(Op::Sequence) => noeud_binaire(&mut st, Expr::Sequence)?,
            Rpn::Op(Op::Add) => noeud_binaire(&mut st, Expr::Add)?,
            Rpn::Op(Op::Sub) => noeud_binaire(&mut st, Expr::Sub)?,
            Rpn::Op(Op::Mul) => noeud_binaire(&mut st, Expr::Mul)?,
            Rpn::Op(Op::Div) => noeud_binaire(&mut st, Expr::Div)?,
            Rpn::Op(Op::Pow) => noeud_binaire(&mut st, Expr::Pow)?,

            Rpn::Appel(f, n) => {
                let args = arguments(&mut st, *n)?;
                let p = args.iter().map(|(_, p)| *p).max().unwrap_or(0) + 1;
                (Expr::Appel(*f, args.into_iter().map(|(e, _)| e).collect()), p)
            }
        };

        if noeud.1 > PROFONDEUR_ARBRE_MAX {
            return Err(ErreurCalcul::TropProfond(PROFONDEUR_ARBRE_MAX));
        }
        st.push(noeud);
    }

    if st.len() != 1 {
        return Err(INVALIDE);
    }
    un(&mut st).map(|(e, _)| e)
}

/// Format utilitaire (démarche) : RPN en texte.
pub fn format_rpn(rpn: &[Rpn]) -> String {
    let mut out = Vec::new();
    for item in rpn {
        let s = match item {
            Rpn::Num(v) => super::format::format_nombre(*v),
            Rpn::Pi => "π".to_string(),
            Rpn::Euler => "ℯ".to_string(),
            Rpn::Op(op) => match op {
                Op::Sequence => ",",
                Op::Add => "+",
                Op::Sub => "-",
                Op::Mul => "*",
                Op::Div => "/",
                Op::Neg => "neg",
                Op::Plus => "pos",
                Op::Pow => "**",
            }
            .to_string(),
            Rpn::Appel(f, n) => format!("{}/{n}", f.nom()),
        };
        out.push(s);
    }
    out.join(" ")
}
