// src/noyau/format.rs
//
// Nombre -> texte, tel que l’affichage de la calculatrice le montre :
// - chiffres les plus courts qui relisent exactement la même valeur
// - notation ordinaire pour 1e-6 <= |x| < 1e21, scientifique sinon (1e+21, 1.5e-7)
// - -0 s’affiche "0"

/// Formate un flottant pour l’affichage (résultat de calcul, rappel mémoire).
pub fn format_nombre(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    let signe = if x < 0.0 { "-" } else { "" };
    let (chiffres, n) = decompose(x.abs());
    let k = chiffres.len() as i32;

    let corps = if k <= n && n <= 21 {
        // entier : chiffres puis zéros
        format!("{chiffres}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (ent, frac) = chiffres.split_at(n as usize);
        format!("{ent}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{chiffres}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let signe_e = if e >= 0 { '+' } else { '-' };
        let (tete, reste) = chiffres.split_at(1);
        if reste.is_empty() {
            format!("{tete}e{signe_e}{}", e.abs())
        } else {
            format!("{tete}.{reste}e{signe_e}{}", e.abs())
        }
    };

    format!("{signe}{corps}")
}

/// x > 0 fini -> (chiffres significatifs, n) avec x = 0.chiffres × 10^n.
///
/// `{:e}` produit déjà la forme la plus courte ("1.2345e-7").
fn decompose(x: f64) -> (String, i32) {
    let s = format!("{x:e}");
    let (mantisse, exposant) = s.split_once('e').unwrap_or((s.as_str(), "0"));
    let chiffres: String = mantisse.chars().filter(|c| *c != '.').collect();
    let e: i32 = exposant.parse().unwrap_or(0);
    (chiffres, e + 1)
}
