//! Reusable declaration fixtures.
//!
//! [`all_combinations`] declares one field for each of the eight
//! visibility × storage × mutability combinations, plus four fields using
//! the shorthand and minimal options syntax. Every field's initial value
//! is its own name, so tests can assert which storage a read resolved to.

use ward_core::{Declarations, FieldOptions};

/// Which declaration syntax a fixture uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclShape {
    /// `name → value | options`, visibility on the options record.
    Flat,
    /// `public` / `private` groups.
    Grouped,
}

/// One attribute combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Combo {
    pub public: bool,
    pub shared: bool,
    pub final_: bool,
}

/// All eight combinations, public first.
pub const COMBOS: [Combo; 8] = {
    let mut combos = [Combo {
        public: false,
        shared: false,
        final_: false,
    }; 8];
    let mut i = 0;
    while i < 8 {
        combos[i] = Combo {
            public: i & 4 == 0,
            shared: i & 2 != 0,
            final_: i & 1 != 0,
        };
        i += 1;
    }
    combos
};

/// Names of the four shorthand fields (without suffix) and whether each
/// is public.
pub const SHORTHAND_FIELDS: [(&str, bool); 4] = [
    ("pubShort", true),
    ("pubMed", true),
    ("privShort", false),
    ("privMed", false),
];

/// Field name for a combination, e.g. `pubStatFin` + suffix.
pub fn combo_name(combo: Combo, suffix: &str) -> String {
    format!(
        "{}{}{}{suffix}",
        if combo.public { "pub" } else { "priv" },
        if combo.shared { "Stat" } else { "Inst" },
        if combo.final_ { "Fin" } else { "Mut" },
    )
}

fn options(name: &str, combo: Combo) -> FieldOptions {
    let mut opts = FieldOptions::new(name);
    if combo.shared {
        opts = opts.shared();
    }
    if combo.final_ {
        opts = opts.final_();
    }
    opts
}

/// Declare every combination plus the shorthand fields.
///
/// `suffix` is appended to every name so parent and child fixtures can
/// coexist in one chain.
pub fn all_combinations(shape: DeclShape, suffix: &str) -> Declarations {
    match shape {
        DeclShape::Flat => {
            let mut flat = Declarations::flat();
            for combo in COMBOS {
                let name = combo_name(combo, suffix);
                let opts = options(&name, combo);
                let opts = if combo.public {
                    opts.public()
                } else {
                    opts.private()
                };
                flat = flat.field_with(name, opts);
            }
            let short = format!("pubShort{suffix}");
            let med = format!("pubMed{suffix}");
            let priv_short = format!("privShort{suffix}");
            let priv_med = format!("privMed{suffix}");
            flat.field(short.clone(), short)
                .field_with(med.clone(), FieldOptions::new(med))
                .field_with(priv_short.clone(), FieldOptions::new(priv_short).private())
                .field_with(priv_med.clone(), FieldOptions::new(priv_med).private())
                .into()
        }
        DeclShape::Grouped => {
            let mut grouped = Declarations::grouped();
            for combo in COMBOS {
                let name = combo_name(combo, suffix);
                let opts = options(&name, combo);
                grouped = if combo.public {
                    grouped.public_with(name, opts)
                } else {
                    grouped.private_with(name, opts)
                };
            }
            let short = format!("pubShort{suffix}");
            let med = format!("pubMed{suffix}");
            let priv_short = format!("privShort{suffix}");
            let priv_med = format!("privMed{suffix}");
            grouped
                .public(short.clone(), short)
                .public_with(med.clone(), FieldOptions::new(med))
                .private(priv_short.clone(), priv_short)
                .private_with(priv_med.clone(), FieldOptions::new(priv_med))
                .into()
        }
    }
}

/// Every field name [`all_combinations`] declares, public ones first.
pub fn all_names(suffix: &str) -> Vec<String> {
    let mut names: Vec<String> = COMBOS.iter().map(|&c| combo_name(c, suffix)).collect();
    names.extend(SHORTHAND_FIELDS.iter().map(|(n, _)| format!("{n}{suffix}")));
    names
}

/// Public field names [`all_combinations`] declares.
pub fn public_names(suffix: &str) -> Vec<String> {
    let mut names: Vec<String> = COMBOS
        .iter()
        .filter(|c| c.public)
        .map(|&c| combo_name(c, suffix))
        .collect();
    names.extend(
        SHORTHAND_FIELDS
            .iter()
            .filter(|(_, public)| *public)
            .map(|(n, _)| format!("{n}{suffix}")),
    );
    names
}
