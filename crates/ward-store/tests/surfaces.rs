//! Integration tests for the internal and external surfaces over the full
//! attribute matrix, in both declaration syntaxes.

use std::collections::HashSet;

use proptest::prelude::*;
use ward_core::{AccessError, Declarations, FieldOptions, InstantiationError, Value};
use ward_store::{ClassOptions, Registry};
use ward_test_utils::{all_combinations, all_names, combo_name, public_names, DeclShape, COMBOS};

fn as_set<'a>(names: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
    names.into_iter().map(str::to_string).collect()
}

#[test]
fn external_surface_is_exactly_the_public_fields() {
    for shape in [DeclShape::Flat, DeclShape::Grouped] {
        let bp = Registry::new()
            .build(all_combinations(shape, ""), ClassOptions::new())
            .unwrap();
        let mut obj = bp.base().subclass("All").instantiate().unwrap();

        let expected: HashSet<String> = public_names("").into_iter().collect();
        assert_eq!(as_set(obj.external_fields()), expected, "{shape:?}");

        let this = bp.access().handle(&mut obj).unwrap();
        let all: HashSet<String> = all_names("").into_iter().collect();
        assert_eq!(as_set(this.fields()), all, "{shape:?}");
        for name in all_names("") {
            assert_eq!(this.get(&name), Ok(Value::from(name.as_str())));
        }
    }
}

#[test]
fn private_fields_are_unknown_externally() {
    let bp = Registry::new()
        .build(all_combinations(DeclShape::Grouped, ""), ClassOptions::new())
        .unwrap();
    let class = bp.base().subclass("All");
    let mut obj = class.instantiate().unwrap();
    for combo in COMBOS.iter().filter(|c| !c.public) {
        let name = combo_name(*combo, "");
        assert_eq!(
            obj.get(&name),
            Err(AccessError::UnknownField { name: name.clone() })
        );
        assert_eq!(
            obj.set(&name, 1),
            Err(AccessError::UnknownField { name: name.clone() })
        );
        assert!(class.get(&name).is_err());
    }
}

#[test]
fn finals_with_values_reject_every_surface() {
    let bp = Registry::new()
        .build(all_combinations(DeclShape::Flat, ""), ClassOptions::new())
        .unwrap();
    let class = bp.base().subclass("All");
    let mut obj = class.instantiate().unwrap();

    for combo in COMBOS.iter().filter(|c| c.final_) {
        let name = combo_name(*combo, "");
        let rejected = Err(AccessError::FinalReassignment { name: name.clone() });
        assert_eq!(bp.access().handle(&mut obj).unwrap().set(&name, 0), rejected);
        if combo.public {
            assert_eq!(obj.set(&name, 0), rejected);
        }
        if combo.public && combo.shared {
            assert_eq!(class.set(&name, 0), rejected);
        }
        assert_eq!(
            bp.access().view(&obj).unwrap().get(&name),
            Ok(Value::from(name.as_str()))
        );
    }
}

#[test]
fn mutables_reflect_most_recent_write() {
    let bp = Registry::new()
        .build(all_combinations(DeclShape::Grouped, ""), ClassOptions::new())
        .unwrap();
    let mut obj = bp.base().subclass("All").instantiate().unwrap();
    let mut this = bp.access().handle(&mut obj).unwrap();
    for combo in COMBOS.iter().filter(|c| !c.final_) {
        let name = combo_name(*combo, "");
        for i in 0..10 {
            this.set(&name, i).unwrap();
        }
        assert_eq!(this.get(&name), Ok(Value::Int(9)));
    }
}

#[test]
fn shared_writes_are_visible_to_every_instance() {
    let bp = Registry::new()
        .build(all_combinations(DeclShape::Flat, ""), ClassOptions::new())
        .unwrap();
    let class = bp.base().subclass("All");
    let mut a = class.instantiate().unwrap();
    let b = class.instantiate().unwrap();

    a.set("pubStatMut", "from a").unwrap();
    assert_eq!(b.get("pubStatMut"), Ok(Value::from("from a")));
    assert_eq!(class.get("pubStatMut"), Ok(Value::from("from a")));

    bp.access().handle(&mut a).unwrap().set("privStatMut", 5).unwrap();
    assert_eq!(
        bp.access().view(&b).unwrap().get("privStatMut"),
        Ok(Value::Int(5))
    );

    class.set("pubStatMut", "from type").unwrap();
    assert_eq!(a.get("pubStatMut"), Ok(Value::from("from type")));
}

#[test]
fn abstract_base_rejects_instantiation() {
    let bp = Registry::new()
        .build(all_combinations(DeclShape::Flat, ""), ClassOptions::named("Abstract"))
        .unwrap();
    let err = bp.base().instantiate().unwrap_err();
    assert_eq!(
        err,
        InstantiationError::AbstractInstantiation {
            class: bp.base().id(),
            name: "Abstract".into(),
        }
    );
}

#[test]
fn null_final_shared_accepts_one_write() {
    let bp = Registry::new()
        .build(
            Declarations::flat().field_with(
                "seed",
                FieldOptions::new(Value::Null).shared().final_(),
            ),
            ClassOptions::new(),
        )
        .unwrap();
    let class = bp.base().subclass("S");
    let mut a = class.instantiate().unwrap();
    let mut b = class.instantiate().unwrap();
    a.set("seed", Value::Null).unwrap();
    assert_eq!(
        b.set("seed", 1),
        Err(AccessError::FinalReassignment {
            name: "seed".into()
        })
    );
    assert_eq!(class.get("seed"), Ok(Value::Null));
}

proptest! {
    #[test]
    fn instance_writes_isolated_shared_writes_visible(
        writes in prop::collection::vec((any::<bool>(), any::<bool>(), -1000i64..1000), 1..40),
    ) {
        let bp = Registry::new()
            .build(
                Declarations::flat()
                    .field("own", 0)
                    .field_with("common", FieldOptions::new(0).shared()),
                ClassOptions::new(),
            )
            .unwrap();
        let class = bp.base().subclass("P");
        let mut objs = [class.instantiate().unwrap(), class.instantiate().unwrap()];
        let mut own = [0i64, 0];
        let mut common = 0i64;

        for (first, shared, value) in writes {
            let i = usize::from(!first);
            if shared {
                objs[i].set("common", value).unwrap();
                common = value;
            } else {
                objs[i].set("own", value).unwrap();
                own[i] = value;
            }
            for j in 0..2 {
                prop_assert_eq!(objs[j].get("own"), Ok(Value::Int(own[j])));
                prop_assert_eq!(objs[j].get("common"), Ok(Value::Int(common)));
            }
        }
    }
}
